use std::fs;

use dns_import::{detect, parse, CanonicalRecord, ErrorKind, Format, ImportPipeline, RecordType};

fn fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"));
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path}: {e}"))
}

fn find<'a>(records: &'a [CanonicalRecord], record_type: RecordType, name: &str) -> &'a CanonicalRecord {
    records
        .iter()
        .find(|r| r.record_type == record_type && r.name == name)
        .unwrap_or_else(|| panic!("{record_type} record for {name} not found"))
}

// ==================== Scenarios ====================

#[test]
fn test_json_array_scenario() {
    let input = r#"[{"type":"A","name":"www","content":"1.2.3.4"}]"#;
    assert_eq!(detect(input), Some(Format::Json));
    let parsed = parse(input).unwrap();
    assert_eq!(
        parsed.records,
        vec![CanonicalRecord::new(RecordType::A, "www", "1.2.3.4")]
    );
}

#[test]
fn test_csv_scenario() {
    let input = "type,name,content,ttl\nA,www,1.2.3.4,3600";
    assert_eq!(detect(input), Some(Format::Csv));
    let parsed = parse(input).unwrap();
    assert_eq!(
        parsed.records,
        vec![CanonicalRecord::new(RecordType::A, "www", "1.2.3.4").with_ttl(3600)]
    );
}

#[test]
fn test_bind_scenario() {
    let input = "www IN A 1.2.3.4";
    assert_eq!(detect(input), Some(Format::Bind));
    let parsed = parse(input).unwrap();
    assert_eq!(
        parsed.records,
        vec![CanonicalRecord::new(RecordType::A, "www", "1.2.3.4").with_ttl(1)]
    );
}

#[test]
fn test_bind_mx_scenario() {
    let parsed = parse("@ 3600 IN MX 10 mail.example.com.").unwrap();
    assert_eq!(
        parsed.records,
        vec![CanonicalRecord::new(RecordType::Mx, "@", "mail.example.com")
            .with_ttl(3600)
            .with_priority(Some(10))]
    );
}

#[test]
fn test_invalid_json_scenario() {
    let err = parse("{not valid json").unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidFormat);
}

#[test]
fn test_csv_header_only_scenario() {
    let err = parse("type,name,content\n").unwrap_err();
    assert_eq!(err.kind, ErrorKind::NoRecordsFound);
}

#[test]
fn test_empty_input() {
    assert_eq!(parse("").unwrap_err().kind, ErrorKind::NoInput);
    assert_eq!(parse(" \n\t").unwrap_err().kind, ErrorKind::NoInput);
}

// ==================== Fixtures ====================

#[test]
fn test_zone_file_fixture() {
    let content = fixture("example.zone");
    let import = ImportPipeline::default().run(&content);
    assert_eq!(import.format, Some(Format::Bind));

    let parsed = import.result.unwrap();
    assert_eq!(parsed.records.len(), 15);
    // Five SOA continuation lines and the HINFO record.
    assert_eq!(parsed.skipped, 6);

    let records = &parsed.records;
    assert_eq!(
        records
            .iter()
            .filter(|r| r.record_type == RecordType::Ns && r.name == "@")
            .count(),
        2
    );

    let mx: Vec<(Option<u16>, &str)> = records
        .iter()
        .filter(|r| r.record_type == RecordType::Mx)
        .map(|r| (r.priority, r.content.as_str()))
        .collect();
    assert_eq!(
        mx,
        vec![
            (Some(10), "mail.example.com"),
            (Some(20), "mail2.example.com")
        ]
    );

    let www = find(records, RecordType::A, "www");
    assert_eq!(www.ttl, 300);
    let www6 = find(records, RecordType::Aaaa, "www");
    assert_eq!(www6.content, "2001:db8::2");
    assert_eq!(www6.ttl, 1);

    let apex = find(records, RecordType::A, "@");
    assert_eq!(apex.content, "192.0.2.1");

    let dmarc = find(records, RecordType::Txt, "_dmarc");
    assert_eq!(
        dmarc.content,
        "v=DMARC1; p=quarantine; rua=mailto:dmarc@example.com"
    );

    let srv = find(records, RecordType::Srv, "_http._tcp");
    assert_eq!(srv.ttl, 3600);
    assert_eq!(srv.content, "10 60 80 www.example.com");

    let blog = find(records, RecordType::Cname, "blog");
    assert_eq!(blog.content, "www.example.com");

    let caa = find(records, RecordType::Caa, "@");
    assert_eq!(caa.content, "0 issue \"letsencrypt.org\"");

    assert!(find(records, RecordType::A, "*.dev").ttl == 1);
}

#[test]
fn test_csv_fixture() {
    let content = fixture("records.csv");
    let import = ImportPipeline::default().run(&content);
    assert_eq!(import.format, Some(Format::Csv));

    let parsed = import.result.unwrap();
    assert_eq!(parsed.records.len(), 5);
    assert_eq!(parsed.skipped, 1);

    let records = &parsed.records;
    let www = find(records, RecordType::A, "www");
    assert_eq!(www.ttl, 300);
    assert_eq!(www.proxied, Some(true));
    assert_eq!(www.priority, None);

    let mx = find(records, RecordType::Mx, "@");
    assert_eq!(mx.priority, Some(10));
    assert_eq!(mx.proxied, Some(false));

    let spf = find(records, RecordType::Txt, "@");
    assert_eq!(spf.content, "v=spf1 include:_spf.example.com, ~all");
    assert_eq!(spf.ttl, 1);
}

#[test]
fn test_json_fixture() {
    let content = fixture("records.json");
    let import = ImportPipeline::default().run(&content);
    assert_eq!(import.format, Some(Format::Json));

    let parsed = import.result.unwrap();
    assert_eq!(parsed.records.len(), 3);
    assert_eq!(parsed.skipped, 1);

    let records = &parsed.records;
    let www = find(records, RecordType::A, "www.example.com");
    assert_eq!(www.proxied, Some(true));
    assert_eq!(www.extra["id"], "372e6795");

    let srv = find(records, RecordType::Srv, "_sip._tcp.example.com");
    assert_eq!(srv.ttl, 1);
    assert_eq!(srv.extra["comment"], "voip");
    assert_eq!(srv.extra["data"]["port"], 5060);
}

// ==================== Properties ====================

#[test]
fn test_records_keep_invariants() {
    for name in ["example.zone", "records.csv", "records.json"] {
        let parsed = parse(&fixture(name)).unwrap();
        assert!(!parsed.records.is_empty());
        for record in &parsed.records {
            assert!(record.ttl >= 1, "{name}: {record:?}");
            assert!(RecordType::ALL.contains(&record.record_type), "{name}: {record:?}");
            assert!(!record.name.is_empty(), "{name}: {record:?}");
            assert!(!record.name.ends_with('.'), "{name}: {record:?}");
            assert!(!record.content.is_empty(), "{name}: {record:?}");
        }
    }
}

#[test]
fn test_bind_edge_cases_keep_invariants() {
    let zone = "\
www     IN  A    192.0.2.1
@       IN  TXT  \"\"
@       IN  TXT  \"v=DKIM1; k=rsa; \" \"p=MIGfMA0\"
NS records are managed elsewhere
A quick note about the migration
.       IN  NS   .
www2    99999999999999999999 IN A 192.0.2.2
";
    let parsed = parse(zone).unwrap();
    assert_eq!(parsed.records.len(), 3);
    assert_eq!(parsed.skipped, 4);

    for record in &parsed.records {
        assert!(record.ttl >= 1, "{record:?}");
        assert!(!record.name.ends_with('.'), "{record:?}");
        assert!(!record.content.is_empty(), "{record:?}");
        if record.record_type == RecordType::Txt {
            assert!(
                !(record.content.starts_with('"') && record.content.ends_with('"')),
                "{record:?}"
            );
        }
    }

    let dkim = find(&parsed.records, RecordType::Txt, "@");
    assert_eq!(dkim.content, "v=DKIM1; k=rsa; p=MIGfMA0");
    assert_eq!(find(&parsed.records, RecordType::A, "www2").ttl, 1);
}

#[test]
fn test_parse_is_idempotent() {
    for name in ["example.zone", "records.csv", "records.json"] {
        let content = fixture(name);
        assert_eq!(parse(&content), parse(&content));
        assert_eq!(detect(&content), detect(&content));
    }
}

#[test]
fn test_forced_format_overrides_detection() {
    let content = fixture("records.csv");
    let import = ImportPipeline::default()
        .with_format(Some(Format::Json))
        .run(&content);
    assert_eq!(import.format, Some(Format::Json));
    assert_eq!(import.result.unwrap_err().kind, ErrorKind::InvalidFormat);
}
