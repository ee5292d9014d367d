use std::fmt::{self, Write};

use crate::constants::AUTO_TTL;
use crate::output::{NAME_COLUMN_WIDTH, TYPE_COLUMN_WIDTH};
use crate::record::CanonicalRecord;

fn format_ttl(ttl: u32) -> String {
    if ttl == AUTO_TTL {
        "auto".to_string()
    } else {
        ttl.to_string()
    }
}

fn format_optional<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Writes a fixed-width preview of `records`, one line per record.
pub fn write_table<W: Write>(out: &mut W, records: &[CanonicalRecord]) -> fmt::Result {
    writeln!(
        out,
        "{:type_w$} {:name_w$} {:>7} {:>5} {:7} CONTENT",
        "TYPE",
        "NAME",
        "TTL",
        "PRIO",
        "PROXIED",
        type_w = TYPE_COLUMN_WIDTH,
        name_w = NAME_COLUMN_WIDTH
    )?;

    for record in records {
        let record_type = record.record_type.as_str();
        let name = &record.name;
        let ttl = format_ttl(record.ttl);
        let prio = format_optional(record.priority);
        let proxied = format_optional(record.proxied);
        let content = &record.content;
        writeln!(
            out,
            "{record_type:type_w$} {name:name_w$} {ttl:>7} {prio:>5} {proxied:7} {content}",
            type_w = TYPE_COLUMN_WIDTH,
            name_w = NAME_COLUMN_WIDTH
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordType;

    #[test]
    fn test_write_table() {
        let records = vec![
            CanonicalRecord::new(RecordType::Mx, "@", "mail.example.com")
                .with_ttl(3600)
                .with_priority(Some(10)),
            CanonicalRecord::new(RecordType::A, "www", "1.2.3.4").with_proxied(Some(true)),
        ];
        let mut out = String::new();
        write_table(&mut out, &records).unwrap();

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("TYPE   NAME"));
        assert!(lines[0].ends_with("PROXIED CONTENT"));
        assert!(lines[1].starts_with("MX     @ "));
        assert!(lines[1].contains("   3600    10 -       mail.example.com"));
        assert!(lines[2].contains("   auto     - true    1.2.3.4"));
    }

    #[test]
    fn test_write_table_long_name_does_not_truncate() {
        let name = "a".repeat(40);
        let records = vec![CanonicalRecord::new(RecordType::Txt, name.clone(), "x")];
        let mut out = String::new();
        write_table(&mut out, &records).unwrap();
        assert!(out.contains(&name));
    }
}
