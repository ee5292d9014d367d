use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::constants::{APEX, AUTO_TTL};

/// Resource record types accepted by the importer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordType {
    A,
    Aaaa,
    Cname,
    Mx,
    Txt,
    Ns,
    Srv,
    Caa,
    Ptr,
    Soa,
    Spf,
    Tlsa,
    Sshfp,
    Ds,
    Naptr,
    Https,
    Svcb,
    Uri,
    Loc,
    Cert,
}

impl RecordType {
    pub const ALL: [RecordType; 20] = [
        RecordType::A,
        RecordType::Aaaa,
        RecordType::Cname,
        RecordType::Mx,
        RecordType::Txt,
        RecordType::Ns,
        RecordType::Srv,
        RecordType::Caa,
        RecordType::Ptr,
        RecordType::Soa,
        RecordType::Spf,
        RecordType::Tlsa,
        RecordType::Sshfp,
        RecordType::Ds,
        RecordType::Naptr,
        RecordType::Https,
        RecordType::Svcb,
        RecordType::Uri,
        RecordType::Loc,
        RecordType::Cert,
    ];

    /// The uppercase mnemonic, as written in zone files.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
            RecordType::Cname => "CNAME",
            RecordType::Mx => "MX",
            RecordType::Txt => "TXT",
            RecordType::Ns => "NS",
            RecordType::Srv => "SRV",
            RecordType::Caa => "CAA",
            RecordType::Ptr => "PTR",
            RecordType::Soa => "SOA",
            RecordType::Spf => "SPF",
            RecordType::Tlsa => "TLSA",
            RecordType::Sshfp => "SSHFP",
            RecordType::Ds => "DS",
            RecordType::Naptr => "NAPTR",
            RecordType::Https => "HTTPS",
            RecordType::Svcb => "SVCB",
            RecordType::Uri => "URI",
            RecordType::Loc => "LOC",
            RecordType::Cert => "CERT",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRecordType(pub String);

impl fmt::Display for UnknownRecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported record type '{}'", self.0)
    }
}

impl std::error::Error for UnknownRecordType {}

impl FromStr for RecordType {
    type Err = UnknownRecordType;

    /// Case-insensitive lookup of a mnemonic in the whitelist.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownRecordType(s.to_string()))
    }
}

impl Serialize for RecordType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// A single imported record, in the shape handed to the bulk-create endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalRecord {
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,
    /// Extra members of a JSON source object (`data`, `comment`, ...).
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl CanonicalRecord {
    pub fn new(record_type: RecordType, name: impl Into<String>, content: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            record_type,
            name: if name.is_empty() { APEX.to_string() } else { name },
            content: content.into(),
            ttl: AUTO_TTL,
            priority: None,
            proxied: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl.max(AUTO_TTL);
        self
    }

    pub fn with_priority(mut self, priority: Option<u16>) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_proxied(mut self, proxied: Option<bool>) -> Self {
        self.proxied = proxied;
        self
    }
}
