use std::collections::BTreeMap;

use anyhow::{anyhow, bail, Result};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

use crate::constants::AUTO_TTL;
use crate::detect::Format;
use crate::error::{ErrorKind, ImportError};
use crate::parser::{ParseResult, Parsed};
use crate::record::CanonicalRecord;
use crate::transform::owner_name;
use crate::validation::{
    flag_from_str, priority_from_str, record_type, ttl_from_str, ttl_from_u64, MAX_TTL,
};

/// TTL as found in JSON exports: a number, a numeric string, or anything else
/// (which means "automatic").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ttl(pub u32);

impl Default for Ttl {
    fn default() -> Self {
        Ttl(AUTO_TTL)
    }
}

impl<'de> Deserialize<'de> for Ttl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct TtlVisitor;

        impl<'de> Visitor<'de> for TtlVisitor {
            type Value = Ttl;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a TTL in seconds")
            }

            fn visit_u64<E>(self, value: u64) -> Result<Ttl, E>
            where
                E: de::Error,
            {
                Ok(Ttl(ttl_from_u64(value)))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Ttl, E>
            where
                E: de::Error,
            {
                match u64::try_from(value) {
                    Ok(value) => self.visit_u64(value),
                    Err(_) => Ok(Ttl::default()),
                }
            }

            fn visit_f64<E>(self, value: f64) -> Result<Ttl, E>
            where
                E: de::Error,
            {
                if value.fract() == 0.0 && value >= 1.0 && value <= MAX_TTL as f64 {
                    Ok(Ttl(value as u32))
                } else {
                    Ok(Ttl::default())
                }
            }

            fn visit_str<E>(self, value: &str) -> Result<Ttl, E>
            where
                E: de::Error,
            {
                Ok(Ttl(ttl_from_str(value)))
            }

            fn visit_bool<E>(self, _: bool) -> Result<Ttl, E>
            where
                E: de::Error,
            {
                Ok(Ttl::default())
            }

            fn visit_unit<E>(self) -> Result<Ttl, E>
            where
                E: de::Error,
            {
                Ok(Ttl::default())
            }
        }

        deserializer.deserialize_any(TtlVisitor)
    }
}

fn lenient_priority<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().and_then(|v| u16::try_from(v).ok()),
        Value::String(s) => priority_from_str(&s),
        _ => None,
    })
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => Some(b),
        Value::String(s) => Some(flag_from_str(&s)),
        Value::Number(n) => Some(n.as_u64() == Some(1)),
        _ => None,
    })
}

/// One element of the record array, before whitelisting.
#[derive(Debug, Deserialize)]
struct JsonRecord {
    #[serde(rename = "type")]
    record_type: Option<String>,
    name: Option<String>,
    content: Option<String>,
    ttl: Option<Ttl>,
    #[serde(default, deserialize_with = "lenient_priority")]
    priority: Option<u16>,
    #[serde(default, deserialize_with = "lenient_flag")]
    proxied: Option<bool>,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

fn record_from_value(value: Value) -> Result<CanonicalRecord> {
    if !value.is_object() {
        bail!("element is not an object");
    }
    let raw: JsonRecord = serde_json::from_value(value)?;

    let type_str = raw.record_type.unwrap_or_default();
    let rtype = record_type(&type_str)
        .ok_or_else(|| anyhow!("missing or unsupported type '{type_str}'"))?;

    let content = raw.content.unwrap_or_default();
    if content.trim().is_empty() {
        bail!("missing content");
    }

    let mut record = CanonicalRecord::new(rtype, owner_name(&raw.name.unwrap_or_default()), content)
        .with_ttl(raw.ttl.unwrap_or_default().0)
        .with_priority(raw.priority)
        .with_proxied(raw.proxied);
    record.extra = raw.extra;
    Ok(record)
}

/// Parses a JSON array of records, or an object carrying one under `records`.
pub fn parse(text: &str) -> ParseResult {
    let value: Value = serde_json::from_str(text).map_err(ImportError::invalid_json)?;

    let candidate = match value {
        Value::Object(mut map) => match map.remove("records") {
            Some(records) => records,
            None => Value::Object(map),
        },
        other => other,
    };

    let Value::Array(elements) = candidate else {
        return Err(ImportError::new(
            ErrorKind::InvalidFormat,
            "Invalid JSON: expected an array of records or an object with a \"records\" array",
        ));
    };
    if elements.is_empty() {
        return Err(ImportError::no_records(Format::Json));
    }

    let mut records = Vec::with_capacity(elements.len());
    let mut skipped = 0;
    for (index, element) in elements.into_iter().enumerate() {
        match record_from_value(element) {
            Ok(record) => records.push(record),
            Err(e) => {
                debug!(index, error = %e, "Skipping JSON record");
                skipped += 1;
            }
        }
    }

    Parsed::finish(Format::Json, records, skipped)
}
