use tracing::debug;

use crate::constants::{AUTO_TTL, CSV_REQUIRED_COLUMNS};
use crate::detect::Format;
use crate::error::ImportError;
use crate::parser::{ParseResult, Parsed};
use crate::record::CanonicalRecord;
use crate::transform::owner_name;
use crate::validation::{flag_from_str, priority_from_str, record_type, ttl_from_str};

/// Splits one CSV line into trimmed fields.
///
/// A `"` toggles quoting and is dropped; there is no escaped-quote
/// convention, so `""` inside a quoted field simply closes and reopens it.
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

/// Column positions resolved from the header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Columns {
    pub record_type: usize,
    pub name: usize,
    pub content: usize,
    pub ttl: Option<usize>,
    pub proxied: Option<usize>,
    pub priority: Option<usize>,
}

impl Columns {
    pub fn from_header(line: &str) -> Result<Self, ImportError> {
        let header: Vec<String> = split_fields(line)
            .into_iter()
            .map(|cell| cell.to_lowercase())
            .collect();
        let find = |name: &str| header.iter().position(|cell| cell == name);

        let missing: Vec<&str> = CSV_REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|column| find(column).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(ImportError::missing_headers(&missing));
        }

        Ok(Columns {
            record_type: find("type").unwrap_or_default(),
            name: find("name").unwrap_or_default(),
            content: find("content").unwrap_or_default(),
            ttl: find("ttl"),
            proxied: find("proxied"),
            priority: find("priority"),
        })
    }

    /// Builds a record from a data row, `None` when the row is unusable.
    fn record(&self, fields: &[String]) -> Option<CanonicalRecord> {
        let cell = |i: usize| fields.get(i).map(String::as_str).unwrap_or("");

        let rtype = record_type(cell(self.record_type))?;
        let content = cell(self.content);
        if content.is_empty() {
            return None;
        }

        let ttl = self.ttl.map(|i| ttl_from_str(cell(i))).unwrap_or(AUTO_TTL);
        let priority = self.priority.and_then(|i| priority_from_str(cell(i)));
        let proxied = self.proxied.map(|i| flag_from_str(cell(i)));

        Some(
            CanonicalRecord::new(rtype, owner_name(cell(self.name)), content)
                .with_ttl(ttl)
                .with_priority(priority)
                .with_proxied(proxied),
        )
    }
}

/// Parses CSV text whose first non-empty line is a header naming at least
/// `type`, `name` and `content`.
pub fn parse(text: &str) -> ParseResult {
    let mut lines = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let Some((_, header)) = lines.next() else {
        return Err(ImportError::no_records(Format::Csv));
    };
    let mut rows = lines.peekable();
    if rows.peek().is_none() {
        return Err(ImportError::no_records(Format::Csv));
    }

    let columns = Columns::from_header(header)?;

    let mut records = Vec::new();
    let mut skipped = 0;
    for (index, line) in rows {
        match columns.record(&split_fields(line)) {
            Some(record) => records.push(record),
            None => {
                debug!(line = index + 1, "Skipping CSV row without a supported type or content");
                skipped += 1;
            }
        }
    }

    Parsed::finish(Format::Csv, records, skipped)
}
