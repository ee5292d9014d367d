//! Content sniffing for pasted or uploaded import text.
//!
//! There is no file extension or declared schema to rely on, so the format is
//! inferred from the text itself. The checks run in a fixed order and the
//! first match wins:
//!
//! 1. JSON, when the first non-whitespace character opens an array or object.
//! 2. CSV, when the first line looks like a header row.
//! 3. BIND, when any line looks like a resource record.
//! 4. JSON again as the fallback, so that unrecognized input is reported by the
//!    JSON parser as invalid JSON.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::parser::bind;

/// The interchange formats the importer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Json,
    Csv,
    Bind,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Csv => "csv",
            Format::Bind => "bind",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const CSV_HEADER_HINTS: [&str; 3] = ["type", "name", "content"];

/// Classifies `text`. Returns `None` only for empty or whitespace-only input.
pub fn detect(text: &str) -> Option<Format> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if text.starts_with(['[', '{']) {
        return Some(Format::Json);
    }

    let first_line = text.lines().next().unwrap_or_default().to_lowercase();
    if first_line.contains(',') && CSV_HEADER_HINTS.iter().any(|h| first_line.contains(h)) {
        return Some(Format::Csv);
    }

    if text.lines().any(bind::looks_like_record) {
        return Some(Format::Bind);
    }

    Some(Format::Json)
}
