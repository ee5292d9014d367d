pub mod bind;
pub mod csv;
pub mod json;

use crate::detect::Format;
use crate::error::ImportError;
use crate::record::CanonicalRecord;

/// Records produced by a successful parse.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    /// Never empty.
    pub records: Vec<CanonicalRecord>,
    /// Lines, rows or elements that were dropped as unusable.
    pub skipped: usize,
}

pub type ParseResult = Result<Parsed, ImportError>;

impl Parsed {
    pub(crate) fn finish(format: Format, records: Vec<CanonicalRecord>, skipped: usize) -> ParseResult {
        if records.is_empty() {
            return Err(ImportError::no_records(format));
        }
        Ok(Parsed { records, skipped })
    }
}

/// Runs the parser for `format` on `text`.
pub fn parse_as(format: Format, text: &str) -> ParseResult {
    match format {
        Format::Json => json::parse(text),
        Format::Csv => csv::parse(text),
        Format::Bind => bind::parse(text),
    }
}
