use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::detect::Format;

/// Machine-readable category of an import failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Text is empty or whitespace only.
    NoInput,
    /// JSON did not decode, decoded to the wrong shape, or the input exceeded a limit.
    InvalidFormat,
    /// CSV header row lacks a required column.
    MissingHeaders,
    /// Parsing ran but no usable record came out of it.
    NoRecordsFound,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NoInput => "no_input",
            ErrorKind::InvalidFormat => "invalid_format",
            ErrorKind::MissingHeaders => "missing_headers",
            ErrorKind::NoRecordsFound => "no_records_found",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed import: one kind plus a message meant for the user.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct ImportError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ImportError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn no_input() -> Self {
        Self::new(ErrorKind::NoInput, "No input provided")
    }

    pub fn invalid_json(detail: impl fmt::Display) -> Self {
        Self::new(ErrorKind::InvalidFormat, format!("Invalid JSON: {detail}"))
    }

    pub fn missing_headers(missing: &[&str]) -> Self {
        Self::new(
            ErrorKind::MissingHeaders,
            format!(
                "CSV header is missing required column(s): {} (expected at least type, name, content)",
                missing.join(", ")
            ),
        )
    }

    pub fn no_records(format: Format) -> Self {
        Self::new(
            ErrorKind::NoRecordsFound,
            format!("No valid records found in {format} input"),
        )
    }
}
