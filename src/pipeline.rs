use tracing::{info, warn};

use crate::config::{ImportConfig, Limits};
use crate::detect::{detect, Format};
use crate::error::ImportError;
use crate::parser::{parse_as, ParseResult};

/// Outcome of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct Import {
    /// Format the text was parsed as; `None` when parsing never started.
    pub format: Option<Format>,
    pub result: ParseResult,
}

/// Detects the format of import text and hands it to the matching parser.
///
/// The pipeline keeps no state between runs; the same text always yields the
/// same [`Import`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportPipeline {
    limits: Limits,
    format: Option<Format>,
}

impl ImportPipeline {
    pub fn new(limits: Limits) -> Self {
        Self {
            limits,
            format: None,
        }
    }

    pub fn from_config(config: &ImportConfig) -> Self {
        Self::new(config.limits).with_format(config.format)
    }

    /// Forces a format instead of detecting one. `None` restores detection.
    pub fn with_format(mut self, format: Option<Format>) -> Self {
        self.format = format;
        self
    }

    /// The format `text` would be parsed as.
    pub fn detected_format(&self, text: &str) -> Option<Format> {
        if text.trim().is_empty() {
            return None;
        }
        self.format.or_else(|| detect(text))
    }

    pub fn run(&self, text: &str) -> Import {
        if text.trim().is_empty() {
            return Import {
                format: None,
                result: Err(ImportError::no_input()),
            };
        }

        if let Err(e) = self.limits.check(text) {
            warn!(error = %e, "Rejecting import");
            return Import {
                format: None,
                result: Err(e),
            };
        }

        // Detection only answers `None` for blank text, handled above.
        let format = self.format.or_else(|| detect(text)).unwrap_or(Format::Json);
        let result = parse_as(format, text);
        match &result {
            Ok(parsed) => info!(
                %format,
                records = parsed.records.len(),
                skipped = parsed.skipped,
                "Parsed import"
            ),
            Err(e) => info!(%format, kind = %e.kind, error = %e, "Import failed"),
        }

        Import {
            format: Some(format),
            result,
        }
    }
}

/// Detects the format of `text` and parses it with default limits.
pub fn parse(text: &str) -> ParseResult {
    ImportPipeline::default().run(text).result
}
