use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Deserializer};

use crate::args::InputFormat;
use crate::constants::{DEFAULT_MAX_BYTES, DEFAULT_MAX_LINES};
use crate::detect::Format;
use crate::error::{ErrorKind, ImportError};

fn positive_limit<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};

    struct LimitVisitor;

    impl<'de> Visitor<'de> for LimitVisitor {
        type Value = usize;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a positive limit")
        }

        fn visit_u64<E>(self, value: u64) -> Result<usize, E>
        where
            E: de::Error,
        {
            if value == 0 {
                return Err(E::custom("limit cannot be zero"));
            }
            usize::try_from(value).map_err(|_| E::custom(format!("limit too large: {value}")))
        }

        fn visit_i64<E>(self, value: i64) -> Result<usize, E>
        where
            E: de::Error,
        {
            if value < 0 {
                return Err(E::custom("limit cannot be negative"));
            }
            self.visit_u64(value as u64)
        }
    }

    deserializer.deserialize_u64(LimitVisitor)
}

/// Upper bounds applied to an import before any scanning happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct Limits {
    #[serde(deserialize_with = "positive_limit")]
    pub max_bytes: usize,
    #[serde(deserialize_with = "positive_limit")]
    pub max_lines: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
            max_lines: DEFAULT_MAX_LINES,
        }
    }
}

impl Limits {
    pub fn check(&self, text: &str) -> Result<(), ImportError> {
        if text.len() > self.max_bytes {
            return Err(ImportError::new(
                ErrorKind::InvalidFormat,
                format!(
                    "Input is too large: {} bytes (limit {} bytes)",
                    text.len(),
                    self.max_bytes
                ),
            ));
        }
        let lines = text.lines().take(self.max_lines.saturating_add(1)).count();
        if lines > self.max_lines {
            return Err(ImportError::new(
                ErrorKind::InvalidFormat,
                format!("Input has too many lines (limit {})", self.max_lines),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImportConfig {
    pub limits: Limits,
    /// Skip detection and always use this format.
    pub format: Option<Format>,
}

fn extract_location(error_msg: &str) -> String {
    // Only the first "at line X column Y" is kept, it is the most specific one.
    if let Some(pos) = error_msg.find("at line ") {
        let rest = &error_msg[pos..];
        if let Some(next_at) = rest[8..].find(" at line ") {
            return rest[..8 + next_at].trim().to_string();
        } else if let Some(newline) = rest.find('\n') {
            return rest[..newline].trim().to_string();
        } else {
            let end = rest.len().min(50);
            return rest[..end].trim().to_string();
        }
    }
    String::new()
}

pub fn load_config(raw: &str, input_format: InputFormat) -> Result<ImportConfig> {
    let config: ImportConfig = match input_format {
        #[cfg(feature = "toml")]
        InputFormat::Toml => {
            let deserializer = toml::Deserializer::new(raw);
            serde_path_to_error::deserialize(deserializer).map_err(|e| {
                let inner_err = e.inner().to_string();
                anyhow!(
                    "TOML config error:\n  Path:  '{}'\n  Location: {}\n  Error: {}",
                    e.path(),
                    extract_location(&inner_err),
                    inner_err
                )
            })?
        }
        #[cfg(feature = "yaml")]
        InputFormat::Yaml => {
            let deserializer = serde_yml::Deserializer::from_str(raw);
            serde_path_to_error::deserialize(deserializer).map_err(|e| {
                let inner_err = e.inner().to_string();
                anyhow!(
                    "YAML config error:\n  Path:  '{}'\n  Location: {}\n  Error: {}",
                    e.path(),
                    extract_location(&inner_err),
                    inner_err
                )
            })?
        }
    };
    Ok(config)
}

/// Reads a config file. Without an explicit format the file extension decides.
pub fn load_config_file(path: &Path, input_format: Option<InputFormat>) -> Result<ImportConfig> {
    let input_format = input_format
        .or_else(|| InputFormat::from_path(path))
        .ok_or_else(|| {
            anyhow!(
                "Cannot tell the config format of {}, use --config-format",
                path.display()
            )
        })?;
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    load_config(&raw, input_format)
        .with_context(|| format!("Invalid config {}", path.display()))
}
