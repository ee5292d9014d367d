use std::path::Path;

use crate::detect::Format;

/// Format of a configuration file.
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputFormat {
    #[cfg(feature = "yaml")]
    Yaml,
    #[cfg(feature = "toml")]
    Toml,
}

impl InputFormat {
    /// Guesses the configuration format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            #[cfg(feature = "toml")]
            "toml" => Some(InputFormat::Toml),
            #[cfg(feature = "yaml")]
            "yaml" | "yml" => Some(InputFormat::Yaml),
            _ => None,
        }
    }
}

/// Import format selection on the command line.
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FormatArg {
    #[default]
    Auto,
    Json,
    Csv,
    Bind,
}

impl FormatArg {
    /// `None` means "detect from content".
    pub fn forced(self) -> Option<Format> {
        match self {
            FormatArg::Auto => None,
            FormatArg::Json => Some(Format::Json),
            FormatArg::Csv => Some(Format::Csv),
            FormatArg::Bind => Some(Format::Bind),
        }
    }
}

/// How parsed records are rendered.
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RenderFormat {
    /// Bulk-create payload: `{"records": [...]}`
    #[default]
    Json,
    /// Fixed-width preview table
    Table,
}
