// Compile-time check: At least one config format must be enabled
#[cfg(not(any(feature = "yaml", feature = "toml")))]
compile_error!("At least one of the features 'yaml' or 'toml' must be enabled");

pub mod args;
pub mod config;
pub mod constants;
pub mod detect;
pub mod error;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod record;
pub mod transform;
pub mod validation;

pub use detect::{detect, Format};
pub use error::{ErrorKind, ImportError};
pub use parser::{ParseResult, Parsed};
pub use pipeline::{parse, Import, ImportPipeline};
pub use record::{CanonicalRecord, RecordType};
