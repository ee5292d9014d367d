/// TTL value meaning "automatic", used whenever the source has no usable TTL.
pub const AUTO_TTL: u32 = 1;

/// Owner name of the zone apex.
pub const APEX: &str = "@";

/// Default upper bound for the size of an import, in bytes.
pub const DEFAULT_MAX_BYTES: usize = 1024 * 1024;

/// Default upper bound for the number of lines of an import.
pub const DEFAULT_MAX_LINES: usize = 20_000;

/// CSV columns that must be present in the header row.
pub const CSV_REQUIRED_COLUMNS: [&str; 3] = ["type", "name", "content"];
