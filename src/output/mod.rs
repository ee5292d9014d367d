pub mod json;
pub mod table;

/// Column width for the name field in table output
pub const NAME_COLUMN_WIDTH: usize = 32;

/// Column width for the type field in table output
pub const TYPE_COLUMN_WIDTH: usize = 6;
