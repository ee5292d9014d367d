use serde::Serialize;

use crate::record::CanonicalRecord;

/// Body of the bulk-create request.
#[derive(Debug, Serialize)]
pub struct ImportPayload<'a> {
    pub records: &'a [CanonicalRecord],
}

pub fn generate_json(records: &[CanonicalRecord]) -> serde_json::Result<String> {
    let mut output = serde_json::to_string_pretty(&ImportPayload { records })?;
    output.push('\n');
    Ok(output)
}
