use crate::constants::AUTO_TTL;
use crate::record::RecordType;

/// Largest TTL accepted as-is; anything above is treated as unusable.
pub const MAX_TTL: u32 = 2_147_483_647;

/// Whitelist step shared by every parser: trims, upper-cases and looks up the
/// mnemonic. `None` means the record must be dropped.
pub fn record_type(raw: &str) -> Option<RecordType> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse().ok()
}

/// Normalizes a numeric TTL; zero and out-of-range values become [`AUTO_TTL`].
pub fn ttl_from_u64(value: u64) -> u32 {
    if value == 0 || value > MAX_TTL as u64 {
        AUTO_TTL
    } else {
        value as u32
    }
}

/// Normalizes a textual TTL. Anything that is not a plain decimal number
/// becomes [`AUTO_TTL`].
pub fn ttl_from_str(raw: &str) -> u32 {
    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return AUTO_TTL;
    }
    raw.parse::<u64>().map(ttl_from_u64).unwrap_or(AUTO_TTL)
}

/// Parses a priority in 0-65535, `None` when the text is not such a number.
pub fn priority_from_str(raw: &str) -> Option<u16> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

pub fn flag_from_str(raw: &str) -> bool {
    let raw = raw.trim().to_ascii_lowercase();
    raw == "true" || raw == "1"
}
