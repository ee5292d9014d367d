//! BIND master-file parsing.
//!
//! This is a line scanner, not a full zone-file grammar. Each physical line is
//! classified on its own by [`classify_line`]; the only state carried between
//! lines is the last owner name seen, which is reused by lines that do not
//! name an owner.
//!
//! A record line is tried against two shapes, in this order:
//!
//! * `owner [ttl] [IN] TYPE content`
//! * `[ttl] IN TYPE content`, owner taken from the previous record line
//!
//! TTL and class may appear in either order. `TYPE` must be one of the
//! supported mnemonics; lines that fit neither shape are skipped, as are
//! records left without content once TXT quotes are removed.
//!
//! Not supported: records spread over several lines with parentheses (only
//! the first physical line is seen) and backslash escapes inside content.
//! `$TTL`, `$ORIGIN` and `$INCLUDE` are recognized and ignored.

use std::borrow::Cow;

use tracing::debug;

use crate::constants::{APEX, AUTO_TTL};
use crate::detect::Format;
use crate::parser::{ParseResult, Parsed};
use crate::record::{CanonicalRecord, RecordType};
use crate::transform::{owner_name, split_mx, strip_root_dot, unquote_txt};
use crate::validation::{record_type, ttl_from_u64};

/// Owner, optional TTL and class, type, content.
const MAX_LEADING_TOKENS: usize = 6;

/// How a single zone-file line was understood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    Comment,
    Directive,
    Record(RecordLine<'a>),
    Unmatched,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordLine<'a> {
    pub owner: Option<&'a str>,
    /// TTL in seconds as written, before normalization.
    pub ttl: Option<u64>,
    pub record_type: RecordType,
    pub content: &'a str,
}

/// Cuts the line at the first `;` that is neither escaped nor inside a quoted
/// string.
pub fn strip_comment(line: &str) -> &str {
    let mut in_quotes = false;
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '"' => in_quotes = !in_quotes,
            ';' if !in_quotes => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Parses a TTL token: plain seconds (`3600`) or BIND unit notation
/// (`1h`, `2d`, `1h30m`). Trailing bare digits count as seconds.
///
/// Values too large for `u64` saturate, so they still read as a TTL and are
/// normalized later.
pub fn parse_ttl(token: &str) -> Option<u64> {
    if token.is_empty() {
        return None;
    }

    let mut total: u64 = 0;
    let mut number: Option<u64> = None;
    for c in token.chars() {
        if let Some(digit) = c.to_digit(10) {
            number = Some(
                number
                    .unwrap_or(0)
                    .saturating_mul(10)
                    .saturating_add(digit as u64),
            );
            continue;
        }
        let unit = match c.to_ascii_lowercase() {
            's' => 1,
            'm' => 60,
            'h' => 3_600,
            'd' => 86_400,
            'w' => 604_800,
            _ => return None,
        };
        total = total.saturating_add(number.take()?.saturating_mul(unit));
    }
    Some(total.saturating_add(number.unwrap_or(0)))
}

fn is_class(token: &str) -> bool {
    token.eq_ignore_ascii_case("IN")
}

/// Whitespace-separated tokens with their byte offsets into `line`.
fn leading_tokens(line: &str) -> Vec<(usize, &str)> {
    let mut tokens = Vec::with_capacity(MAX_LEADING_TOKENS);
    let mut start = None;
    for (i, c) in line.char_indices() {
        match (c.is_whitespace(), start) {
            (true, Some(s)) => {
                tokens.push((s, &line[s..i]));
                start = None;
                if tokens.len() == MAX_LEADING_TOKENS {
                    return tokens;
                }
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        tokens.push((s, &line[s..]));
    }
    tokens
}

/// Whether the class token may be left out of a record shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Class {
    Optional,
    Required,
}

/// Matches `[ttl] [IN] TYPE content` starting at token `start`.
fn match_tail<'a>(
    line: &'a str,
    tokens: &[(usize, &'a str)],
    start: usize,
    want_class: Class,
) -> Option<(Option<u64>, RecordType, &'a str)> {
    let mut i = start;
    let mut ttl = None;
    let mut class = false;
    while let Some(&(_, token)) = tokens.get(i) {
        if ttl.is_none() {
            if let Some(seconds) = parse_ttl(token) {
                ttl = Some(seconds);
                i += 1;
                continue;
            }
        }
        if !class && is_class(token) {
            class = true;
            i += 1;
            continue;
        }
        break;
    }
    if want_class == Class::Required && !class {
        return None;
    }

    let (_, type_token) = tokens.get(i)?;
    let record_type = record_type(type_token)?;
    let (content_start, _) = tokens.get(i + 1)?;
    let content = line[*content_start..].trim();
    Some((ttl, record_type, content))
}

/// Classifies one physical line of a zone file.
pub fn classify_line(raw: &str) -> LineKind<'_> {
    let line = strip_comment(raw).trim();
    if line.is_empty() {
        return if raw.trim_start().starts_with(';') {
            LineKind::Comment
        } else {
            LineKind::Blank
        };
    }
    if line.starts_with('$') {
        return LineKind::Directive;
    }

    let tokens = leading_tokens(line);

    // `IN` is never taken as an owner name.
    if let Some(&(_, owner)) = tokens.first().filter(|(_, t)| !is_class(t)) {
        if let Some((ttl, record_type, content)) = match_tail(line, &tokens, 1, Class::Optional) {
            return LineKind::Record(RecordLine {
                owner: Some(owner),
                ttl,
                record_type,
                content,
            });
        }
    }

    // Without an owner the class is mandatory, otherwise prose that happens to
    // start with a type mnemonic would read as a record.
    match match_tail(line, &tokens, 0, Class::Required) {
        Some((ttl, record_type, content)) => LineKind::Record(RecordLine {
            owner: None,
            ttl,
            record_type,
            content,
        }),
        None => LineKind::Unmatched,
    }
}

/// Loose check used by format detection: an optional owner, optional TTL and
/// class, a supported type and some content. Comment and directive lines never
/// match.
pub fn looks_like_record(raw: &str) -> bool {
    let line = raw.trim();
    if line.is_empty() || line.starts_with(';') || line.starts_with('$') {
        return false;
    }
    let tokens = leading_tokens(line);
    match_tail(line, &tokens, 0, Class::Optional).is_some()
        || match_tail(line, &tokens, 1, Class::Optional).is_some()
}

/// Turns a classified line into a record. `None` when no content is left.
fn build_record(name: String, line: RecordLine<'_>) -> Option<CanonicalRecord> {
    let ttl = line.ttl.map(ttl_from_u64).unwrap_or(AUTO_TTL);
    let stripped = strip_root_dot(line.content);
    let mut content = Cow::Borrowed(stripped);
    let mut priority = None;

    match line.record_type {
        RecordType::Txt => content = unquote_txt(stripped),
        RecordType::Mx => {
            if let Some((prio, target)) = split_mx(stripped) {
                priority = Some(prio);
                content = Cow::Borrowed(target);
            }
        }
        _ => {}
    }

    if content.is_empty() {
        return None;
    }
    Some(
        CanonicalRecord::new(line.record_type, name, content)
            .with_ttl(ttl)
            .with_priority(priority),
    )
}

pub fn parse(text: &str) -> ParseResult {
    let mut last_owner = APEX.to_string();
    let mut records = Vec::new();
    let mut skipped = 0;

    for (index, raw) in text.lines().enumerate() {
        match classify_line(raw) {
            LineKind::Blank | LineKind::Comment | LineKind::Directive => {}
            LineKind::Unmatched => {
                debug!(line = index + 1, "Skipping zone line without a supported record");
                skipped += 1;
            }
            LineKind::Record(line) => {
                if let Some(owner) = line.owner {
                    last_owner = owner_name(owner);
                }
                match build_record(last_owner.clone(), line) {
                    Some(record) => records.push(record),
                    None => {
                        debug!(line = index + 1, "Skipping zone record with empty content");
                        skipped += 1;
                    }
                }
            }
        }
    }

    Parsed::finish(Format::Bind, records, skipped)
}
