use std::borrow::Cow;

use crate::constants::APEX;
use crate::validation::priority_from_str;

/// Removes the root-label dot from a name (`mail.example.com.` -> `mail.example.com`).
/// The root itself (`.`) becomes empty.
pub fn strip_root_dot(value: &str) -> &str {
    value.strip_suffix('.').unwrap_or(value)
}

/// Normalizes an owner name: trimmed, no root dot, `@` when empty.
pub fn owner_name(raw: &str) -> String {
    let name = strip_root_dot(raw.trim());
    if name.is_empty() {
        APEX.to_string()
    } else {
        name.to_string()
    }
}

/// Removes the quoting from TXT content.
///
/// Several quoted character-strings (`"v=DKIM1; " "p=MIGf"`) are joined into
/// one value, the way resolvers hand them out. Anything else wrapped in a
/// quote pair loses that pair; unquoted text is returned as is.
pub fn unquote_txt(value: &str) -> Cow<'_, str> {
    if let Some(strings) = character_strings(value) {
        return match strings.as_slice() {
            [single] => Cow::Borrowed(*single),
            _ => Cow::Owned(strings.concat()),
        };
    }
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        return Cow::Borrowed(&value[1..value.len() - 1]);
    }
    Cow::Borrowed(value)
}

/// Splits `"a" "b"` into its quoted parts. `None` unless the whole value is
/// made of quoted strings separated by whitespace.
fn character_strings(value: &str) -> Option<Vec<&str>> {
    let mut rest = value.trim();
    if rest.is_empty() {
        return None;
    }
    let mut strings = Vec::new();
    while !rest.is_empty() {
        let body = rest.strip_prefix('"')?;
        let end = body.find('"')?;
        strings.push(&body[..end]);
        rest = body[end + 1..].trim_start();
    }
    Some(strings)
}

/// Splits MX content of the form `<priority> <target>`.
pub fn split_mx(content: &str) -> Option<(u16, &str)> {
    let (prio, target) = content.trim().split_once(char::is_whitespace)?;
    let prio = priority_from_str(prio)?;
    let target = strip_root_dot(target.trim());
    if target.is_empty() {
        return None;
    }
    Some((prio, target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_root_dot() {
        assert_eq!(strip_root_dot("example.com."), "example.com");
        assert_eq!(strip_root_dot("example.com"), "example.com");
        assert_eq!(strip_root_dot("."), "");
        assert_eq!(strip_root_dot(""), "");
    }

    #[test]
    fn test_owner_name() {
        assert_eq!(owner_name("www"), "www");
        assert_eq!(owner_name(" www.example.com. "), "www.example.com");
        assert_eq!(owner_name(""), "@");
        assert_eq!(owner_name("@"), "@");
        assert_eq!(owner_name("*.dev"), "*.dev");
        assert_eq!(owner_name("."), "@");
    }

    #[test]
    fn test_unquote_txt() {
        assert_eq!(unquote_txt("\"v=spf1 -all\""), "v=spf1 -all");
        assert_eq!(unquote_txt("\"\""), "");
        assert_eq!(unquote_txt("plain"), "plain");
        assert_eq!(unquote_txt("\"\"  \"\""), "");
        assert_eq!(unquote_txt("\""), "\"");
        assert_eq!(unquote_txt("\"open"), "\"open");
        // An escaped quote breaks the string split, only the outer pair goes.
        assert_eq!(unquote_txt("\"say \\\"hi\\\"\""), "say \\\"hi\\\"");
    }

    #[test]
    fn test_unquote_txt_joins_character_strings() {
        assert_eq!(unquote_txt("\"a\" \"b\""), "ab");
        assert_eq!(
            unquote_txt("\"v=DKIM1; k=rsa; \"  \"p=MIGfMA0\""),
            "v=DKIM1; k=rsa; p=MIGfMA0"
        );
        assert!(matches!(unquote_txt("\"only\""), Cow::Borrowed("only")));
    }

    #[test]
    fn test_split_mx() {
        assert_eq!(
            split_mx("10 mail.example.com."),
            Some((10, "mail.example.com"))
        );
        assert_eq!(split_mx("0   mx.example.net"), Some((0, "mx.example.net")));
        assert_eq!(split_mx("mail.example.com"), None);
        assert_eq!(split_mx("10"), None);
        assert_eq!(split_mx("70000 mail.example.com"), None);
    }
}
