//! Line decoding for `.env` files.
//!
//! The format is deliberately small:
//!
//! ```text
//! # comment
//! HOST=localhost
//! GREETING="hello world"
//! TOKEN='abc=def'
//! ```
//!
//! Each line is split at the first `=`. Key and value are trimmed, then one
//! layer of matching quotes is removed from the value. There are no escape
//! sequences, no multi-line values, and no variable expansion. Lines without
//! `=` are ignored.

use crate::resolve::{RawEnv, RawValue};

/// Decode one line into a key and raw value.
///
/// Returns `None` for blank lines, comments, lines without `=`, and lines
/// whose key is empty.
pub fn decode_line(line: &str) -> Option<(String, RawValue)> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    let (key, rest) = trimmed.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }

    let (value, quoted) = strip_quotes(rest.trim());
    Some((
        key.to_string(),
        RawValue {
            value: value.to_string(),
            quoted,
        },
    ))
}

/// Remove one layer of matching `"` or `'` quotes.
fn strip_quotes(value: &str) -> (&str, bool) {
    for quote in ['"', '\''] {
        if value.len() >= 2
            && let Some(inner) = value
                .strip_prefix(quote)
                .and_then(|v| v.strip_suffix(quote))
        {
            return (inner, true);
        }
    }
    (value, false)
}

/// Decode a whole `.env` document. A repeated key keeps its last value.
///
/// A leading byte order mark is dropped.
pub fn parse(content: &str) -> RawEnv {
    content
        .strip_prefix('\u{feff}')
        .unwrap_or(content)
        .lines()
        .filter_map(decode_line)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn decoded(line: &str) -> (String, String, bool) {
        let (key, raw) = decode_line(line).unwrap();
        (key, raw.value, raw.quoted)
    }

    #[test_case("" ; "empty")]
    #[test_case("   \t " ; "whitespace only")]
    #[test_case("# PORT=3000" ; "comment")]
    #[test_case("   # indented comment" ; "indented comment")]
    #[test_case("NO_EQUALS_SIGN" ; "no equals")]
    #[test_case("=value" ; "empty key")]
    fn ignored_lines(line: &str) {
        assert!(decode_line(line).is_none());
    }

    #[test]
    fn simple_pair() {
        assert_eq!(decoded("PORT=3000"), ("PORT".into(), "3000".into(), false));
    }

    #[test]
    fn key_and_value_trimmed() {
        assert_eq!(
            decoded("  HOST =  localhost  "),
            ("HOST".into(), "localhost".into(), false)
        );
    }

    #[test]
    fn splits_at_first_equals() {
        assert_eq!(
            decoded("URL=postgres://u:p@h/db?a=b"),
            ("URL".into(), "postgres://u:p@h/db?a=b".into(), false)
        );
    }

    #[test]
    fn double_quotes_stripped() {
        assert_eq!(
            decoded(r#"STRING_VAL="hello world""#),
            ("STRING_VAL".into(), "hello world".into(), true)
        );
    }

    #[test]
    fn single_quotes_stripped() {
        assert_eq!(decoded("NAME='svc'"), ("NAME".into(), "svc".into(), true));
    }

    #[test]
    fn only_one_layer_stripped() {
        assert_eq!(
            decoded(r#"NESTED="'inner'""#),
            ("NESTED".into(), "'inner'".into(), true)
        );
    }

    #[test]
    fn mismatched_quotes_kept() {
        assert_eq!(
            decoded(r#"MIXED="oops'"#),
            ("MIXED".into(), r#""oops'"#.into(), false)
        );
    }

    #[test]
    fn lone_quote_kept() {
        assert_eq!(decoded(r#"Q=""#), ("Q".into(), "\"".into(), false));
    }

    #[test]
    fn empty_quotes_give_empty_quoted_value() {
        assert_eq!(decoded(r#"EMPTY="""#), ("EMPTY".into(), "".into(), true));
    }

    #[test]
    fn no_escape_processing() {
        assert_eq!(
            decoded(r#"PATHLIKE="a\nb""#),
            ("PATHLIKE".into(), r"a\nb".into(), true)
        );
    }

    #[test]
    fn empty_value() {
        assert_eq!(decoded("EMPTY="), ("EMPTY".into(), "".into(), false));
    }

    #[test]
    fn parse_document_with_crlf() {
        let raw = parse("# header\r\nPORT=3000\r\n\r\nDEBUG=true\r\n");
        assert_eq!(raw.len(), 2);
        assert_eq!(raw.get("PORT").unwrap().value, "3000");
        assert_eq!(raw.get("DEBUG").unwrap().value, "true");
    }

    #[test]
    fn parse_last_duplicate_wins() {
        let raw = parse("PORT=1\nPORT=2\n");
        assert_eq!(raw.len(), 1);
        assert_eq!(raw.get("PORT").unwrap().value, "2");
    }

    #[test]
    fn parse_strips_byte_order_mark() {
        let raw = parse("\u{feff}PORT=3000\nHOST=x\n");
        let keys: Vec<&str> = raw.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["PORT", "HOST"]);
    }

    #[test]
    fn parse_empty_document() {
        assert!(parse("").is_empty());
        assert!(parse("# only comments\n\n").is_empty());
    }
}
