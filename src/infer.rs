//! Type inference for raw values, and schema synthesis for schema-free loads.
//!
//! Inference order:
//!
//! 1. Quoted values are always strings. Quoting pins the type.
//! 2. `true` / `false`, in any case, are booleans. Nothing else is (`yes`,
//!    `1`, `on` stay strings or numbers).
//! 3. Finite numeric literals are numbers (see [`parse_number`]).
//! 4. Everything else, the empty string included, is a string.

use crate::resolve::RawEnv;
use crate::schema::{FieldDescriptor, Schema};
use crate::types::Kind;

/// Guess the natural kind of a raw value.
pub fn infer_kind(value: &str, quoted: bool) -> Kind {
    if quoted {
        return Kind::String;
    }
    if is_bool_literal(value) {
        return Kind::Boolean;
    }
    match parse_number(value) {
        Some(n) if n.is_finite() => Kind::Number,
        _ => Kind::String,
    }
}

/// Synthesize a schema where every key in `raw` is required with its inferred kind.
///
/// An empty source yields an empty schema.
pub fn infer_schema(raw: &RawEnv) -> Schema {
    raw.iter().fold(Schema::new(), |schema, (key, value)| {
        let kind = infer_kind(&value.value, value.quoted);
        schema.field(key, FieldDescriptor::new(kind).required())
    })
}

pub(crate) fn is_bool_literal(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false")
}

/// Parse a numeric literal with the same grammar as JavaScript's `Number()`.
///
/// Accepts surrounding whitespace, signed decimals with optional fraction and
/// exponent (`-1.5e3`, `.5`, `5.`), unsigned `0x`/`0o`/`0b` integers, and
/// `Infinity` with an optional sign. Rejects the empty string and Rust-only
/// spellings such as `inf` or `nan`.
pub fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    match s {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    if let Some(n) = parse_radix(s) {
        return n;
    }

    // Anything alphabetic besides an exponent marker would only be accepted by
    // Rust's float parser (`inf`, `NaN`, `infinity`).
    if s
        .bytes()
        .any(|b| b.is_ascii_alphabetic() && b != b'e' && b != b'E')
    {
        return None;
    }
    s.parse::<f64>().ok()
}

/// `Some(result)` when `s` carries a radix prefix, `None` otherwise.
fn parse_radix(s: &str) -> Option<Option<f64>> {
    let bytes = s.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };
    let digits = &s[2..];
    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return Some(None);
    }
    Some(u128::from_str_radix(digits, radix).ok().map(|n| n as f64))
}
