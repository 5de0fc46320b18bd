//! Coercion of raw strings into typed values.
//!
//! | Kind | Present raw value | Absent |
//! |------|-------------------|--------|
//! | `string` | unchanged | default |
//! | `number` | [`parse_number`], else `InvalidType` | default |
//! | `boolean` | `true`/`false` in any case, empty as absent, else `InvalidBoolean` | default |
//! | `object` | JSON parse, else `InvalidJson` | default, not re-parsed |
//!
//! Defaults are trusted as written. Presence of required fields is checked
//! before coercion, so an absent value here only ever means "optional". An
//! empty boolean (`DEBUG=`) is the one present value treated as absent; for a
//! required field with no default it is reported as missing.

use crate::error::EnvfigError;
use crate::infer::parse_number;
use crate::schema::FieldDescriptor;
use crate::types::{Kind, Value};

/// Coerce `raw` for `field`. `Ok(None)` means absent with no default.
pub fn coerce(
    descriptor: &FieldDescriptor,
    field: &str,
    raw: Option<&str>,
) -> Result<Option<Value>, EnvfigError> {
    let Some(raw) = raw else {
        return Ok(descriptor.default.clone());
    };

    let value = match descriptor.kind {
        Kind::String => Value::String(raw.to_string()),
        Kind::Number => match parse_number(raw) {
            Some(n) => Value::Number(n),
            None => {
                return Err(EnvfigError::InvalidType {
                    field: field.to_string(),
                    value: raw.to_string(),
                    expected: Kind::Number,
                });
            }
        },
        Kind::Boolean => {
            if raw.is_empty() {
                if descriptor.required && descriptor.default.is_none() {
                    return Err(EnvfigError::MissingRequiredField {
                        field: field.to_string(),
                    });
                }
                return Ok(descriptor.default.clone());
            }
            if raw.eq_ignore_ascii_case("true") {
                Value::Boolean(true)
            } else if raw.eq_ignore_ascii_case("false") {
                Value::Boolean(false)
            } else {
                return Err(EnvfigError::InvalidBoolean {
                    field: field.to_string(),
                    value: raw.to_string(),
                });
            }
        }
        Kind::Object => match serde_json::from_str(raw) {
            Ok(json) => Value::Object(json),
            Err(e) => {
                return Err(EnvfigError::InvalidJson {
                    field: field.to_string(),
                    value: raw.to_string(),
                    reason: e.to_string(),
                });
            }
        },
    };
    Ok(Some(value))
}
