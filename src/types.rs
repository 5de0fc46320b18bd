//! Shared value types: field kinds, typed values, file discovery, and actions.
//!
//! # Kinds and values
//!
//! Every field has exactly one [`Kind`]. Coercion turns a raw string into a
//! [`Value`] of that kind:
//!
//! | Kind | Raw | Value |
//! |------|-----|-------|
//! | `string` | `localhost` | `Value::String("localhost")` |
//! | `number` | `3000` | `Value::Number(3000.0)` |
//! | `boolean` | `TRUE` | `Value::Boolean(true)` |
//! | `object` | `{"a":1}` | `Value::Object(json!({"a": 1}))` |
//!
//! `object` holds any JSON document, arrays and scalars included.
//!
//! # Discovery
//!
//! [`SearchPath`] lists where to look for the `.env` file, in
//! **priority-ascending** order: the last directory that contains the file
//! wins. Common patterns:
//!
//! ```ignore
//! // Project-local file only (the default)
//! .search_paths(vec![SearchPath::Cwd])
//!
//! // Nearest .env walking up to the repository root
//! .search_paths(vec![SearchPath::Ancestors(Boundary::Marker(".git"))])
//!
//! // A per-user file, overridden by a project file when one exists
//! .search_paths(vec![SearchPath::Platform, SearchPath::Cwd])
//! ```

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize, Serializer};

/// The type a field is coerced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    String,
    Number,
    Boolean,
    Object,
}

impl Kind {
    /// Look up a kind by its schema name, ignoring case.
    pub fn from_name(name: &str) -> Option<Kind> {
        match name.to_ascii_lowercase().as_str() {
            "string" => Some(Kind::String),
            "number" => Some(Kind::Number),
            "boolean" => Some(Kind::Boolean),
            "object" => Some(Kind::Object),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Number => "number",
            Kind::Boolean => "boolean",
            Kind::Object => "object",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A coerced configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Number(f64),
    Boolean(bool),
    Object(serde_json::Value),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::String(_) => Kind::String,
            Value::Number(_) => Kind::Number,
            Value::Boolean(_) => Kind::Boolean,
            Value::Object(_) => Kind::Object,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&serde_json::Value> {
        match self {
            Value::Object(v) => Some(v),
            _ => None,
        }
    }

    /// Convert to a JSON value. Integral numbers become JSON integers.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Number(n) => match integral(*n) {
                Some(i) => serde_json::Value::from(i),
                None => serde_json::Number::from_f64(*n)
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null),
            },
            Value::Boolean(b) => serde_json::Value::Bool(*b),
            Value::Object(v) => v.clone(),
        }
    }
}

/// `Some(i)` when `n` is a whole number that an `i64` represents exactly.
fn integral(n: f64) -> Option<i64> {
    const SAFE: f64 = 9_007_199_254_740_991.0;
    (n.is_finite() && n.fract() == 0.0 && n.abs() <= SAFE).then_some(n as i64)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Number(n) => {
                if let Some(i) = integral(*n) {
                    write!(f, "{i}")
                } else if n.is_nan() {
                    f.write_str("NaN")
                } else if n.is_infinite() {
                    f.write_str(if *n > 0.0 { "Infinity" } else { "-Infinity" })
                } else {
                    write!(f, "{n}")
                }
            }
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Object(v) => write!(f, "{v}"),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::String(s) => serializer.serialize_str(s),
            Value::Number(n) => match integral(*n) {
                Some(i) => serializer.serialize_i64(i),
                None => serializer.serialize_f64(*n),
            },
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Object(v) => v.serialize(serializer),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

impl From<u16> for Value {
    fn from(n: u16) -> Self {
        Value::Number(n.into())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Object(v)
    }
}

/// Where to stop when walking up from the working directory.
#[derive(Debug, Clone, PartialEq)]
pub enum Boundary {
    /// Walk all the way to the filesystem root.
    Root,
    /// Stop (inclusive) at the first directory containing this file or directory.
    Marker(&'static str),
}

/// Where to search for the `.env` file.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchPath {
    /// Platform config directory for the app name (XDG on Linux, ~/Library/Application Support on macOS).
    Platform,
    /// A subdirectory under the user's home directory, e.g. `Home(".myapp")`.
    Home(&'static str),
    /// Current working directory.
    Cwd,
    /// An explicit directory.
    Path(PathBuf),
    /// Every directory from the boundary down to the working directory.
    Ancestors(Boundary),
}

/// An operation on the resolved configuration, independent of any CLI framework.
/// The CLI layer converts parsed clap args into this.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigAction {
    /// Load and validate, reporting how many keys resolved.
    Check,
    /// Show every resolved key.
    List,
    /// Show one key.
    Get { key: String },
    /// Generate a commented `.env.example` from the schema.
    Gen { output: Option<PathBuf> },
    /// Infer a schema from the `.env` file and print it as TOML.
    Infer,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kind_names_case_insensitive() {
        assert_eq!(Kind::from_name("Number"), Some(Kind::Number));
        assert_eq!(Kind::from_name("BOOLEAN"), Some(Kind::Boolean));
        assert_eq!(Kind::from_name("array"), None);
    }

    #[test]
    fn integral_numbers_display_without_fraction() {
        assert_eq!(Value::Number(3000.0).to_string(), "3000");
        assert_eq!(Value::Number(-5.0).to_string(), "-5");
        assert_eq!(Value::Number(1.5).to_string(), "1.5");
        assert_eq!(Value::Number(f64::INFINITY).to_string(), "Infinity");
    }

    #[test]
    fn object_displays_compact_json() {
        let v = Value::Object(json!({"a": 1}));
        assert_eq!(v.to_string(), r#"{"a":1}"#);
    }

    #[test]
    fn serializes_integral_number_as_integer() {
        let out = serde_json::to_string(&Value::Number(42.0)).unwrap();
        assert_eq!(out, "42");
        let out = serde_json::to_string(&Value::Number(0.25)).unwrap();
        assert_eq!(out, "0.25");
    }

    #[test]
    fn object_equality_is_structural() {
        assert_eq!(
            Value::Object(json!({"a": [1, 2], "b": null})),
            Value::Object(json!({"b": null, "a": [1, 2]}))
        );
    }

    #[test]
    fn kind_of_value() {
        assert_eq!(Value::from("x").kind(), Kind::String);
        assert_eq!(Value::from(3).kind(), Kind::Number);
        assert_eq!(Value::from(true).kind(), Kind::Boolean);
        assert_eq!(Value::from(json!([])).kind(), Kind::Object);
    }
}
