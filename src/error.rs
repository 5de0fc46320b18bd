use std::path::PathBuf;

use thiserror::Error;

use crate::types::{Kind, Value};

/// Every way a load can fail.
///
/// Variants up to [`UnsupportedType`](EnvfigError::UnsupportedType) are raised by
/// the validation engine and always name the offending field. The rest come from
/// schema documents, file access, and the operations layer.
#[derive(Debug, Error)]
#[cfg_attr(feature = "rich-errors", derive(miette::Diagnostic))]
pub enum EnvfigError {
    #[error("Missing required field '{field}'")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(
            code(envfig::missing_required),
            help("set it in the environment or the .env file, or give it a default")
        )
    )]
    MissingRequiredField { field: String },

    #[error("Invalid {expected} for '{field}': '{value}'")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(code(envfig::invalid_type), help("expected a numeric literal such as 42 or 1.5"))
    )]
    InvalidType {
        field: String,
        value: String,
        expected: Kind,
    },

    #[error("Invalid boolean for '{field}': '{value}' (expected true or false)")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(code(envfig::invalid_boolean), help("use true or false, in any case"))
    )]
    InvalidBoolean { field: String, value: String },

    #[error("Invalid JSON for '{field}': {reason}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(envfig::invalid_json)))]
    InvalidJson {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid value for '{field}': '{value}' is not one of [{}]", join_values(.choices))]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(envfig::invalid_enum)))]
    InvalidEnum {
        field: String,
        value: Value,
        choices: Vec<Value>,
    },

    #[error(
        "Invalid length for '{field}': {actual} characters (allowed {})",
        length_bounds(.min, .max)
    )]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(envfig::invalid_length)))]
    InvalidStringLength {
        field: String,
        value: String,
        actual: usize,
        min: Option<usize>,
        max: Option<usize>,
    },

    #[error("Invalid value for '{field}': '{value}' does not match /{pattern}/")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(envfig::invalid_pattern)))]
    InvalidPattern {
        field: String,
        value: String,
        pattern: String,
    },

    #[error(
        "Out of range for '{field}': {} (allowed {})",
        fmt_number(.value),
        range_bounds(.min, .max)
    )]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(envfig::invalid_range)))]
    InvalidNumberRange {
        field: String,
        value: f64,
        min: Option<f64>,
        max: Option<f64>,
    },

    #[error("Custom validation failed for '{field}': '{value}'")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(envfig::custom_validation)))]
    CustomValidation { field: String, value: Value },

    #[error("Unsupported type '{kind}' for '{field}'")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(
            code(envfig::unsupported_type),
            help("supported kinds are string, number, boolean and object")
        )
    )]
    UnsupportedType { field: String, kind: String },

    #[error("Invalid schema for '{field}': {reason}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(envfig::invalid_schema)))]
    InvalidSchema { field: String, reason: String },

    #[error("Failed to parse schema: {0}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(envfig::schema_parse)))]
    SchemaParse(String),

    #[error("Failed to read {}: {source}", .path.display())]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(envfig::io)))]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to extract typed config: {0}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(envfig::extract)))]
    Extract(#[source] serde_json::Error),

    #[error("Key not found: {0}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(envfig::key_not_found)))]
    KeyNotFound(String),

    #[error("No schema configured; call .schema() on the builder")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(envfig::no_schema)))]
    NoSchema,
}

impl EnvfigError {
    /// The field the error is about, when there is one.
    pub fn field(&self) -> Option<&str> {
        match self {
            EnvfigError::MissingRequiredField { field }
            | EnvfigError::InvalidType { field, .. }
            | EnvfigError::InvalidBoolean { field, .. }
            | EnvfigError::InvalidJson { field, .. }
            | EnvfigError::InvalidEnum { field, .. }
            | EnvfigError::InvalidStringLength { field, .. }
            | EnvfigError::InvalidPattern { field, .. }
            | EnvfigError::InvalidNumberRange { field, .. }
            | EnvfigError::CustomValidation { field, .. }
            | EnvfigError::UnsupportedType { field, .. }
            | EnvfigError::InvalidSchema { field, .. } => Some(field),
            EnvfigError::KeyNotFound(key) => Some(key),
            EnvfigError::SchemaParse(_)
            | EnvfigError::Io { .. }
            | EnvfigError::Extract(_)
            | EnvfigError::NoSchema => None,
        }
    }
}

fn join_values(values: &[Value]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn length_bounds(min: &Option<usize>, max: &Option<usize>) -> String {
    describe_bounds(min.map(|n| n as f64), max.map(|n| n as f64))
}

fn fmt_number(n: &f64) -> String {
    Value::Number(*n).to_string()
}

fn range_bounds(min: &Option<f64>, max: &Option<f64>) -> String {
    describe_bounds(*min, *max)
}

fn describe_bounds(min: Option<f64>, max: Option<f64>) -> String {
    let fmt = |n: f64| Value::Number(n).to_string();
    match (min, max) {
        (Some(lo), Some(hi)) => format!("{}..={}", fmt(lo), fmt(hi)),
        (Some(lo), None) => format!(">= {}", fmt(lo)),
        (None, Some(hi)) => format!("<= {}", fmt(hi)),
        (None, None) => "any".to_string(),
    }
}
