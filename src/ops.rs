//! Config operations: checking, listing, key lookup, template generation, and
//! the `ConfigResult` enum that callers use to display results.

use std::fmt;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::EnvfigError;
use crate::infer::infer_kind;
use crate::schema::{FieldDescriptor, Schema};
use crate::types::{Kind, Value};

/// Result of a config operation. Returned to the caller for display.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigResult {
    /// The configuration loaded and validated.
    Checked { count: usize },
    /// A generated `.env.example` template.
    Template(String),
    /// Confirmation that a template was written to a file.
    TemplateWritten { path: PathBuf },
    /// A key's resolved value and its description.
    KeyValue {
        key: String,
        value: String,
        doc: Option<String>,
    },
    /// All resolved key-value pairs.
    Listing { entries: Vec<(String, String)> },
    /// An inferred schema rendered as TOML.
    Schema(String),
}

impl fmt::Display for ConfigResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigResult::Checked { count } => {
                write!(f, "Configuration valid ({count} keys)")
            }
            ConfigResult::Template(t) => write!(f, "{t}"),
            ConfigResult::TemplateWritten { path } => {
                write!(f, "Template written to {}", path.display())
            }
            ConfigResult::KeyValue { key, value, doc } => {
                if let Some(doc) = doc {
                    writeln!(f, "# {doc}")?;
                }
                write!(f, "{key}={value}")
            }
            ConfigResult::Listing { entries } => {
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{key}={value}")?;
                }
                Ok(())
            }
            ConfigResult::Schema(s) => write!(f, "{s}"),
        }
    }
}

/// List resolved values. With a schema, declared-but-absent keys show as `<not set>`.
pub fn list_values(config: &Config, schema: Option<&Schema>) -> ConfigResult {
    let entries = match schema {
        Some(schema) => schema
            .keys()
            .map(|key| {
                let display = match config.get(key) {
                    Some(v) => v.to_string(),
                    None => "<not set>".to_string(),
                };
                (key.to_string(), display)
            })
            .collect(),
        None => config
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect(),
    };
    ConfigResult::Listing { entries }
}

/// Look up one resolved value, with the schema description when there is one.
pub fn get_value(
    config: &Config,
    schema: Option<&Schema>,
    key: &str,
) -> Result<ConfigResult, EnvfigError> {
    let value = config
        .get(key)
        .ok_or_else(|| EnvfigError::KeyNotFound(key.into()))?;

    let doc = match schema.and_then(|s| s.get(key)) {
        Some(entry) => entry.normalize(key)?.description,
        None => None,
    };

    Ok(ConfigResult::KeyValue {
        key: key.into(),
        value: value.to_string(),
        doc,
    })
}

/// Generate a commented `.env.example` document from a schema.
///
/// Each field gets its description, a summary line (kind, required, choices,
/// bounds), and an assignment: `KEY=default`, or `KEY=` when there is no
/// default. Defaults are quoted where needed so they decode and infer back to
/// the same value.
pub fn generate_template(schema: &Schema) -> Result<String, EnvfigError> {
    let mut out = String::new();
    for (i, (key, descriptor)) in schema.descriptors()?.into_iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        if let Some(description) = &descriptor.description {
            for line in description.lines() {
                out.push_str(&format!("# {line}\n"));
            }
        }
        out.push_str(&format!("# {}\n", summarize(&descriptor)));
        let value = descriptor
            .default
            .as_ref()
            .map(render_default)
            .unwrap_or_default();
        out.push_str(&format!("{key}={value}\n"));
    }
    Ok(out)
}

fn summarize(d: &FieldDescriptor) -> String {
    let mut parts = vec![d.kind.to_string()];
    if d.required {
        parts.push("required".into());
    }
    if let Some(choices) = &d.choices {
        let list: Vec<String> = choices.iter().map(Value::to_string).collect();
        parts.push(format!("one of: {}", list.join(" | ")));
    }
    match d.kind {
        Kind::String => {
            let min = d.min_length.map(|n| n as f64);
            let max = d.max_length.map(|n| n as f64);
            if let Some(bounds) = bounds(min, max) {
                parts.push(format!("length {bounds}"));
            }
            if let Some(re) = &d.pattern {
                parts.push(format!("pattern /{}/", re.as_str()));
            }
        }
        Kind::Number => {
            if let Some(bounds) = bounds(d.min, d.max) {
                parts.push(format!("range {bounds}"));
            }
        }
        Kind::Boolean | Kind::Object => {}
    }
    parts.join(", ")
}

fn bounds(min: Option<f64>, max: Option<f64>) -> Option<String> {
    let fmt = |n: f64| Value::Number(n).to_string();
    match (min, max) {
        (Some(lo), Some(hi)) => Some(format!("{}..={}", fmt(lo), fmt(hi))),
        (Some(lo), None) => Some(format!(">= {}", fmt(lo))),
        (None, Some(hi)) => Some(format!("<= {}", fmt(hi))),
        (None, None) => None,
    }
}

fn render_default(value: &Value) -> String {
    match value {
        Value::String(s) => {
            let plain = !s.is_empty()
                && s.trim() == s
                && !s.starts_with(['"', '\'', '#'])
                && infer_kind(s, false) == Kind::String;
            if plain {
                s.clone()
            } else if s.contains('"') {
                format!("'{s}'")
            } else {
                format!("\"{s}\"")
            }
        }
        Value::Object(json) => format!("'{json}'"),
        other => other.to_string(),
    }
}
