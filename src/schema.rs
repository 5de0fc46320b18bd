//! Schema model: shorthand entries, canonical field descriptors, and normalization.
//!
//! A schema maps keys to [`SchemaEntry`] values. Entries come in three shapes,
//! mirroring how people write schemas by hand:
//!
//! | Shape | Example (JSON) | Normalized |
//! |-------|----------------|------------|
//! | Literal | `"localhost"`, `3000`, `true` | kind of the literal, literal as default |
//! | Required | `{"required": true}` | `string`, required |
//! | Required with choices | `{"required": true, "choices": ["a", "b"]}` | kind of the first choice |
//! | Descriptor | `{"kind": "number", "min": 1}` | as written |
//!
//! [`SchemaEntry::normalize`] is the only place that looks at the shape. Every
//! later stage works on a [`FieldDescriptor`].
//!
//! A field is *guaranteed* (never absent from the result) when it is required
//! or carries a default; see [`FieldDescriptor::is_guaranteed`].

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use regex::Regex;
use serde::Deserialize;

use crate::error::EnvfigError;
use crate::types::{Kind, Value};

/// A user predicate, tagged with the kind of value it accepts.
///
/// A validator whose kind differs from the field's kind is never called.
#[derive(Clone)]
pub enum Validator {
    String(Arc<dyn Fn(&str) -> bool + Send + Sync>),
    Number(Arc<dyn Fn(f64) -> bool + Send + Sync>),
    Boolean(Arc<dyn Fn(bool) -> bool + Send + Sync>),
    Object(Arc<dyn Fn(&serde_json::Value) -> bool + Send + Sync>),
}

impl Validator {
    pub fn string<F>(f: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Validator::String(Arc::new(f))
    }

    pub fn number<F>(f: F) -> Self
    where
        F: Fn(f64) -> bool + Send + Sync + 'static,
    {
        Validator::Number(Arc::new(f))
    }

    pub fn boolean<F>(f: F) -> Self
    where
        F: Fn(bool) -> bool + Send + Sync + 'static,
    {
        Validator::Boolean(Arc::new(f))
    }

    pub fn object<F>(f: F) -> Self
    where
        F: Fn(&serde_json::Value) -> bool + Send + Sync + 'static,
    {
        Validator::Object(Arc::new(f))
    }

    pub fn kind(&self) -> Kind {
        match self {
            Validator::String(_) => Kind::String,
            Validator::Number(_) => Kind::Number,
            Validator::Boolean(_) => Kind::Boolean,
            Validator::Object(_) => Kind::Object,
        }
    }

    /// Run the predicate. `None` when it does not apply to this value's kind.
    pub(crate) fn check(&self, value: &Value) -> Option<bool> {
        match (self, value) {
            (Validator::String(f), Value::String(s)) => Some(f(s)),
            (Validator::Number(f), Value::Number(n)) => Some(f(*n)),
            (Validator::Boolean(f), Value::Boolean(b)) => Some(f(*b)),
            (Validator::Object(f), Value::Object(v)) => Some(f(v)),
            _ => None,
        }
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validator({})", self.kind())
    }
}

/// The canonical description of one field.
///
/// String constraints (`min_length`, `max_length`, `pattern`) and number
/// constraints (`min`, `max`) are only applied to fields of that kind.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub kind: Kind,
    pub default: Option<Value>,
    pub required: bool,
    pub choices: Option<Vec<Value>>,
    pub description: Option<String>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<Regex>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub validator: Option<Validator>,
}

impl FieldDescriptor {
    pub fn new(kind: Kind) -> Self {
        Self {
            kind,
            default: None,
            required: false,
            choices: None,
            description: None,
            min_length: None,
            max_length: None,
            pattern: None,
            min: None,
            max: None,
            validator: None,
        }
    }

    pub fn string() -> Self {
        Self::new(Kind::String)
    }

    pub fn number() -> Self {
        Self::new(Kind::Number)
    }

    pub fn boolean() -> Self {
        Self::new(Kind::Boolean)
    }

    pub fn object() -> Self {
        Self::new(Kind::Object)
    }

    /// Value used when the key is absent from every source.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Fail the load when the key is absent and there is no default.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Restrict the coerced value to one of `choices`.
    pub fn choices<I, V>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.choices = Some(choices.into_iter().map(Into::into).collect());
        self
    }

    /// Human description, used in generated templates.
    pub fn describe(mut self, text: &str) -> Self {
        self.description = Some(text.to_string());
        self
    }

    pub fn min_length(mut self, n: usize) -> Self {
        self.min_length = Some(n);
        self
    }

    pub fn max_length(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }

    /// The value must contain a match for `pattern` (add `^...$` to anchor it).
    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Inclusive lower bound.
    pub fn min(mut self, n: f64) -> Self {
        self.min = Some(n);
        self
    }

    /// Inclusive upper bound.
    pub fn max(mut self, n: f64) -> Self {
        self.max = Some(n);
        self
    }

    pub fn validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Whether the field always has a value after a successful load.
    pub fn is_guaranteed(&self) -> bool {
        self.required || self.default.is_some()
    }

    /// Render as a JSON descriptor document (the validator is not representable).
    pub fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        map.insert("kind".into(), self.kind.as_str().into());
        if self.required {
            map.insert("required".into(), true.into());
        }
        if let Some(default) = &self.default {
            map.insert("default".into(), default.to_json());
        }
        if let Some(choices) = &self.choices {
            let list = choices.iter().map(Value::to_json).collect();
            map.insert("choices".into(), serde_json::Value::Array(list));
        }
        if let Some(description) = &self.description {
            map.insert("description".into(), description.as_str().into());
        }
        if let Some(n) = self.min_length {
            map.insert("minLength".into(), n.into());
        }
        if let Some(n) = self.max_length {
            map.insert("maxLength".into(), n.into());
        }
        if let Some(re) = &self.pattern {
            map.insert("pattern".into(), re.as_str().into());
        }
        if let Some(n) = self.min {
            map.insert("min".into(), Value::Number(n).to_json());
        }
        if let Some(n) = self.max {
            map.insert("max".into(), Value::Number(n).to_json());
        }
        serde_json::Value::Object(map)
    }
}

/// One schema entry, before normalization.
#[derive(Debug, Clone)]
pub enum SchemaEntry {
    /// A bare string, number, or boolean: its kind and its default.
    Literal(Value),
    /// `{required, choices}` without an explicit kind.
    Required {
        required: bool,
        choices: Option<Vec<Value>>,
    },
    /// A full descriptor with an explicit kind.
    Descriptor(FieldDescriptor),
}

impl SchemaEntry {
    /// A required string field.
    pub fn required() -> Self {
        SchemaEntry::Required {
            required: true,
            choices: None,
        }
    }

    /// A required field restricted to `choices`; the kind follows the first choice.
    pub fn one_of<I, V>(choices: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        SchemaEntry::Required {
            required: true,
            choices: Some(choices.into_iter().map(Into::into).collect()),
        }
    }

    /// Reduce any entry shape to a canonical descriptor.
    pub fn normalize(&self, field: &str) -> Result<FieldDescriptor, EnvfigError> {
        match self {
            SchemaEntry::Literal(value) => match value {
                Value::Object(_) => Err(unsupported(field, "object literal")),
                literal => Ok(FieldDescriptor::new(literal.kind()).default(literal.clone())),
            },
            SchemaEntry::Required { required, choices } => {
                let kind = match choices.as_deref() {
                    Some([]) => return Err(invalid(field, "choices must not be empty")),
                    Some([first, ..]) => first.kind(),
                    None => Kind::String,
                };
                check_choice_kinds(field, kind, choices.as_deref())?;
                let mut descriptor = FieldDescriptor::new(kind);
                descriptor.required = *required;
                descriptor.choices = choices.clone();
                Ok(descriptor)
            }
            SchemaEntry::Descriptor(descriptor) => {
                if let Some(default) = &descriptor.default
                    && default.kind() != descriptor.kind
                {
                    return Err(invalid(
                        field,
                        &format!("default must be a {}", descriptor.kind),
                    ));
                }
                if descriptor.choices.as_ref().is_some_and(Vec::is_empty) {
                    return Err(invalid(field, "choices must not be empty"));
                }
                check_choice_kinds(field, descriptor.kind, descriptor.choices.as_deref())?;
                Ok(descriptor.clone())
            }
        }
    }

    /// Interpret one JSON schema value.
    ///
    /// Objects with `kind` (or `type`) are descriptors; objects with `required`
    /// or `choices` are shorthand; strings, numbers and booleans are literals.
    pub fn from_json(field: &str, json: serde_json::Value) -> Result<Self, EnvfigError> {
        match json {
            serde_json::Value::String(s) => Ok(SchemaEntry::Literal(Value::String(s))),
            serde_json::Value::Bool(b) => Ok(SchemaEntry::Literal(Value::Boolean(b))),
            serde_json::Value::Number(n) => n
                .as_f64()
                .map(|n| SchemaEntry::Literal(Value::Number(n)))
                .ok_or_else(|| invalid(field, "number out of range")),
            serde_json::Value::Null => Err(unsupported(field, "null")),
            serde_json::Value::Array(_) => Err(unsupported(field, "array literal")),
            serde_json::Value::Object(map) => {
                if map.contains_key("kind") || map.contains_key("type") {
                    let raw: RawDescriptor =
                        serde_json::from_value(serde_json::Value::Object(map))
                            .map_err(|e| invalid(field, &e.to_string()))?;
                    raw.into_descriptor(field).map(SchemaEntry::Descriptor)
                } else if map.contains_key("required") || map.contains_key("choices") {
                    let raw: RawShorthand =
                        serde_json::from_value(serde_json::Value::Object(map))
                            .map_err(|e| invalid(field, &e.to_string()))?;
                    let choices = raw
                        .choices
                        .map(|list| {
                            list.into_iter()
                                .map(|c| literal_from_json(field, c))
                                .collect::<Result<Vec<_>, _>>()
                        })
                        .transpose()?;
                    Ok(SchemaEntry::Required {
                        required: raw.required,
                        choices,
                    })
                } else {
                    Err(unsupported(field, "object without kind"))
                }
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct RawDescriptor {
    #[serde(alias = "type")]
    kind: String,
    default: Option<serde_json::Value>,
    #[serde(default)]
    required: bool,
    choices: Option<Vec<serde_json::Value>>,
    description: Option<String>,
    min_length: Option<usize>,
    max_length: Option<usize>,
    pattern: Option<String>,
    min: Option<f64>,
    max: Option<f64>,
}

impl RawDescriptor {
    fn into_descriptor(self, field: &str) -> Result<FieldDescriptor, EnvfigError> {
        let kind = Kind::from_name(&self.kind).ok_or_else(|| unsupported(field, &self.kind))?;

        let default = self
            .default
            .map(|json| {
                value_of_kind(kind, json)
                    .ok_or_else(|| invalid(field, &format!("default must be a {kind}")))
            })
            .transpose()?;

        let choices = self
            .choices
            .map(|list| {
                list.into_iter()
                    .map(|json| {
                        value_of_kind(kind, json)
                            .ok_or_else(|| invalid(field, &format!("choices must be {kind} values")))
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        let pattern = self
            .pattern
            .map(|p| Regex::new(&p).map_err(|e| invalid(field, &e.to_string())))
            .transpose()?;

        Ok(FieldDescriptor {
            kind,
            default,
            required: self.required,
            choices,
            description: self.description,
            min_length: self.min_length,
            max_length: self.max_length,
            pattern,
            min: self.min,
            max: self.max,
            validator: None,
        })
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawShorthand {
    #[serde(default)]
    required: bool,
    choices: Option<Vec<serde_json::Value>>,
}

/// Convert a JSON value whose kind is dictated by the descriptor.
fn value_of_kind(kind: Kind, json: serde_json::Value) -> Option<Value> {
    match (kind, json) {
        (Kind::String, serde_json::Value::String(s)) => Some(Value::String(s)),
        (Kind::Number, serde_json::Value::Number(n)) => n.as_f64().map(Value::Number),
        (Kind::Boolean, serde_json::Value::Bool(b)) => Some(Value::Boolean(b)),
        (Kind::Object, json) => Some(Value::Object(json)),
        _ => None,
    }
}

/// Convert a JSON value whose kind is taken from the value itself.
fn literal_from_json(field: &str, json: serde_json::Value) -> Result<Value, EnvfigError> {
    match json {
        serde_json::Value::Null => Err(invalid(field, "choices must not contain null")),
        serde_json::Value::String(s) => Ok(Value::String(s)),
        serde_json::Value::Bool(b) => Ok(Value::Boolean(b)),
        serde_json::Value::Number(n) => n
            .as_f64()
            .map(Value::Number)
            .ok_or_else(|| invalid(field, "number out of range")),
        other => Ok(Value::Object(other)),
    }
}

/// Every choice must be a value of the field's kind.
fn check_choice_kinds(
    field: &str,
    kind: Kind,
    choices: Option<&[Value]>,
) -> Result<(), EnvfigError> {
    if choices.unwrap_or_default().iter().any(|c| c.kind() != kind) {
        return Err(invalid(field, &format!("choices must be {kind} values")));
    }
    Ok(())
}

fn invalid(field: &str, reason: &str) -> EnvfigError {
    EnvfigError::InvalidSchema {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

fn unsupported(field: &str, kind: &str) -> EnvfigError {
    EnvfigError::UnsupportedType {
        field: field.to_string(),
        kind: kind.to_string(),
    }
}

impl From<&str> for SchemaEntry {
    fn from(s: &str) -> Self {
        SchemaEntry::Literal(Value::from(s))
    }
}

impl From<String> for SchemaEntry {
    fn from(s: String) -> Self {
        SchemaEntry::Literal(Value::from(s))
    }
}

impl From<f64> for SchemaEntry {
    fn from(n: f64) -> Self {
        SchemaEntry::Literal(Value::from(n))
    }
}

impl From<i64> for SchemaEntry {
    fn from(n: i64) -> Self {
        SchemaEntry::Literal(Value::from(n))
    }
}

impl From<i32> for SchemaEntry {
    fn from(n: i32) -> Self {
        SchemaEntry::Literal(Value::from(n))
    }
}

impl From<u16> for SchemaEntry {
    fn from(n: u16) -> Self {
        SchemaEntry::Literal(Value::from(n))
    }
}

impl From<bool> for SchemaEntry {
    fn from(b: bool) -> Self {
        SchemaEntry::Literal(Value::from(b))
    }
}

impl From<FieldDescriptor> for SchemaEntry {
    fn from(d: FieldDescriptor) -> Self {
        SchemaEntry::Descriptor(d)
    }
}

/// An ordered set of schema entries. Fields are processed in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    entries: IndexMap<String, SchemaEntry>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field. A repeated key replaces the earlier entry in place.
    pub fn field(mut self, key: impl Into<String>, entry: impl Into<SchemaEntry>) -> Self {
        self.insert(key, entry);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, entry: impl Into<SchemaEntry>) {
        self.entries.insert(key.into(), entry.into());
    }

    pub fn get(&self, key: &str) -> Option<&SchemaEntry> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Normalize every entry, in order.
    pub fn descriptors(&self) -> Result<Vec<(&str, FieldDescriptor)>, EnvfigError> {
        self.iter()
            .map(|(key, entry)| entry.normalize(key).map(|d| (key, d)))
            .collect()
    }

    /// Parse a schema from a JSON object document.
    pub fn from_json_str(content: &str) -> Result<Self, EnvfigError> {
        let json: serde_json::Value =
            serde_json::from_str(content).map_err(|e| EnvfigError::SchemaParse(e.to_string()))?;
        Self::from_json_value(json)
    }

    /// Parse a schema from a TOML document. Tables are read as JSON objects.
    pub fn from_toml_str(content: &str) -> Result<Self, EnvfigError> {
        let table: toml::Table =
            toml::from_str(content).map_err(|e| EnvfigError::SchemaParse(e.to_string()))?;
        let json =
            serde_json::to_value(table).map_err(|e| EnvfigError::SchemaParse(e.to_string()))?;
        Self::from_json_value(json)
    }

    pub fn from_json_value(json: serde_json::Value) -> Result<Self, EnvfigError> {
        let serde_json::Value::Object(map) = json else {
            return Err(EnvfigError::SchemaParse(
                "schema root must be an object".into(),
            ));
        };
        let mut schema = Schema::new();
        for (key, value) in map {
            let entry = SchemaEntry::from_json(&key, value)?;
            schema.insert(key, entry);
        }
        Ok(schema)
    }

    /// Render the normalized schema as a TOML document, one table per field.
    pub fn to_toml_string(&self) -> Result<String, EnvfigError> {
        let mut root = serde_json::Map::new();
        for (key, descriptor) in self.descriptors()? {
            root.insert(key.to_string(), descriptor.to_json());
        }
        toml::to_string(&serde_json::Value::Object(root))
            .map_err(|e| EnvfigError::SchemaParse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // --- normalize ---

    #[test]
    fn string_literal_becomes_default() {
        let d = SchemaEntry::from("localhost").normalize("HOST").unwrap();
        assert_eq!(d.kind, Kind::String);
        assert_eq!(d.default, Some(Value::from("localhost")));
        assert!(!d.required);
        assert!(d.is_guaranteed());
    }

    #[test]
    fn number_literal_becomes_default() {
        let d = SchemaEntry::from(3000).normalize("PORT").unwrap();
        assert_eq!(d.kind, Kind::Number);
        assert_eq!(d.default, Some(Value::Number(3000.0)));
    }

    #[test]
    fn boolean_literal_becomes_default() {
        let d = SchemaEntry::from(false).normalize("DEBUG").unwrap();
        assert_eq!(d.kind, Kind::Boolean);
        assert_eq!(d.default, Some(Value::Boolean(false)));
    }

    #[test]
    fn bare_required_is_string() {
        let d = SchemaEntry::required().normalize("NAME").unwrap();
        assert_eq!(d.kind, Kind::String);
        assert!(d.required);
        assert!(d.default.is_none());
    }

    #[test]
    fn required_with_choices_takes_first_choice_kind() {
        let d = SchemaEntry::one_of([1, 2, 3]).normalize("LEVEL").unwrap();
        assert_eq!(d.kind, Kind::Number);
        assert_eq!(d.choices.unwrap().len(), 3);
    }

    #[test]
    fn empty_choices_rejected() {
        let entry = SchemaEntry::Required {
            required: true,
            choices: Some(vec![]),
        };
        let err = entry.normalize("X").unwrap_err();
        assert!(matches!(err, EnvfigError::InvalidSchema { .. }));
    }

    #[test]
    fn optional_shorthand_without_default_not_guaranteed() {
        let entry = SchemaEntry::Required {
            required: false,
            choices: None,
        };
        assert!(!entry.normalize("X").unwrap().is_guaranteed());
    }

    #[test]
    fn descriptor_passes_through() {
        let d = SchemaEntry::from(FieldDescriptor::number().min(1.0).max(10.0))
            .normalize("N")
            .unwrap();
        assert_eq!(d.kind, Kind::Number);
        assert_eq!(d.min, Some(1.0));
        assert_eq!(d.max, Some(10.0));
        assert!(!d.is_guaranteed());
    }

    #[test]
    fn descriptor_default_of_wrong_kind_rejected() {
        let err = SchemaEntry::from(FieldDescriptor::number().default("x"))
            .normalize("N")
            .unwrap_err();
        assert!(matches!(err, EnvfigError::InvalidSchema { .. }));
    }

    #[test]
    fn descriptor_choices_of_wrong_kind_rejected() {
        let err = SchemaEntry::from(FieldDescriptor::number().choices(["1", "2"]))
            .normalize("LEVEL")
            .unwrap_err();
        match err {
            EnvfigError::InvalidSchema { field, reason } => {
                assert_eq!(field, "LEVEL");
                assert_eq!(reason, "choices must be number values");
            }
            other => panic!("Expected InvalidSchema, got: {other:?}"),
        }
    }

    #[test]
    fn programmatic_and_json_choices_agree() {
        let doc = r#"{"LEVEL": {"kind": "number", "choices": ["1", "2"]}}"#;
        let json = Schema::from_json_str(doc).unwrap_err();
        let programmatic = SchemaEntry::from(FieldDescriptor::number().choices(["1", "2"]))
            .normalize("LEVEL")
            .unwrap_err();
        assert_eq!(json.to_string(), programmatic.to_string());
    }

    #[test]
    fn shorthand_mixed_choice_kinds_rejected() {
        let err = SchemaEntry::one_of([Value::from("a"), Value::from(1)])
            .normalize("MODE")
            .unwrap_err();
        assert!(matches!(err, EnvfigError::InvalidSchema { .. }));
    }

    #[test]
    fn object_literal_unsupported() {
        let err = SchemaEntry::Literal(Value::Object(json!({})))
            .normalize("CFG")
            .unwrap_err();
        assert!(matches!(err, EnvfigError::UnsupportedType { .. }));
    }

    #[test]
    fn validator_only_applies_to_its_kind() {
        let v = Validator::string(|s| s.starts_with("sk-"));
        assert_eq!(v.check(&Value::from("sk-123")), Some(true));
        assert_eq!(v.check(&Value::from("pk-123")), Some(false));
        assert_eq!(v.check(&Value::from(1)), None);
    }

    // --- JSON / TOML documents ---

    #[test]
    fn json_document_all_shapes() {
        let schema = Schema::from_json_str(
            r#"{
                "HOST": "localhost",
                "PORT": 3000,
                "NAME": {"required": true},
                "MODE": {"required": true, "choices": ["a", "b"]},
                "CFG": {"type": "object", "required": true}
            }"#,
        )
        .unwrap();
        let keys: Vec<&str> = schema.keys().collect();
        assert_eq!(keys, vec!["HOST", "PORT", "NAME", "MODE", "CFG"]);

        let descriptors = schema.descriptors().unwrap();
        assert_eq!(descriptors[0].1.kind, Kind::String);
        assert_eq!(descriptors[1].1.kind, Kind::Number);
        assert_eq!(descriptors[2].1.kind, Kind::String);
        assert!(descriptors[2].1.required);
        assert_eq!(descriptors[3].1.choices.as_ref().unwrap().len(), 2);
        assert_eq!(descriptors[4].1.kind, Kind::Object);
    }

    #[test]
    fn json_descriptor_constraints() {
        let schema = Schema::from_json_str(
            r#"{"TOKEN": {"kind": "string", "minLength": 8, "maxLength": 64, "pattern": "^sk-"}}"#,
        )
        .unwrap();
        let d = schema.get("TOKEN").unwrap().normalize("TOKEN").unwrap();
        assert_eq!(d.min_length, Some(8));
        assert_eq!(d.max_length, Some(64));
        assert_eq!(d.pattern.unwrap().as_str(), "^sk-");
    }

    #[test]
    fn json_unknown_kind_unsupported() {
        let err = Schema::from_json_str(r#"{"X": {"kind": "date"}}"#).unwrap_err();
        match err {
            EnvfigError::UnsupportedType { field, kind } => {
                assert_eq!(field, "X");
                assert_eq!(kind, "date");
            }
            other => panic!("Expected UnsupportedType, got: {other:?}"),
        }
    }

    #[test]
    fn json_unknown_descriptor_key_rejected() {
        let err = Schema::from_json_str(r#"{"X": {"kind": "string", "minLen": 3}}"#).unwrap_err();
        assert!(matches!(err, EnvfigError::InvalidSchema { .. }));
    }

    #[test]
    fn json_bad_regex_rejected() {
        let err = Schema::from_json_str(r#"{"X": {"kind": "string", "pattern": "("}}"#).unwrap_err();
        assert!(matches!(err, EnvfigError::InvalidSchema { .. }));
    }

    #[test]
    fn json_default_of_wrong_kind_rejected() {
        let err = Schema::from_json_str(r#"{"PORT": {"kind": "number", "default": "3000"}}"#)
            .unwrap_err();
        assert!(err.to_string().contains("default must be a number"));
    }

    #[test]
    fn json_null_entry_unsupported() {
        let err = Schema::from_json_str(r#"{"X": null}"#).unwrap_err();
        assert!(matches!(err, EnvfigError::UnsupportedType { .. }));
    }

    #[test]
    fn json_object_without_kind_unsupported() {
        let err = Schema::from_json_str(r#"{"X": {"default": 1}}"#).unwrap_err();
        assert!(matches!(err, EnvfigError::UnsupportedType { .. }));
    }

    #[test]
    fn json_root_must_be_object() {
        let err = Schema::from_json_str("[1, 2]").unwrap_err();
        assert!(matches!(err, EnvfigError::SchemaParse(_)));
    }

    #[test]
    fn toml_document_keeps_order() {
        let schema = Schema::from_toml_str(
            r#"
ZED = "last-alphabetically"
PORT = 3000

[NODE_ENV]
kind = "string"
required = true
choices = ["development", "production", "test"]

[DEBUG]
type = "boolean"
default = false
"#,
        )
        .unwrap();
        let keys: Vec<&str> = schema.keys().collect();
        assert_eq!(keys, vec!["ZED", "PORT", "NODE_ENV", "DEBUG"]);
        let d = schema.get("DEBUG").unwrap().normalize("DEBUG").unwrap();
        assert_eq!(d.default, Some(Value::Boolean(false)));
    }

    #[test]
    fn toml_rendering_round_trips_through_parser() {
        let schema = Schema::new()
            .field("PORT", FieldDescriptor::number().required().min(1.0))
            .field("HOST", "localhost");
        let rendered = schema.to_toml_string().unwrap();
        assert!(rendered.contains("[PORT]"));
        let reparsed = Schema::from_toml_str(&rendered).unwrap();
        let d = reparsed.get("PORT").unwrap().normalize("PORT").unwrap();
        assert!(d.required);
        assert_eq!(d.min, Some(1.0));
    }
}
