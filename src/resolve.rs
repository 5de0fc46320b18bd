//! The validation engine: raw source + schema → frozen [`Config`].
//!
//! Operates on pre-loaded data with no I/O, so the full pipeline is testable
//! with synthetic inputs. For each schema key, in declaration order:
//!
//! 1. Normalize the entry to a [`FieldDescriptor`](crate::schema::FieldDescriptor)
//! 2. Look up the raw value (possibly absent)
//! 3. Check presence of required fields
//! 4. Coerce to the field's kind
//! 5. Check choices and kind constraints
//! 6. Record the value (absent optionals are left out)
//!
//! The first failure aborts the whole load. Without a schema, one is inferred
//! from the source first (see [`infer_schema`]).

use indexmap::IndexMap;

use crate::coerce;
use crate::config::Config;
use crate::error::EnvfigError;
use crate::infer::infer_schema;
use crate::schema::Schema;
use crate::validate;

/// One raw value as it came out of the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawValue {
    pub value: String,
    /// Whether a layer of quotes was stripped from the value.
    pub quoted: bool,
}

impl RawValue {
    /// An unquoted value, as process environment values always are.
    pub fn plain(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            quoted: false,
        }
    }
}

/// Raw key → value map from the `.env` file and/or the process environment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawEnv {
    entries: IndexMap<String, RawValue>,
}

impl RawEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from plain (unquoted) string pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        pairs
            .into_iter()
            .map(|(k, v)| (k.into(), RawValue::plain(v)))
            .collect()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: RawValue) {
        self.entries.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.entries.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|raw| raw.value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Layer `other` on top: its values win for keys present in both.
    pub fn overlay(&mut self, other: RawEnv) {
        self.entries.extend(other.entries);
    }
}

impl FromIterator<(String, RawValue)> for RawEnv {
    fn from_iter<I: IntoIterator<Item = (String, RawValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Validate `raw` against `schema` and produce a frozen config.
pub fn load(raw: &RawEnv, schema: &Schema) -> Result<Config, EnvfigError> {
    let mut values = IndexMap::with_capacity(schema.len());

    for (key, entry) in schema.iter() {
        let descriptor = entry.normalize(key)?;
        let raw_value = raw.get_str(key);

        validate::check_presence(&descriptor, key, raw_value)?;
        let coerced = coerce::coerce(&descriptor, key, raw_value)?;
        validate::validate(&descriptor, key, coerced.as_ref())?;

        if let Some(value) = coerced {
            values.insert(key.to_string(), value);
        }
    }

    Ok(Config::from_values(values))
}

/// Infer a schema from `raw` and load against it.
pub fn load_inferred(raw: &RawEnv) -> Result<Config, EnvfigError> {
    load(raw, &infer_schema(raw))
}

/// Marker: no source loaded yet.
#[derive(Debug, Default)]
pub struct Uninitialized;

/// Marker: source loaded, not yet parsed.
#[derive(Debug)]
pub struct Loaded {
    raw: RawEnv,
}

/// Step-by-step form of [`load`]: `new()` → `load(raw)` → `parse(schema)`.
///
/// `parse` consumes the engine; parsing again requires loading a fresh source.
#[derive(Debug, Default)]
pub struct Engine<S> {
    state: S,
}

impl Engine<Uninitialized> {
    pub fn new() -> Self {
        Self {
            state: Uninitialized,
        }
    }

    pub fn load(self, raw: RawEnv) -> Engine<Loaded> {
        Engine {
            state: Loaded { raw },
        }
    }
}

impl Engine<Loaded> {
    pub fn raw(&self) -> &RawEnv {
        &self.state.raw
    }

    /// Parse with `schema`, or with a schema inferred from the source when `None`.
    pub fn parse(self, schema: Option<&Schema>) -> Result<Config, EnvfigError> {
        match schema {
            Some(schema) => load(&self.state.raw, schema),
            None => load_inferred(&self.state.raw),
        }
    }
}
