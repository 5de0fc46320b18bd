//! The frozen result of a load.
//!
//! A [`Config`] is read-only: it is built once by the engine and exposes no way
//! to change a value. Loading again produces a new one.

use indexmap::IndexMap;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::EnvfigError;
use crate::types::Value;

/// Validated, typed configuration values in schema order.
///
/// Optional fields that were absent from every source are not present.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Config {
    values: IndexMap<String, Value>,
}

impl Config {
    pub(crate) fn from_values(values: IndexMap<String, Value>) -> Self {
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    pub fn get_object(&self, key: &str) -> Option<&serde_json::Value> {
        self.get(key).and_then(Value::as_object)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The values as a flat JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.values
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }

    /// Deserialize into a typed struct.
    ///
    /// Field names must match the keys exactly (use `#[serde(rename = "PORT")]`
    /// or `#[serde(rename_all = "SCREAMING_SNAKE_CASE")]`). Optional schema
    /// fields map naturally to `Option<T>`.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, EnvfigError> {
        serde_json::from_value(self.to_json()).map_err(EnvfigError::Extract)
    }

    /// Group keys into nested objects by splitting them at `separator`.
    ///
    /// Segments are lowercased: with `"__"`, `DATABASE__HOST` becomes
    /// `{"database": {"host": ...}}`. When two keys claim the same path, the
    /// one earlier in schema order wins.
    pub fn nested(&self, separator: &str) -> serde_json::Value {
        let mut root = serde_json::Map::new();
        for (key, value) in &self.values {
            let segments: Vec<&str> = key
                .split(separator)
                .filter(|segment| !segment.is_empty())
                .collect();
            if segments.is_empty() {
                continue;
            }
            insert_nested(&mut root, &segments, value.to_json());
        }
        serde_json::Value::Object(root)
    }
}

fn insert_nested(
    map: &mut serde_json::Map<String, serde_json::Value>,
    segments: &[&str],
    value: serde_json::Value,
) {
    debug_assert!(!segments.is_empty());

    let key = segments[0].to_lowercase();

    if segments.len() == 1 {
        map.entry(key).or_insert(value);
    } else {
        let sub = map
            .entry(key)
            .or_insert_with(|| serde_json::Value::Object(serde_json::Map::new()));
        if let serde_json::Value::Object(sub_map) = sub {
            insert_nested(sub_map, &segments[1..], value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    fn config(pairs: &[(&str, Value)]) -> Config {
        Config::from_values(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    #[test]
    fn typed_accessors() {
        let c = config(&[
            ("HOST", Value::from("localhost")),
            ("PORT", Value::from(3000)),
            ("DEBUG", Value::from(true)),
        ]);
        assert_eq!(c.get_str("HOST"), Some("localhost"));
        assert_eq!(c.get_f64("PORT"), Some(3000.0));
        assert_eq!(c.get_bool("DEBUG"), Some(true));
        assert_eq!(c.get_str("PORT"), None);
        assert_eq!(c.get("MISSING"), None);
    }

    #[test]
    fn serializes_as_flat_object() {
        let c = config(&[("PORT", Value::from(3000)), ("HOST", Value::from("h"))]);
        assert_eq!(serde_json::to_string(&c).unwrap(), r#"{"PORT":3000,"HOST":"h"}"#);
    }

    #[test]
    fn deserialize_into_struct() {
        #[derive(Deserialize, Debug, PartialEq)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        struct App {
            port: u16,
            host: String,
            log_level: Option<String>,
        }
        let c = config(&[("PORT", Value::from(8080)), ("HOST", Value::from("0.0.0.0"))]);
        let app: App = c.deserialize().unwrap();
        assert_eq!(
            app,
            App {
                port: 8080,
                host: "0.0.0.0".into(),
                log_level: None,
            }
        );
    }

    #[test]
    fn deserialize_type_mismatch_errors() {
        #[derive(Deserialize, Debug)]
        #[allow(dead_code)]
        struct App {
            #[serde(rename = "PORT")]
            port: bool,
        }
        let c = config(&[("PORT", Value::from(8080))]);
        let err = c.deserialize::<App>().unwrap_err();
        assert!(matches!(err, EnvfigError::Extract(_)));
    }

    #[test]
    fn nested_by_double_underscore() {
        let c = config(&[
            ("DATABASE__HOST", Value::from("db")),
            ("DATABASE__POOL_SIZE", Value::from(10)),
            ("PORT", Value::from(80)),
        ]);
        assert_eq!(
            c.nested("__"),
            json!({"database": {"host": "db", "pool_size": 10}, "port": 80})
        );
    }

    #[test]
    fn nested_by_dot() {
        let c = config(&[("a.b.c", Value::from(true))]);
        assert_eq!(c.nested("."), json!({"a": {"b": {"c": true}}}));
    }

    #[test]
    fn nested_conflict_first_wins() {
        let c = config(&[
            ("DB", Value::from("flat")),
            ("DB__HOST", Value::from("nested")),
        ]);
        assert_eq!(c.nested("__"), json!({"db": "flat"}));
    }

    #[test]
    fn nested_skips_empty_segments() {
        let c = config(&[("__LEADING", Value::from(1))]);
        assert_eq!(c.nested("__"), json!({"leading": 1}));
    }
}
