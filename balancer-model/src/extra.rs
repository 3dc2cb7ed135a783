//! The extra-attribute bag.
//!
//! # Column contract
//!
//! - **Encode**: a JSON object whose keys appear in ascending byte order and
//!   whose values are scalars. An empty bag encodes as `{}`. Non-finite
//!   floats are rejected instead of being silently turned into `null`.
//! - **Decode**: `NULL`, the empty string and whitespace-only text decode to
//!   an empty bag. Anything other than a JSON object of scalars is an error.
//!
//! Because keys are kept in a `BTreeMap`, two equal bags always encode to
//! byte-identical text.

use balancer_types::ExtraValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map;

use crate::{ModelError, ModelResult};

/// Open-ended key/value attributes carried alongside an entity's fixed fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtraAttrs(BTreeMap<String, ExtraValue>);

impl ExtraAttrs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ExtraValue> {
        self.0.get(key)
    }

    /// Text value for `key`, if present and textual.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(ExtraValue::as_str)
    }

    /// Inserts a value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ExtraValue>) -> Option<ExtraValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<ExtraValue> {
        self.0.remove(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, ExtraValue> {
        self.0.iter()
    }

    /// Encodes the bag into its column representation.
    pub fn encode(&self) -> ModelResult<String> {
        if let Some((key, _)) = self.0.iter().find(|(_, v)| !v.is_encodable()) {
            return Err(ModelError::NonFiniteExtra(key.clone()));
        }
        Ok(serde_json::to_string(&self.0)?)
    }

    /// Decodes a column value; a missing or blank column is an empty bag.
    pub fn decode(column: Option<&str>) -> ModelResult<Self> {
        match column.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(text) => Ok(Self(serde_json::from_str(text)?)),
        }
    }

    /// Converts the bag into JSON values for response bodies.
    #[must_use]
    pub fn to_json_map(&self) -> serde_json::Map<String, serde_json::Value> {
        self.0
            .iter()
            .map(|(k, v)| (k.clone(), scalar_to_json(v)))
            .collect()
    }
}

fn scalar_to_json(value: &ExtraValue) -> serde_json::Value {
    use serde_json::Value;
    match value {
        ExtraValue::Null => Value::Null,
        ExtraValue::Bool(b) => Value::Bool(*b),
        ExtraValue::Int(v) => Value::from(*v),
        ExtraValue::Float(v) => serde_json::Number::from_f64(*v).map_or(Value::Null, Value::Number),
        ExtraValue::Text(s) => Value::String(s.clone()),
    }
}

impl<K: Into<String>, V: Into<ExtraValue>> FromIterator<(K, V)> for ExtraAttrs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<String>, V: Into<ExtraValue>> Extend<(K, V)> for ExtraAttrs {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

impl IntoIterator for ExtraAttrs {
    type Item = (String, ExtraValue);
    type IntoIter = btree_map::IntoIter<String, ExtraValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ExtraAttrs {
    type Item = (&'a String, &'a ExtraValue);
    type IntoIter = btree_map::Iter<'a, String, ExtraValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
