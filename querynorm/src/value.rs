//! Heterogeneous option values.
//!
//! Application code hands the normalizer strings, symbols, nested sequences, mappings,
//! integers or null. [`OptionValue`] models that input universe, and also carries the
//! canonical shapes the normalizer stores.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;

use crate::operators::{FieldName, SortKey};

pub type OptionMap = IndexMap<String, OptionValue>;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum OptionValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Symbol(FieldName),
    Seq(Vec<OptionValue>),
    Map(OptionMap),
    /// Direction-tagged field operator.
    Order(SortKey),
}

impl OptionValue {
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, OptionValue::Null)
    }

    pub fn sym(name: impl Into<String>) -> Self {
        OptionValue::Symbol(FieldName::new(name))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Str(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            OptionValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[OptionValue]> {
        match self {
            OptionValue::Seq(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&OptionMap> {
        match self {
            OptionValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Short human description used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            OptionValue::Null => "null",
            OptionValue::Bool(_) => "boolean",
            OptionValue::Int(_) => "integer",
            OptionValue::Float(_) => "float",
            OptionValue::Str(_) => "string",
            OptionValue::Symbol(_) => "symbol",
            OptionValue::Seq(_) => "sequence",
            OptionValue::Map(_) => "mapping",
            OptionValue::Order(_) => "sort operator",
        }
    }

    /// Render as a JSON value for the query execution layer.
    ///
    /// Symbols become strings and sort operators become `[field, direction]` pairs.
    pub fn to_json(&self) -> JsonValue {
        match self {
            OptionValue::Null => JsonValue::Null,
            OptionValue::Bool(value) => JsonValue::Bool(*value),
            OptionValue::Int(value) => JsonValue::from(*value),
            OptionValue::Float(value) => JsonValue::from(*value),
            OptionValue::Str(value) => JsonValue::String(value.clone()),
            OptionValue::Symbol(name) => JsonValue::String(name.as_str().to_string()),
            OptionValue::Seq(items) => JsonValue::Array(items.iter().map(OptionValue::to_json).collect()),
            OptionValue::Map(map) => JsonValue::Object(map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect()),
            OptionValue::Order(key) => {
                JsonValue::Array(vec![JsonValue::String(key.field.clone()), key.direction.as_i32().into()])
            }
        }
    }
}

impl Serialize for OptionValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            OptionValue::Null => serializer.serialize_none(),
            OptionValue::Bool(value) => serializer.serialize_bool(*value),
            OptionValue::Int(value) => serializer.serialize_i64(*value),
            OptionValue::Float(value) => serializer.serialize_f64(*value),
            OptionValue::Str(value) => serializer.serialize_str(value),
            OptionValue::Symbol(name) => name.serialize(serializer),
            OptionValue::Seq(items) => items.serialize(serializer),
            OptionValue::Map(map) => map.serialize(serializer),
            OptionValue::Order(key) => key.serialize(serializer),
        }
    }
}

impl From<JsonValue> for OptionValue {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => OptionValue::Null,
            JsonValue::Bool(flag) => OptionValue::Bool(flag),
            JsonValue::Number(number) => match number.as_i64() {
                Some(int) => OptionValue::Int(int),
                None => OptionValue::Float(number.as_f64().unwrap_or(f64::NAN)),
            },
            JsonValue::String(text) => OptionValue::Str(text),
            JsonValue::Array(items) => OptionValue::Seq(items.into_iter().map(OptionValue::from).collect()),
            JsonValue::Object(map) => OptionValue::Map(map.into_iter().map(|(k, v)| (k, OptionValue::from(v))).collect()),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Str(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Str(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Int(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        OptionValue::Int(i64::from(value))
    }
}

impl From<u32> for OptionValue {
    fn from(value: u32) -> Self {
        OptionValue::Int(i64::from(value))
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        OptionValue::Float(value)
    }
}

impl From<FieldName> for OptionValue {
    fn from(value: FieldName) -> Self {
        OptionValue::Symbol(value)
    }
}

impl From<SortKey> for OptionValue {
    fn from(value: SortKey) -> Self {
        OptionValue::Order(value)
    }
}

impl From<OptionMap> for OptionValue {
    fn from(value: OptionMap) -> Self {
        OptionValue::Map(value)
    }
}

impl<T: Into<OptionValue>> From<Vec<T>> for OptionValue {
    fn from(value: Vec<T>) -> Self {
        OptionValue::Seq(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<OptionValue>> From<Option<T>> for OptionValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(OptionValue::Null, Into::into)
    }
}

/// Build an [`OptionValue::Map`] from `(key, value)` pairs, preserving order.
impl<K: Into<String>, V: Into<OptionValue>> FromIterator<(K, V)> for OptionValue {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        OptionValue::Map(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
