//! The options normalizer.
//!
//! [`OptionsHash`] is an ordered map that intercepts writes to the canonical query option keys
//! (`fields`, `sort`, `limit`, `skip`) and their aliases (`select`, `order`, `offset`), coercing
//! each value into the single shape the query execution layer expects. Every other key is
//! stored and returned untouched.
//!
//! ```
//! use querynorm::{OptionValue, OptionsHash};
//! use querynorm::operators::{asc, desc};
//!
//! let mut options = OptionsHash::new();
//! options.insert("order", "created_at desc, name")?;
//! options.insert("offset", "20")?;
//!
//! assert_eq!(options.get("order"), None);
//! assert_eq!(
//!     options.get("sort"),
//!     Some(&OptionValue::from(vec![desc("created_at"), asc("name")]))
//! );
//! assert_eq!(options.skip(), Some(20));
//! # Ok::<(), querynorm::OptionsError>(())
//! ```

use indexmap::map::{IntoIter, Iter, Keys, Values};
use log::debug;
use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;

use crate::errors::{OptionsError, OptionsResult};
use crate::keys::{CanonicalKey, ResolvedKey};
use crate::normalizers::normalize;
use crate::operators::SortKey;
use crate::value::{OptionMap, OptionValue};

/// Canonical projection view of the `fields` option.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection<'a> {
    /// Ordered field names (strings or symbols).
    Fields(&'a [OptionValue]),
    /// Field name to inclusion weight (`1` include, `-1` exclude).
    Weights(&'a OptionMap),
}

impl<'a> Projection<'a> {
    /// Field names of a list projection, or the keys of a weight mapping.
    pub fn names(&self) -> Vec<&'a str> {
        match *self {
            Projection::Fields(fields) => fields
                .iter()
                .filter_map(|field| match field {
                    OptionValue::Str(name) => Some(name.as_str()),
                    OptionValue::Symbol(name) => Some(name.as_str()),
                    _ => None,
                })
                .collect(),
            Projection::Weights(weights) => weights.keys().map(String::as_str).collect(),
        }
    }
}

/// Canonical view of the `sort` option.
#[derive(Debug, Clone, PartialEq)]
pub enum SortSpec<'a> {
    /// Ordered `(field, direction)` pairs.
    Keys(Vec<&'a SortKey>),
    /// A direction document stored verbatim, e.g. `{"$natural": -1}`.
    Document(&'a OptionMap),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionsHash {
    entries: OptionMap,
}

impl OptionsHash {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from seed entries. Every entry goes through [`OptionsHash::insert`].
    pub fn from_seed<I, K, V>(seed: I) -> OptionsResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<OptionValue>,
    {
        let mut options = Self::new();
        options.try_extend(seed)?;
        Ok(options)
    }

    /// Build from a JSON object such as `{"order": "name desc", "limit": "10"}`.
    pub fn from_json(value: JsonValue) -> OptionsResult<Self> {
        match OptionValue::from(value) {
            OptionValue::Map(map) => Self::from_seed(map),
            other => Err(OptionsError::invalid(
                "options",
                format!("expected a JSON object, got {}", other.kind()),
            )),
        }
    }

    pub fn from_json_str(source: &str) -> OptionsResult<Self> {
        Self::from_json(serde_json::from_str(source)?)
    }

    /// Write `value` under `key`, coercing canonical keys and redirecting aliases.
    ///
    /// A value that coerces to nothing (an empty projection, for instance) removes the key.
    /// On error the previous value is left in place.
    pub fn insert(&mut self, key: &str, value: impl Into<OptionValue>) -> OptionsResult<()> {
        let value = value.into();
        let resolved = ResolvedKey::resolve(key);
        if let ResolvedKey::Alias { alias, target } = resolved {
            debug!("redirecting option '{alias}' to '{}'", target.as_str());
        }

        let name = resolved.storage_name();
        let Some(canonical) = resolved.canonical() else {
            self.entries.insert(name.to_string(), value);
            return Ok(());
        };

        match normalize(canonical, value)? {
            Some(normalized) => {
                self.entries.insert(name.to_string(), normalized);
            }
            None => {
                if self.entries.shift_remove(name).is_some() {
                    debug!("cleared option '{name}'");
                }
            }
        }
        Ok(())
    }

    /// Insert every entry, stopping at the first coercion failure.
    pub fn try_extend<I, K, V>(&mut self, entries: I) -> OptionsResult<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<OptionValue>,
    {
        for (key, value) in entries {
            self.insert(key.as_ref(), value)?;
        }
        Ok(())
    }

    /// Alias keys are never stored, so reading one always yields `None`.
    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        match ResolvedKey::resolve(key) {
            ResolvedKey::Alias { .. } => None,
            _ => self.entries.get(key),
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Remove an entry. Aliases remove the canonical key they stand for.
    pub fn remove(&mut self, key: &str) -> Option<OptionValue> {
        let resolved = ResolvedKey::resolve(key);
        self.entries.shift_remove(resolved.storage_name())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> Keys<'_, String, OptionValue> {
        self.entries.keys()
    }

    pub fn values(&self) -> Values<'_, String, OptionValue> {
        self.entries.values()
    }

    pub fn iter(&self) -> Iter<'_, String, OptionValue> {
        self.entries.iter()
    }

    pub fn fields(&self) -> Option<Projection<'_>> {
        match self.entries.get(CanonicalKey::Fields.as_str())? {
            OptionValue::Seq(fields) => Some(Projection::Fields(fields)),
            OptionValue::Map(weights) => Some(Projection::Weights(weights)),
            _ => None,
        }
    }

    pub fn sort(&self) -> Option<SortSpec<'_>> {
        match self.entries.get(CanonicalKey::Sort.as_str())? {
            OptionValue::Seq(items) => Some(SortSpec::Keys(
                items
                    .iter()
                    .filter_map(|item| match item {
                        OptionValue::Order(key) => Some(key),
                        _ => None,
                    })
                    .collect(),
            )),
            OptionValue::Map(document) => Some(SortSpec::Document(document)),
            _ => None,
        }
    }

    pub fn limit(&self) -> Option<i64> {
        self.entries.get(CanonicalKey::Limit.as_str()).and_then(OptionValue::as_i64)
    }

    pub fn skip(&self) -> Option<i64> {
        self.entries.get(CanonicalKey::Skip.as_str()).and_then(OptionValue::as_i64)
    }

    /// Hand the canonical entries over, e.g. to merge into a query request.
    pub fn into_inner(self) -> OptionMap {
        self.entries
    }

    /// Render the canonical mapping as a JSON object.
    pub fn to_json(&self) -> JsonValue {
        JsonValue::Object(self.entries.iter().map(|(k, v)| (k.clone(), v.to_json())).collect())
    }
}

impl TryFrom<OptionMap> for OptionsHash {
    type Error = OptionsError;

    fn try_from(seed: OptionMap) -> Result<Self, Self::Error> {
        Self::from_seed(seed)
    }
}

impl TryFrom<JsonValue> for OptionsHash {
    type Error = OptionsError;

    fn try_from(value: JsonValue) -> Result<Self, Self::Error> {
        Self::from_json(value)
    }
}

impl IntoIterator for OptionsHash {
    type Item = (String, OptionValue);
    type IntoIter = IntoIter<String, OptionValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a OptionsHash {
    type Item = (&'a String, &'a OptionValue);
    type IntoIter = Iter<'a, String, OptionValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for OptionsHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.entries.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::{asc, desc};

    #[test]
    fn seeding_goes_through_the_write_path() {
        let options = OptionsHash::from_seed([("skip", OptionValue::Int(1)), ("limit", OptionValue::from("1"))])
            .expect("seed should normalize");
        assert_eq!(options.skip(), Some(1));
        assert_eq!(options.limit(), Some(1));
        assert_eq!(options.keys().collect::<Vec<_>>(), ["skip", "limit"]);
    }

    #[test]
    fn rewriting_keeps_key_position() {
        let mut options = OptionsHash::new();
        options.insert("limit", 5).expect("limit");
        options.insert("hint", "by_name").expect("hint");
        options.insert("limit", "10").expect("limit");
        assert_eq!(options.keys().collect::<Vec<_>>(), ["limit", "hint"]);
        assert_eq!(options.limit(), Some(10));
    }

    #[test]
    fn clearing_removes_the_key() {
        let mut options = OptionsHash::new();
        options.insert("fields", "a, b").expect("fields");
        options.insert("select", "").expect("select");
        assert!(options.is_empty());
        assert_eq!(options.get("fields"), None);
    }

    #[test]
    fn failed_write_keeps_previous_value() {
        let mut options = OptionsHash::new();
        options.insert("skip", 3).expect("skip");
        let err = options.insert("offset", "abc").expect_err("non-numeric skip");
        assert!(matches!(err, OptionsError::InvalidArgument { ref key, .. } if key == "skip"));
        assert_eq!(options.skip(), Some(3));
    }

    #[test]
    fn remove_through_alias() {
        let mut options = OptionsHash::from_seed([("sort", "name")]).expect("sort");
        assert_eq!(options.remove("order"), Some(OptionValue::from(vec![asc("name")])));
        assert!(options.sort().is_none());
    }

    #[test]
    fn typed_views() {
        let mut options = OptionsHash::new();
        options.insert("sort", "a desc, b").expect("sort");
        options.insert("fields", "a, b").expect("fields");
        let a = desc("a");
        let b = asc("b");
        assert_eq!(options.sort(), Some(SortSpec::Keys(vec![&a, &b])));
        assert_eq!(options.fields().map(|p| p.names()), Some(vec!["a", "b"]));

        let natural: OptionValue = [("$natural", 1)].into_iter().collect();
        options.insert("sort", natural).expect("natural");
        assert!(matches!(options.sort(), Some(SortSpec::Document(doc)) if doc.contains_key("$natural")));
    }

    #[test]
    fn json_rendering_uses_plain_shapes() {
        let options = OptionsHash::from_json_str(r#"{"order": "foo desc", "select": "a", "limit": "2", "hint": {"a": 1}}"#)
            .expect("json seed");
        assert_eq!(
            options.to_json(),
            serde_json::json!({"sort": [["foo", -1]], "fields": ["a"], "limit": 2, "hint": {"a": 1}})
        );
        assert_eq!(serde_json::to_value(&options).expect("serialize"), options.to_json());
    }

    #[test]
    fn json_seed_must_be_an_object() {
        let err = OptionsHash::from_json(serde_json::json!([1, 2])).expect_err("array seed");
        assert!(err.to_string().contains("expected a JSON object, got sequence"));
    }
}
