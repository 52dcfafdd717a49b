//! Direction-tagged field operators.
//!
//! A [`SortKey`] pairs a field name with a [`Direction`]. Callers usually build one from a
//! [`FieldName`] (`FieldName::new("age").desc()`) or the free [`asc`]/[`desc`] helpers, and can
//! hand it anywhere a sort or projection element is expected.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// Sort direction as understood by document databases: `1` ascending, `-1` descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    #[inline]
    pub const fn as_i32(self) -> i32 {
        match self {
            Direction::Asc => 1,
            Direction::Desc => -1,
        }
    }

    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }

    /// Parse an `asc`/`desc` token, ignoring case.
    pub fn from_token(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("asc") {
            Some(Direction::Asc)
        } else if token.eq_ignore_ascii_case("desc") {
            Some(Direction::Desc)
        } else {
            None
        }
    }

    /// Map the numeric form (`1` or `-1`) back to a direction.
    #[inline]
    pub const fn from_i64(value: i64) -> Option<Self> {
        match value {
            1 => Some(Direction::Asc),
            -1 => Some(Direction::Desc),
            _ => None,
        }
    }

    /// Decide a direction by sign: negative descends, positive ascends, zero has no direction.
    #[inline]
    pub const fn from_sign(value: i64) -> Option<Self> {
        match value {
            0 => None,
            v if v < 0 => Some(Direction::Desc),
            _ => Some(Direction::Asc),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Direction {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i32(self.as_i32())
    }
}

impl<'de> Deserialize<'de> for Direction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = i64::deserialize(deserializer)?;
        Direction::from_i64(value)
            .ok_or_else(|| de::Error::custom(format!("direction must be 1 or -1, got {value}")))
    }
}

/// A bare field-name token, distinct from free-form strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldName(String);

impl FieldName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn asc(self) -> SortKey {
        SortKey::new(self.0, Direction::Asc)
    }

    pub fn desc(self) -> SortKey {
        SortKey::new(self.0, Direction::Desc)
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for FieldName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Serialize for FieldName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

/// A field paired with a sort direction. Serializes as `[field, 1|-1]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortKey {
    pub field: String,
    pub direction: Direction,
}

impl SortKey {
    pub fn new(field: impl Into<String>, direction: Direction) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Rename `id` to the document primary key `_id`.
    pub(crate) fn with_primary_key(mut self) -> Self {
        if self.field == "id" {
            self.field = "_id".to_string();
        }
        self
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.direction)
    }
}

impl Serialize for SortKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (&self.field, self.direction).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SortKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (field, direction) = <(String, Direction)>::deserialize(deserializer)?;
        Ok(SortKey { field, direction })
    }
}

/// Ascending sort on `field`.
pub fn asc(field: impl Into<String>) -> SortKey {
    SortKey::new(field, Direction::Asc)
}

/// Descending sort on `field`.
pub fn desc(field: impl Into<String>) -> SortKey {
    SortKey::new(field, Direction::Desc)
}
