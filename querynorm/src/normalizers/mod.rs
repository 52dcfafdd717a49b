//! Per-key coercion rules for canonical option keys.
//!
//! Each rule takes ownership of the incoming value and returns the canonical shape, or
//! `None` when the write clears the key.

pub mod fields;
pub mod paging;
pub mod sort;

pub use fields::*;
pub use paging::*;
pub use sort::*;

use crate::errors::OptionsResult;
use crate::keys::CanonicalKey;
use crate::value::OptionValue;

/// Dispatch a value to the coercion rule of `key`.
pub fn normalize(key: CanonicalKey, value: OptionValue) -> OptionsResult<Option<OptionValue>> {
    match key {
        CanonicalKey::Fields => Ok(normalize_fields(value)),
        CanonicalKey::Sort => normalize_sort(value),
        CanonicalKey::Limit | CanonicalKey::Skip => normalize_bound(key, value),
    }
}
