use crate::errors::{OptionsError, OptionsResult};
use crate::keys::CanonicalKey;
use crate::value::OptionValue;

/// Coerce a `limit` or `skip` bound to an integer.
///
/// Numeric strings are parsed after trimming; blank strings clear the bound, as does null.
/// Floats are accepted only when they carry no fractional part.
pub fn normalize_bound(key: CanonicalKey, value: OptionValue) -> OptionsResult<Option<OptionValue>> {
    let bound = match value {
        OptionValue::Null => None,
        OptionValue::Int(number) => Some(number),
        OptionValue::Str(raw) => parse_integer_bound(key, &raw)?,
        OptionValue::Float(number) if number.is_finite() && number.fract() == 0.0 => Some(float_bound(key, number)?),
        other => {
            return Err(OptionsError::invalid(
                key.as_str(),
                format!("expected an integer, got {}", other.kind()),
            ));
        }
    };
    Ok(bound.map(OptionValue::Int))
}

/// Whole floats must fit in an `i64`; `i64::MAX as f64` rounds up to 2^63, so it is excluded.
fn float_bound(key: CanonicalKey, number: f64) -> OptionsResult<i64> {
    if number >= i64::MIN as f64 && number < i64::MAX as f64 {
        Ok(number as i64)
    } else {
        Err(OptionsError::invalid(key.as_str(), format!("integer {number} is out of range")))
    }
}

/// Parses a numeric bound string, treating blank input as unset.
pub fn parse_integer_bound(key: CanonicalKey, raw: &str) -> OptionsResult<Option<i64>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        trimmed
            .parse::<i64>()
            .map(Some)
            .map_err(|_| OptionsError::invalid(key.as_str(), format!("expected an integer, got {trimmed:?}")))
    }
}
