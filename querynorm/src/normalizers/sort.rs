//! Sort coercion and the sort expression parser.
//!
//! A sort expression is a comma-separated list of `name [direction]` segments:
//!
//! ```text
//! expression := segment ("," segment)*
//! segment    := ws* name (ws+ direction)? ws*
//! direction  := "asc" | "desc"        (case-insensitive)
//! ```
//!
//! Parsing is permissive. Empty segments are dropped, a missing or unrecognized direction
//! ascends, and anything after the direction token is ignored.

use log::trace;

use crate::errors::{OptionsError, OptionsResult};
use crate::keys::CanonicalKey;
use crate::operators::{Direction, SortKey};
use crate::value::{OptionMap, OptionValue};

/// Parse a sort expression such as `"foo desc, bar, baz"` into ordered sort keys.
///
/// `id` is renamed to `_id`; every other name (including `$natural`) is kept verbatim.
///
/// ```
/// use querynorm::normalizers::parse_sort_expression;
/// use querynorm::operators::{asc, desc};
///
/// assert_eq!(
///     parse_sort_expression("foo desc, bar"),
///     vec![desc("foo"), asc("bar")],
/// );
/// ```
pub fn parse_sort_expression(expression: &str) -> Vec<SortKey> {
    expression.split(',').filter_map(parse_sort_segment).collect()
}

fn parse_sort_segment(segment: &str) -> Option<SortKey> {
    let mut tokens = segment.split_whitespace();
    let Some(field) = tokens.next() else {
        trace!("dropping empty sort segment {segment:?}");
        return None;
    };

    let direction = match tokens.next() {
        Some(token) => Direction::from_token(token).unwrap_or_else(|| {
            trace!("unrecognized sort direction {token:?} for {field}, defaulting to ascending");
            Direction::Asc
        }),
        None => Direction::Asc,
    };

    Some(SortKey::new(field, direction).with_primary_key())
}

/// Coerce a `sort`/`order` value into its canonical shape.
///
/// Returns `Ok(None)` when the value clears the key.
pub fn normalize_sort(value: OptionValue) -> OptionsResult<Option<OptionValue>> {
    let keys = match value {
        OptionValue::Null => return Ok(None),
        // Pre-built direction documents such as `{"$natural": -1}` are stored untouched.
        OptionValue::Map(map) => return Ok(Some(OptionValue::Map(map))),
        OptionValue::Str(expression) => parse_sort_expression(&expression),
        OptionValue::Symbol(name) => vec![name.asc().with_primary_key()],
        OptionValue::Order(key) => vec![key.with_primary_key()],
        OptionValue::Seq(items) => {
            let mut keys = Vec::with_capacity(items.len());
            for item in items {
                collect_sort_element(item, &mut keys)?;
            }
            keys.into_iter().map(SortKey::with_primary_key).collect()
        }
        other => {
            return Err(OptionsError::invalid(
                CanonicalKey::Sort.as_str(),
                format!("cannot build a sort from a {}", other.kind()),
            ));
        }
    };

    if keys.is_empty() {
        return Ok(None);
    }
    Ok(Some(OptionValue::Seq(keys.into_iter().map(OptionValue::Order).collect())))
}

fn collect_sort_element(item: OptionValue, keys: &mut Vec<SortKey>) -> OptionsResult<()> {
    match item {
        OptionValue::Null => trace!("compacting null sort element"),
        OptionValue::Symbol(name) => keys.push(name.asc()),
        OptionValue::Order(key) => keys.push(key),
        OptionValue::Str(expression) => keys.extend(parse_sort_expression(&expression)),
        OptionValue::Seq(pair) => keys.push(sort_pair(pair)?),
        OptionValue::Map(map) => keys.extend(sort_document(map)?),
        other => {
            return Err(OptionsError::invalid(
                CanonicalKey::Sort.as_str(),
                format!("unsupported sort element: {}", other.kind()),
            ));
        }
    }
    Ok(())
}

/// `[name, direction]`, where direction is a non-zero integer (sign decides), `"asc"` or `"desc"`.
fn sort_pair(pair: Vec<OptionValue>) -> OptionsResult<SortKey> {
    let [name, direction]: [OptionValue; 2] = pair.try_into().map_err(|pair: Vec<OptionValue>| {
        OptionsError::invalid(
            CanonicalKey::Sort.as_str(),
            format!("sort pair must have exactly two elements, got {}", pair.len()),
        )
    })?;

    let field = match name {
        OptionValue::Str(field) => field,
        OptionValue::Symbol(name) => name.into_string(),
        other => {
            return Err(OptionsError::invalid(
                CanonicalKey::Sort.as_str(),
                format!("sort field must be a name, got {}", other.kind()),
            ));
        }
    };

    Ok(SortKey::new(field, sort_direction(&direction)?))
}

fn sort_document(map: OptionMap) -> OptionsResult<Vec<SortKey>> {
    map.into_iter()
        .map(|(field, direction)| Ok(SortKey::new(field, sort_direction(&direction)?)))
        .collect()
}

fn sort_direction(value: &OptionValue) -> OptionsResult<Direction> {
    let direction = match value {
        OptionValue::Int(number) => Direction::from_sign(*number),
        OptionValue::Str(token) => Direction::from_token(token),
        OptionValue::Symbol(token) => Direction::from_token(token.as_str()),
        _ => None,
    };
    direction.ok_or_else(|| {
        OptionsError::invalid(
            CanonicalKey::Sort.as_str(),
            format!("sort direction must be a non-zero integer, asc or desc, got {value:?}"),
        )
    })
}
