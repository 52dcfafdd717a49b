use log::trace;

use crate::value::OptionValue;

/// Coerce a `fields`/`select` projection into its canonical shape.
///
/// Strings are split on commas, sequences are flattened one level, mappings of field weights
/// are kept as-is and any other scalar becomes a one-element list. Returns `None` when the
/// projection is empty.
pub fn normalize_fields(value: OptionValue) -> Option<OptionValue> {
    let fields = match value {
        OptionValue::Null => return None,
        OptionValue::Map(weights) => return Some(OptionValue::Map(weights)),
        OptionValue::Str(list) => split_field_list(&list),
        OptionValue::Seq(items) => flatten_fields(items),
        OptionValue::Order(key) => vec![OptionValue::sym(key.field)],
        scalar => vec![scalar],
    };

    if fields.is_empty() { None } else { Some(OptionValue::Seq(fields)) }
}

/// Split `"one, two"` into `["one", "two"]`, dropping blank entries.
pub fn split_field_list(list: &str) -> Vec<OptionValue> {
    list.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(OptionValue::from)
        .collect()
}

fn flatten_fields(items: Vec<OptionValue>) -> Vec<OptionValue> {
    let mut fields = Vec::with_capacity(items.len());
    for item in items {
        match item {
            OptionValue::Seq(nested) => fields.extend(nested.into_iter().filter_map(field_element)),
            other => fields.extend(field_element(other)),
        }
    }
    fields
}

fn field_element(item: OptionValue) -> Option<OptionValue> {
    match item {
        OptionValue::Null => {
            trace!("compacting null projection element");
            None
        }
        OptionValue::Order(key) => Some(OptionValue::sym(key.field)),
        other => Some(other),
    }
}
