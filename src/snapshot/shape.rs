//! Shape normalization at the deserialization boundary
//!
//! Exporters disagree on whether a length-one vector is written as `"x"` or
//! `["x"]`. These helpers accept both so typed records stay strict about
//! content while tolerant about boxing.

use std::collections::BTreeMap;

use serde::de::{Deserializer, Error as _};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

/// Deserialize a scalar that may be boxed in a one-element list.
///
/// `null` and `[]` map to `None`.
pub(crate) fn scalar<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    match Option::<OneOrMany<T>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(OneOrMany::One(value)) => Ok(Some(value)),
        Some(OneOrMany::Many(mut values)) if values.len() <= 1 => Ok(values.pop()),
        Some(OneOrMany::Many(values)) => Err(D::Error::invalid_length(
            values.len(),
            &"a scalar or a one-element list",
        )),
    }
}

/// Deserialize a list that may have been unboxed to a bare scalar.
pub(crate) fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match Option::<OneOrMany<T>>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(value)) => vec![value],
        Some(OneOrMany::Many(values)) => values,
    })
}

/// Deserialize a name-to-number map whose values may be boxed.
pub(crate) fn scalar_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, OneOrMany<f64>>>::deserialize(deserializer)?;
    raw.unwrap_or_default()
        .into_iter()
        .map(|(name, value)| match value {
            OneOrMany::One(number) => Ok((name, number)),
            OneOrMany::Many(numbers) if numbers.len() == 1 => Ok((name, numbers[0])),
            OneOrMany::Many(numbers) => Err(D::Error::invalid_length(
                numbers.len(),
                &"a single value per hyperparameter",
            )),
        })
        .collect()
}

/// Whether a value is something an artifact carries: not null, not a nested
/// structure, not an empty collection.
pub(crate) fn is_exportable(value: &Value) -> bool {
    match value {
        Value::Null | Value::Object(_) => false,
        Value::Array(items) => {
            !items.is_empty() && items.iter().all(|item| !item.is_array() && !item.is_object())
        }
        _ => true,
    }
}

/// Whether a value has zero length (null, `[]`, `{}`).
pub(crate) fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        _ => false,
    }
}

/// `f64` to an optional value, treating non-finite numbers as missing.
pub(crate) fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}
