//! Scalar-or-array coercion and sorted-unique-set construction.
//!
//! IAM lets most fields be either a single value or a list of values. These
//! helpers flatten both shapes into a list of strings and then into a
//! [`ValueSet`].

use itertools::Itertools;
use serde_json::{Number, Value};

use crate::error::PolicyError;
use crate::types::ValueSet;

/// Largest magnitude below which every whole `f64` is an exact integer.
const MAX_EXACT_FLOAT_INT: f64 = 9_007_199_254_740_992.0;

/// Write a JSON number in one form: whole-valued floats (`1.0`, `1e2`) are
/// written like the integer they equal.
pub(crate) fn number_to_string(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < MAX_EXACT_FLOAT_INT => {
            (f as i64).to_string()
        }
        _ => n.to_string(),
    }
}

/// Stringify a JSON scalar. Objects, arrays and `null` are rejected.
pub(crate) fn scalar_to_string(value: &Value, path: &str) -> Result<String, PolicyError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(number_to_string(n)),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Err(PolicyError::schema(path, "expected a scalar, found null")),
        Value::Array(_) => Err(PolicyError::schema(
            path,
            "expected a scalar, found a nested array",
        )),
        Value::Object(_) => Err(PolicyError::schema(
            path,
            "expected a scalar, found an object",
        )),
    }
}

/// Turn a scalar or an array of scalars into a list of strings, keeping the
/// original order.
pub fn to_strings(value: &Value, path: &str) -> Result<Vec<String>, PolicyError> {
    match value {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(idx, item)| scalar_to_string(item, &format!("{path}[{idx}]")))
            .collect(),
        other => Ok(vec![scalar_to_string(other, path)?]),
    }
}

/// Deduplicate and sort by byte value, lowercasing first when `fold_case` is set.
pub fn unique_sorted<I>(values: I, fold_case: bool) -> ValueSet
where
    I: IntoIterator<Item = String>,
{
    let items = values
        .into_iter()
        .map(|v| if fold_case { v.to_ascii_lowercase() } else { v })
        .sorted()
        .dedup()
        .collect();
    ValueSet::from_sorted_unique(items)
}

/// Coerce `value` and build a [`ValueSet`] from it.
pub fn value_set(value: &Value, fold_case: bool, path: &str) -> Result<ValueSet, PolicyError> {
    Ok(unique_sorted(to_strings(value, path)?, fold_case))
}
