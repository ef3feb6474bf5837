//! The `Condition` block of a statement.
//!
//! Shape: operator -> condition key -> values. Operators keep their case,
//! condition keys are folded to lowercase, and values are stringified but
//! keep their case. Values are treated the same way for every operator
//! family (string, numeric, date, ARN, boolean).

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::coerce;
use crate::error::PolicyError;

use super::value_set::ValueSet;

#[derive(Debug, Clone, Default, Serialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ConditionBlock(BTreeMap<String, BTreeMap<String, ValueSet>>);

impl ConditionBlock {
    pub fn from_json(value: &Value, path: &str) -> Result<Self, PolicyError> {
        let Value::Object(operators) = value else {
            return Err(PolicyError::schema(
                path,
                "expected an object of condition operators",
            ));
        };

        let mut block = BTreeMap::new();
        for (operator, keys) in operators {
            let operator_path = format!("{path}.{operator}");
            let Value::Object(keys) = keys else {
                return Err(PolicyError::schema(
                    operator_path,
                    "expected an object of condition keys",
                ));
            };

            let mut entries: BTreeMap<String, ValueSet> = BTreeMap::new();
            for (key, values) in keys {
                let set = coerce::value_set(values, false, &format!("{operator_path}.{key}"))?;
                // Keys differing only in case name the same context key.
                let folded = key.to_ascii_lowercase();
                let merged = match entries.remove(&folded) {
                    Some(existing) => existing.union(set),
                    None => set,
                };
                entries.insert(folded, merged);
            }
            block.insert(operator.clone(), entries);
        }

        Ok(ConditionBlock(block))
    }

    pub fn get(&self, operator: &str, key: &str) -> Option<&ValueSet> {
        self.0.get(operator)?.get(&key.to_ascii_lowercase())
    }

    pub fn operators(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Deserialization runs the same canonicalization as `ConditionBlock::from_json`.
impl<'de> Deserialize<'de> for ConditionBlock {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        ConditionBlock::from_json(&value, "Condition").map_err(serde::de::Error::custom)
    }
}
