//! The canonical policy document.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::error::PolicyError;
use crate::field::PolicyField;

use super::statement::{Statement, lookup, optional_string};

/// A canonicalized IAM or resource-based policy.
///
/// Two documents with the same meaning produce equal `Policy` values and
/// byte-identical serializations.
#[derive(Debug, Clone, Default, Serialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "PascalCase")]
pub struct Policy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub version: String,
    /// Statements in document order; order is never changed.
    #[serde(rename = "Statement")]
    pub statements: Vec<Statement>,
}

impl Policy {
    /// Build a policy from an already decoded JSON document.
    pub fn from_json(value: &Value) -> Result<Self, PolicyError> {
        let Value::Object(object) = value else {
            return Err(PolicyError::schema("$", "expected a policy object"));
        };

        Ok(Policy {
            id: optional_string(object, PolicyField::Id, "")?,
            version: optional_string(object, PolicyField::Version, "")?.unwrap_or_default(),
            statements: match lookup(object, PolicyField::Statement) {
                Some(statements) => statements_from_json(statements)?,
                None => Vec::new(),
            },
        })
    }

    /// The canonical form as a JSON value.
    pub fn to_json(&self) -> Result<Value, PolicyError> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Deserialization runs the same canonicalization as `canonicalize_document`.
impl<'de> Deserialize<'de> for Policy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Policy::from_json(&value).map_err(serde::de::Error::custom)
    }
}

/// Accept a single statement object or an array of them; array order is kept.
pub fn statements_from_json(value: &Value) -> Result<Vec<Statement>, PolicyError> {
    let path = PolicyField::Statement.as_ref();
    match value {
        Value::Object(_) => Ok(vec![Statement::from_json(value, path)?]),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(idx, item)| Statement::from_json(item, &format!("{path}[{idx}]")))
            .collect(),
        _ => Err(PolicyError::schema(
            path,
            "expected a statement object or an array of statements",
        )),
    }
}

impl FromStr for Policy {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::canonicalize::canonicalize_policy(s)
    }
}

/// Compact canonical JSON.
impl Display for Policy {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        // Serialize the struct directly so keys keep field order.
        let text = serde_json::to_string(self).map_err(|_| std::fmt::Error)?;
        f.write_str(&text)
    }
}
