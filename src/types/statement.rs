//! A single permission rule of a policy.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::coerce;
use crate::error::PolicyError;
use crate::field::PolicyField;

use super::condition::ConditionBlock;
use super::principal::Principal;
use super::value_set::ValueSet;

/// A canonical statement. `Sid` and `Effect` are kept verbatim; `Effect` is
/// not checked against `Allow`/`Deny`.
#[derive(Debug, Clone, Default, Serialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "PascalCase")]
pub struct Statement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
    pub effect: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal: Option<Principal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_principal: Option<Principal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<ValueSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_action: Option<ValueSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<ValueSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_resource: Option<ValueSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<ConditionBlock>,
}

/// Look up `field`, treating JSON `null` the same as a missing key.
pub(crate) fn lookup<'a>(
    object: &'a Map<String, Value>,
    field: PolicyField,
) -> Option<&'a Value> {
    object.get(field.as_ref()).filter(|v| !v.is_null())
}

pub(crate) fn optional_string(
    object: &Map<String, Value>,
    field: PolicyField,
    parent: &str,
) -> Result<Option<String>, PolicyError> {
    match lookup(object, field) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(PolicyError::schema(
            field.path_in(parent),
            "expected a string",
        )),
    }
}

impl Statement {
    /// Parse one statement object found at `path`. Unknown keys are ignored.
    pub fn from_json(value: &Value, path: &str) -> Result<Self, PolicyError> {
        let Value::Object(object) = value else {
            return Err(PolicyError::schema(path, "expected a statement object"));
        };

        let value_set = |field: PolicyField| -> Result<Option<ValueSet>, PolicyError> {
            lookup(object, field)
                .map(|v| coerce::value_set(v, field.folds_case(), &field.path_in(path)))
                .transpose()
        };
        let principal = |field: PolicyField| -> Result<Option<Principal>, PolicyError> {
            lookup(object, field)
                .map(|v| Principal::from_json(v, &field.path_in(path)))
                .transpose()
        };

        Ok(Statement {
            sid: optional_string(object, PolicyField::Sid, path)?,
            effect: optional_string(object, PolicyField::Effect, path)?.unwrap_or_default(),
            principal: principal(PolicyField::Principal)?,
            not_principal: principal(PolicyField::NotPrincipal)?,
            action: value_set(PolicyField::Action)?,
            not_action: value_set(PolicyField::NotAction)?,
            resource: value_set(PolicyField::Resource)?,
            not_resource: value_set(PolicyField::NotResource)?,
            condition: lookup(object, PolicyField::Condition)
                .map(|v| ConditionBlock::from_json(v, &PolicyField::Condition.path_in(path)))
                .transpose()?,
        })
    }
}

/// Deserialization runs the same canonicalization as `Statement::from_json`.
impl<'de> Deserialize<'de> for Statement {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Statement::from_json(&value, PolicyField::Statement.as_ref()).map_err(serde::de::Error::custom)
    }
}
