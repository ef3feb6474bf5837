//! The `Principal` / `NotPrincipal` element of a statement.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::coerce;
use crate::error::PolicyError;

use super::value_set::ValueSet;

/// Principal type used when the whole principal is the `"*"` shorthand.
pub const WILDCARD_PRINCIPAL_TYPE: &str = "AWS";
pub const WILDCARD: &str = "*";

/// Principal identifiers keyed by principal type (`AWS`, `Service`, `Federated`,
/// `CanonicalUser`). Identifiers are ARNs and account ids, so they keep their case.
#[derive(Debug, Clone, Default, Serialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Principal(BTreeMap<String, ValueSet>);

impl Principal {
    /// `Principal: "*"`, equivalent to `{"AWS": ["*"]}`.
    pub fn wildcard() -> Self {
        let mut map = BTreeMap::new();
        map.insert(
            WILDCARD_PRINCIPAL_TYPE.to_string(),
            coerce::unique_sorted([WILDCARD.to_string()], false),
        );
        Principal(map)
    }

    pub fn from_json(value: &Value, path: &str) -> Result<Self, PolicyError> {
        match value {
            Value::String(s) if s == WILDCARD => Ok(Self::wildcard()),
            Value::Object(entries) => {
                let mut map = BTreeMap::new();
                for (kind, ids) in entries {
                    let set = coerce::value_set(ids, false, &format!("{path}.{kind}"))?;
                    map.insert(kind.clone(), set);
                }
                Ok(Principal(map))
            }
            Value::String(s) => Err(PolicyError::schema(
                path,
                format!("expected \"*\" or an object, found string {s:?}"),
            )),
            _ => Err(PolicyError::schema(
                path,
                "expected \"*\" or an object of principal types",
            )),
        }
    }

    pub fn get(&self, kind: &str) -> Option<&ValueSet> {
        self.0.get(kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_wildcard(&self) -> bool {
        *self == Self::wildcard()
    }
}

/// Deserialization runs the same canonicalization as `Principal::from_json`.
impl<'de> Deserialize<'de> for Principal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Principal::from_json(&value, "Principal").map_err(serde::de::Error::custom)
    }
}
