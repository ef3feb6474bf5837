//! Inline policies as returned by `GetUserPolicy`/`GetRolePolicy`-style listings.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::policy::Policy;

/// A named inline policy whose document is already decoded JSON.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct InlinePolicy {
    pub policy_name: String,
    pub policy_document: Value,
}

impl InlinePolicy {
    pub fn new(policy_name: impl Into<String>, policy_document: Value) -> Self {
        InlinePolicy {
            policy_name: policy_name.into(),
            policy_document,
        }
    }
}

/// An inline policy with its document canonicalized.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "PascalCase")]
pub struct CanonicalInlinePolicy {
    pub policy_name: String,
    pub policy_document: Policy,
}
