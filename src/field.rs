//! Key names of the IAM policy grammar.
//!
//! This module centralizes the PascalCase keys used both when reading the
//! input document and when naming paths in schema errors.

use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// A top-level policy key or a statement key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumString, EnumIter)]
pub enum PolicyField {
    Id,
    Version,
    Statement,
    Sid,
    Effect,
    Principal,
    NotPrincipal,
    Action,
    NotAction,
    Resource,
    NotResource,
    Condition,
}

impl PolicyField {
    /// Whether values of this field are compared case-insensitively by IAM.
    pub fn folds_case(&self) -> bool {
        matches!(self, Self::Action | Self::NotAction)
    }

    /// Path of this field below `parent`, e.g. `Statement[0].Action`.
    pub(crate) fn path_in(&self, parent: &str) -> String {
        if parent.is_empty() {
            self.as_ref().to_string()
        } else {
            format!("{parent}.{}", self.as_ref())
        }
    }
}
