//! Canonical data model for IAM policy documents.
//!
//! Case rules:
//! - Action / NotAction values: folded to lowercase
//! - Resource / NotResource values: kept as-is
//! - Principal types and identifiers: kept as-is
//! - Condition operators kept as-is, condition keys folded, values kept as-is
//!
//! Every multi-valued field is a [`ValueSet`], sorted and duplicate free.
//! Statement order is kept.

mod condition;
mod inline_policy;
mod policy;
mod principal;
mod statement;
mod value_set;

pub use condition::ConditionBlock;
pub use inline_policy::{CanonicalInlinePolicy, InlinePolicy};
pub use policy::{Policy, statements_from_json};
pub use principal::{Principal, WILDCARD, WILDCARD_PRINCIPAL_TYPE};
pub use statement::Statement;
pub use value_set::ValueSet;
