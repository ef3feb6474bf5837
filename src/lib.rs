//! Canonicalization of AWS IAM and resource-based policy documents.
//!
//! Policies that mean the same thing but are written differently (scalar vs.
//! array values, mixed case actions, duplicates, reordered values) produce
//! equal [`Policy`] values and byte-identical serializations.

pub use canonicalize::{
    canonicalize_document, canonicalize_escaped_policy, canonicalize_inline_policies,
    canonicalize_policy,
};
pub use error::PolicyError;
pub use escape::{escape_for_log, unescape_policy};
pub use field::PolicyField;
pub use types::{
    CanonicalInlinePolicy, ConditionBlock, InlinePolicy, Policy, Principal, Statement, ValueSet,
};

pub mod coerce;
mod canonicalize;
mod error;
mod escape;
mod field;
pub mod types;

#[cfg(test)]
mod tests;
