//! Deduplicated, sorted string sets.

use std::ops::Deref;

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// A set of strings kept as a sorted list with no duplicates.
///
/// Serializes as a plain JSON array, even when the source field held a
/// single scalar.
#[derive(Debug, Clone, Default, Serialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ValueSet(Vec<String>);

impl ValueSet {
    /// Wrap a list that is already sorted ascending and duplicate free.
    pub(crate) fn from_sorted_unique(items: Vec<String>) -> Self {
        debug_assert!(items.windows(2).all(|w| w[0] < w[1]));
        ValueSet(items)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, value: &str) -> bool {
        self.0
            .binary_search_by(|probe| probe.as_str().cmp(value))
            .is_ok()
    }

    /// Union of two sets, still sorted and unique.
    pub(crate) fn union(self, other: ValueSet) -> ValueSet {
        crate::coerce::unique_sorted(self.0.into_iter().chain(other.0), false)
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

/// Stored sets are re-sorted on the way in so the invariant holds for any input.
impl<'de> Deserialize<'de> for ValueSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let items = Vec::<String>::deserialize(deserializer)?;
        Ok(crate::coerce::unique_sorted(items, false))
    }
}

impl Deref for ValueSet {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a> IntoIterator for &'a ValueSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
