//! Capability tags and the capability-provider contract.
//!
//! Tasks and responders arrive from different upstream sources (intake
//! forms, roster feeds, mission packages). Scoring only needs "a set of
//! tags" from each side, so anything implementing [`CapabilityProvider`]
//! can be matched without sharing a type hierarchy.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// An ordered set of capability tags (e.g., "medic", "hazmat", "driver").
///
/// Backed by a `BTreeSet` so iteration order (and therefore any output
/// derived from it) is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilitySet(BTreeSet<String>);

impl CapabilitySet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a tag, returning the set for chaining.
    pub fn with(mut self, tag: impl Into<String>) -> Self {
        self.0.insert(tag.into());
        self
    }

    /// Inserts a tag. Returns `false` if it was already present.
    pub fn insert(&mut self, tag: impl Into<String>) -> bool {
        self.0.insert(tag.into())
    }

    /// Whether the tag is present.
    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    /// Number of tags.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set has no tags.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates tags in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Whether every tag in `self` is also in `other`.
    pub fn is_subset_of(&self, other: &CapabilitySet) -> bool {
        self.0.is_subset(&other.0)
    }

    /// Returns the first tag that is empty or whitespace-only, if any.
    pub fn first_malformed(&self) -> Option<&str> {
        self.iter().find(|tag| tag.trim().is_empty())
    }
}

impl<S: Into<String>> FromIterator<S> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a CapabilitySet {
    type Item = &'a String;
    type IntoIter = std::collections::btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Anything that exposes a set of capability tags.
///
/// Implemented by [`TaskOrder`](super::TaskOrder) (required tags) and
/// [`ResponderState`](super::ResponderState) (offered tags).
pub trait CapabilityProvider {
    /// The capability tags this entity requires or offers.
    fn capabilities(&self) -> &CapabilitySet;
}

impl CapabilityProvider for CapabilitySet {
    fn capabilities(&self) -> &CapabilitySet {
        self
    }
}
