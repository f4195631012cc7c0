//! Deny-list of prefixes that never denote an enum family.
//!
//! Words like `MAX`/`MIN` (bounds), `HAS`/`IS` (flags) or `PUBLIC` (visibility)
//! group constants by role, not by value set. A cluster keyed by one of them
//! is not reported regardless of its size.

use std::collections::HashSet;

/// Generic prefixes excluded unless the configuration replaces the list.
pub const DEFAULT_NON_ENUM_PREFIXES: &[&str] = &[
    "DEFAULT",
    "MAX",
    "MIN",
    "HAS",
    "IS",
    "ERROR",
    "PUBLIC",
    "PRIVATE",
    "PROTECTED",
    "HTTP",
    "FILE",
    "PATH",
];

/// Immutable deny-list consulted by the enum-candidate filter.
///
/// Built once from configuration and shared by reference; lookups are exact
/// and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEnumPrefixes {
    prefixes: HashSet<String>,
}

impl Default for NonEnumPrefixes {
    fn default() -> Self {
        Self::new(DEFAULT_NON_ENUM_PREFIXES.iter().copied())
    }
}

impl NonEnumPrefixes {
    pub fn new(prefixes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// A deny-list that lets every prefix through.
    pub fn empty() -> Self {
        Self {
            prefixes: HashSet::new(),
        }
    }

    /// Add more prefixes on top of the current list.
    pub fn extended(mut self, extra: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.prefixes.extend(extra.into_iter().map(Into::into));
        self
    }

    /// True when `prefix` is on the deny-list.
    pub fn is_non_enum_prefix(&self, prefix: &str) -> bool {
        self.prefixes.contains(prefix)
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Sorted copy of the list, for reports and rule documentation.
    pub fn to_sorted_vec(&self) -> Vec<String> {
        let mut v: Vec<String> = self.prefixes.iter().cloned().collect();
        v.sort();
        v
    }
}
