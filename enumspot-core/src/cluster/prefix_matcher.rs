//! Groups sibling constant names by their shared leading segment.
//!
//! `STATUS_ENABLED` and `STATUS_DISABLED` both reduce to the prefix key
//! `STATUS` (the text before the last separator). A name without a separator
//! is its own key and still joins any cluster that reduces to the same text.
//!
//! Ordering guarantees:
//! - prefix keys iterate in the order they first appeared
//! - members keep their declaration order
//! - duplicates are passed through untouched

use indexmap::IndexMap;
use serde::Serialize;

/// Separator used by conventional `SCREAMING_SNAKE_CASE` constant names.
pub const DEFAULT_SEPARATOR: char = '_';

/// An ordered, non-empty group of names that share one prefix key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cluster {
    /// The shared prefix key
    pub prefix: String,
    /// Member names in declaration order
    pub members: Vec<String>,
}

impl Cluster {
    fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            members: Vec::with_capacity(4),
        }
    }

    /// Number of names in this cluster.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false for clusters produced by [`PrefixMatcher`].
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// A family needs at least two siblings.
    pub fn is_family(&self) -> bool {
        self.members.len() >= 2
    }
}

/// Insertion-ordered mapping from prefix key to cluster.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixClusters {
    clusters: IndexMap<String, Cluster>,
}

impl PrefixClusters {
    /// Look up the cluster for a prefix key.
    pub fn get(&self, prefix: &str) -> Option<&Cluster> {
        self.clusters.get(prefix)
    }

    /// Number of distinct prefix keys.
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Prefix keys in first-appearance order.
    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.clusters.keys().map(String::as_str)
    }

    /// Clusters in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = &Cluster> {
        self.clusters.values()
    }
}

impl IntoIterator for PrefixClusters {
    type Item = Cluster;
    type IntoIter = indexmap::map::IntoValues<String, Cluster>;

    fn into_iter(self) -> Self::IntoIter {
        self.clusters.into_values()
    }
}

/// Splits ordered name lists into prefix clusters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixMatcher {
    separator: char,
}

impl Default for PrefixMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_SEPARATOR)
    }
}

impl PrefixMatcher {
    pub fn new(separator: char) -> Self {
        Self { separator }
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    /// Prefix key of a single name: everything before the last separator,
    /// or the whole name when the separator is absent.
    pub fn prefix_key<'a>(&self, name: &'a str) -> &'a str {
        match name.rfind(self.separator) {
            Some(idx) => &name[..idx],
            None => name,
        }
    }

    /// Partition `names` into clusters keyed by prefix.
    ///
    /// The partition is total and disjoint: every input name lands in
    /// exactly one cluster, so the clusters' members together equal the
    /// input as a multiset.
    pub fn match_names<S: AsRef<str>>(&self, names: &[S]) -> PrefixClusters {
        let mut clusters: IndexMap<String, Cluster> = IndexMap::with_capacity(names.len());

        for name in names {
            let name = name.as_ref();
            let prefix = self.prefix_key(name);
            clusters
                .entry(prefix.to_string())
                .or_insert_with(|| Cluster::new(prefix))
                .members
                .push(name.to_string());
        }

        PrefixClusters { clusters }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn members(clusters: &PrefixClusters, prefix: &str) -> Vec<String> {
        clusters
            .get(prefix)
            .map(|c| c.members.clone())
            .unwrap_or_default()
    }

    #[test]
    fn test_prefix_key_uses_last_separator() {
        let matcher = PrefixMatcher::default();
        assert_eq!(matcher.prefix_key("STATUS_ENABLED"), "STATUS");
        assert_eq!(matcher.prefix_key("HTTP_STATUS_OK"), "HTTP_STATUS");
        assert_eq!(matcher.prefix_key("FOO"), "FOO");
        assert_eq!(matcher.prefix_key("TRAILING_"), "TRAILING");
        assert_eq!(matcher.prefix_key("_LEADING"), "");
    }

    #[test]
    fn test_empty_input() {
        let clusters = PrefixMatcher::default().match_names::<&str>(&[]);
        assert!(clusters.is_empty());
    }

    #[test]
    fn test_groups_by_prefix_in_first_appearance_order() {
        let names = ["B_ONE", "A_ONE", "B_TWO", "C", "A_TWO"];
        let clusters = PrefixMatcher::default().match_names(&names);

        let prefixes: Vec<&str> = clusters.prefixes().collect();
        assert_eq!(prefixes, vec!["B", "A", "C"]);
        assert_eq!(members(&clusters, "B"), vec!["B_ONE", "B_TWO"]);
        assert_eq!(members(&clusters, "A"), vec!["A_ONE", "A_TWO"]);
        assert_eq!(members(&clusters, "C"), vec!["C"]);
    }

    #[test]
    fn test_bare_name_joins_matching_cluster() {
        let names = ["MODE", "MODE_FAST"];
        let clusters = PrefixMatcher::default().match_names(&names);

        assert_eq!(clusters.len(), 1);
        assert_eq!(members(&clusters, "MODE"), vec!["MODE", "MODE_FAST"]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let names = ["X_A", "X_A"];
        let clusters = PrefixMatcher::default().match_names(&names);
        assert_eq!(members(&clusters, "X"), vec!["X_A", "X_A"]);
    }

    #[test]
    fn test_partition_is_total_multiset() {
        let names = ["A_ONE", "B", "A_TWO", "C_D_E", "B", "C_D_F", "_X"];
        let clusters = PrefixMatcher::default().match_names(&names);

        let mut expected: HashMap<&str, usize> = HashMap::new();
        for n in &names {
            *expected.entry(n).or_default() += 1;
        }

        let mut actual: HashMap<&str, usize> = HashMap::new();
        for cluster in clusters.iter() {
            assert!(!cluster.is_empty());
            for m in &cluster.members {
                *actual.entry(m.as_str()).or_default() += 1;
            }
        }

        assert_eq!(actual, expected);
    }

    #[test]
    fn test_flattened_order_is_subsequence_of_input() {
        let names = ["A_ONE", "B_ONE", "A_TWO", "B_TWO", "A_THREE"];
        let clusters = PrefixMatcher::default().match_names(&names);

        for cluster in clusters.iter() {
            let positions: Vec<usize> = cluster
                .members
                .iter()
                .map(|m| names.iter().position(|n| n == m).unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_custom_separator() {
        let matcher = PrefixMatcher::new('.');
        let clusters = matcher.match_names(&["color.red", "color.blue", "size"]);
        assert_eq!(members(&clusters, "color"), vec!["color.red", "color.blue"]);
        assert_eq!(matcher.separator(), '.');
    }

    #[test]
    fn test_into_iter_yields_clusters_in_order() {
        let clusters = PrefixMatcher::default().match_names(&["Y_1", "Z_1", "Y_2"]);
        let owned: Vec<Cluster> = clusters.into_iter().collect();
        assert_eq!(owned[0].prefix, "Y");
        assert!(owned[0].is_family());
        assert_eq!(owned[1].prefix, "Z");
        assert!(!owned[1].is_family());
    }
}
