//! Shared graph traversal abstraction.
//!
//! Used by the trait hierarchy to close a type's implemented traits over
//! their supertraits.

use std::collections::{HashSet, VecDeque};
use std::hash::Hash;

/// Breadth-first reachability over any adjacency structure.
///
/// # Example
/// ```ignore
/// impl GraphTraversal for TraitHierarchy {
///     type Node = String;
///
///     fn neighbors(&self, node: &String) -> Vec<String> {
///         self.supertraits_of(node).to_vec()
///     }
///
///     fn contains_node(&self, node: &String) -> bool {
///         self.is_declared(node)
///     }
/// }
///
/// let ancestry = hierarchy.reachable_from(implemented_traits);
/// ```
pub trait GraphTraversal {
    /// The type used to identify nodes in the graph.
    type Node: Clone + Eq + Hash;

    /// Returns all neighbors (outgoing edges) of a node.
    fn neighbors(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// Checks if the graph contains a node.
    fn contains_node(&self, node: &Self::Node) -> bool;

    /// Multi-source BFS: every node reachable from any root, roots included.
    ///
    /// Roots the graph does not contain are ignored. O(|V| + |E|).
    fn reachable_from<I>(&self, roots: I) -> HashSet<Self::Node>
    where
        I: IntoIterator<Item = Self::Node>,
    {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();

        for root in roots {
            if self.contains_node(&root) && !visited.contains(&root) {
                visited.insert(root.clone());
                queue.push_back(root);
            }
        }

        while let Some(node) = queue.pop_front() {
            for neighbor in self.neighbors(&node) {
                if !visited.contains(&neighbor) {
                    visited.insert(neighbor.clone());
                    queue.push_back(neighbor);
                }
            }
        }

        visited
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Supertrait edges keyed by trait name.
    #[derive(Default)]
    struct Supertraits {
        edges: HashMap<String, Vec<String>>,
    }

    impl Supertraits {
        fn declare(&mut self, name: &str, supers: &[&str]) {
            self.edges.insert(
                name.to_string(),
                supers.iter().map(|s| s.to_string()).collect(),
            );
        }
    }

    impl GraphTraversal for Supertraits {
        type Node = String;

        fn neighbors(&self, node: &String) -> Vec<String> {
            self.edges.get(node).cloned().unwrap_or_default()
        }

        fn contains_node(&self, node: &String) -> bool {
            self.edges.contains_key(node)
        }
    }

    #[test]
    fn test_empty_graph() {
        let graph = Supertraits::default();
        assert!(graph.reachable_from(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn test_chain_of_supertraits() {
        let mut graph = Supertraits::default();
        graph.declare("Product", &["Entity"]);
        graph.declare("Entity", &["Debug"]);

        let reachable = graph.reachable_from(["Product".to_string()]);
        assert_eq!(reachable.len(), 3);
        assert!(reachable.contains("Entity"));
        assert!(reachable.contains("Debug"));
    }

    #[test]
    fn test_cycle_terminates() {
        let mut graph = Supertraits::default();
        graph.declare("A", &["B"]);
        graph.declare("B", &["A"]);

        assert_eq!(graph.reachable_from(["A".to_string()]).len(), 2);
    }

    #[test]
    fn test_unknown_root_ignored() {
        let mut graph = Supertraits::default();
        graph.declare("A", &[]);

        let reachable = graph.reachable_from(["A".to_string(), "Missing".to_string()]);
        assert_eq!(reachable.len(), 1);
        assert!(reachable.contains("A"));
    }
}
