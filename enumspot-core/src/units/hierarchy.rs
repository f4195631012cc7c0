//! Crate-wide supertrait index.
//!
//! A unit's ancestry is the set of traits it implements, closed over the
//! supertraits declared anywhere in the crate. Traits are keyed by their last
//! path segment, since `impl` blocks and supertrait lists name them however
//! the local `use` statements allow; same-named traits in different modules
//! share one entry.
//!
//! Traits declared outside the crate have no entry and contribute only
//! themselves.

use std::collections::{HashMap, HashSet};

use super::unit_extractor::TraitDecl;
use crate::common::{last_segment, paths_match, GraphTraversal};

/// Supertrait edges of every trait declared in the analyzed crate.
#[derive(Debug, Clone, Default)]
pub struct TraitHierarchy {
    supertraits: HashMap<String, Vec<String>>,
}

impl TraitHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index from trait declarations of any number of files.
    pub fn from_decls<'a>(decls: impl IntoIterator<Item = &'a TraitDecl>) -> Self {
        let mut hierarchy = Self::new();
        for decl in decls {
            hierarchy.add(decl);
        }
        hierarchy
    }

    pub fn add(&mut self, decl: &TraitDecl) {
        let entry = self.supertraits.entry(decl.name.clone()).or_default();
        for sup in &decl.supertraits {
            if !entry.contains(sup) {
                entry.push(sup.clone());
            }
        }
    }

    /// Number of distinct trait names indexed.
    pub fn len(&self) -> usize {
        self.supertraits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.supertraits.is_empty()
    }

    pub fn is_declared(&self, trait_path: &str) -> bool {
        self.supertraits.contains_key(last_segment(trait_path))
    }

    /// Direct supertraits of a trait, as written in its declaration.
    pub fn supertraits_of(&self, trait_path: &str) -> &[String] {
        self.supertraits
            .get(last_segment(trait_path))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Implemented traits plus every supertrait reachable from them.
    pub fn ancestry(&self, implemented: &[String]) -> HashSet<String> {
        let mut all = self.reachable_from(implemented.iter().cloned());
        all.extend(implemented.iter().cloned());
        all
    }

    /// Whether a type implementing `implemented` has `ancestor` in its
    /// ancestry.
    pub fn implements(&self, implemented: &[String], ancestor: &str) -> bool {
        self.ancestry(implemented)
            .iter()
            .any(|path| paths_match(path, ancestor))
    }
}

impl GraphTraversal for TraitHierarchy {
    type Node = String;

    fn neighbors(&self, node: &String) -> Vec<String> {
        self.supertraits_of(node).to_vec()
    }

    fn contains_node(&self, node: &String) -> bool {
        self.is_declared(node)
    }
}
