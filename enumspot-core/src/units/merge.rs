//! Cross-file unit merging.
//!
//! Extraction is per file, so `impl Product { .. }` in `consts.rs` yields a
//! unit separate from `pub struct Product;` in `model.rs`. Merging folds
//! such impl-only units into the unit that declares the type:
//!
//! - same qualified name first, then a unique declaration with that name
//! - constants are concatenated in input (file) order
//! - implemented traits are unioned
//! - file, line and module path come from the declaration
//!
//! Impl-only units with no matching declaration, or with several candidate
//! declarations, stay as they are.

use std::collections::HashMap;

use super::unit_extractor::ClassUnit;

/// Merge units of one crate target. `units` must be in file order.
pub fn merge_units(units: Vec<ClassUnit>) -> Vec<ClassUnit> {
    let mut by_path: HashMap<String, usize> = HashMap::new();
    let mut by_name: HashMap<&str, Vec<usize>> = HashMap::new();
    for (idx, unit) in units.iter().enumerate().filter(|(_, u)| u.declared) {
        by_path.entry(unit.qualified_name()).or_insert(idx);
        by_name.entry(unit.name.as_str()).or_default().push(idx);
    }

    let targets: Vec<usize> = units
        .iter()
        .enumerate()
        .map(|(idx, unit)| {
            if unit.declared {
                return idx;
            }
            if let Some(&target) = by_path.get(&unit.qualified_name()) {
                return target;
            }
            match by_name.get(unit.name.as_str()) {
                Some(candidates) if candidates.len() == 1 => candidates[0],
                _ => idx,
            }
        })
        .collect();

    let mut constants: Vec<Vec<String>> = vec![Vec::new(); units.len()];
    let mut traits: Vec<Vec<String>> = vec![Vec::new(); units.len()];
    for (unit, &target) in units.iter().zip(&targets) {
        constants[target].extend(unit.constants.iter().cloned());
        for t in &unit.implemented_traits {
            if !traits[target].contains(t) {
                traits[target].push(t.clone());
            }
        }
    }

    units
        .into_iter()
        .enumerate()
        .filter(|(idx, _)| targets[*idx] == *idx)
        .map(|(idx, mut unit)| {
            unit.constants = std::mem::take(&mut constants[idx]);
            unit.implemented_traits = std::mem::take(&mut traits[idx]);
            unit
        })
        .collect()
}
