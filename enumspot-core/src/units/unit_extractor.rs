//! Class-like unit extraction from Rust AST.
//!
//! A unit is a named type together with what its `impl` blocks declare:
//! - `struct`, `enum` and `union` items
//! - self types of `impl` blocks whose type is declared elsewhere
//!
//! For every unit the extractor records the associated constants of its
//! inherent `impl` blocks in source order and the traits it implements.
//! Constants of trait impls are not recorded, the trait dictates them.
//! Trait declarations are collected as well, with their supertraits, to
//! feed the crate-wide [`TraitHierarchy`](super::hierarchy::TraitHierarchy).
//!
//! Items nested inside function bodies are not visited.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use syn::{visit::Visit, File, ImplItem, Item, ItemImpl, ItemMod, ItemTrait, TypeParamBound};
use tracing::warn;

use crate::common::{qualified_name, syn_path_string, ModulePathBuilder};
use crate::error::{EnumspotError, EnumspotResult};

/// A scanned class-like unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassUnit {
    /// Type name
    pub name: String,
    /// Module path components, file module path included
    pub module_path: Vec<String>,
    /// Source file path
    pub file: String,
    /// Line of the type name (1-indexed), or of the first `impl` when the
    /// type is declared in another file
    pub line: usize,
    /// Associated constants of inherent impls, in declaration order
    pub constants: Vec<String>,
    /// Trait paths as written in `impl Trait for Type`
    pub implemented_traits: Vec<String>,
    /// Whether the type itself is declared here, not only implemented
    #[serde(default)]
    pub declared: bool,
}

impl ClassUnit {
    /// `crate::<module path>::<name>`.
    pub fn qualified_name(&self) -> String {
        qualified_name(&self.module_path, &self.name)
    }
}

/// A trait declaration and its direct supertraits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitDecl {
    pub name: String,
    /// `crate::<module path>::<name>`
    pub qualified_name: String,
    /// Supertrait paths as written in `trait Name: A + b::B`
    pub supertraits: Vec<String>,
}

/// Everything extracted from one file.
#[derive(Debug, Clone, Default)]
pub struct UnitExtractionResult {
    pub units: Vec<ClassUnit>,
    pub traits: Vec<TraitDecl>,
}

/// AST visitor that collects units and trait declarations.
struct UnitExtractor {
    file_path: String,
    current_mod: Vec<String>,
    units: Vec<ClassUnit>,
    /// (module path, type name) -> index into `units`
    index: HashMap<(Vec<String>, String), usize>,
    traits: Vec<TraitDecl>,
}

impl ModulePathBuilder for UnitExtractor {
    fn current_mod(&self) -> &[String] {
        &self.current_mod
    }
}

impl UnitExtractor {
    fn new(file_path: String, base_module: &[String]) -> Self {
        Self {
            file_path,
            current_mod: base_module.to_vec(),
            units: Vec::with_capacity(8),
            index: HashMap::new(),
            traits: Vec::new(),
        }
    }

    /// Unit for `name` in the current module, created at `line` if new.
    fn unit_mut(&mut self, name: &str, line: usize) -> &mut ClassUnit {
        let key = (self.current_mod.clone(), name.to_string());
        let idx = match self.index.get(&key) {
            Some(&idx) => idx,
            None => {
                self.units.push(ClassUnit {
                    name: name.to_string(),
                    module_path: self.current_mod.clone(),
                    file: self.file_path.clone(),
                    line,
                    constants: Vec::new(),
                    implemented_traits: Vec::new(),
                    declared: false,
                });
                let idx = self.units.len() - 1;
                self.index.insert(key, idx);
                idx
            }
        };
        &mut self.units[idx]
    }

    /// A type declaration pins the unit's line to the type name, even when
    /// an `impl` came first.
    fn record_type(&mut self, ident: &syn::Ident) {
        let line = ident.span().start().line;
        let unit = self.unit_mut(&ident.to_string(), line);
        unit.line = line;
        unit.declared = true;
    }

    fn record_impl(&mut self, item: &ItemImpl) {
        let Some(type_name) = self_type_name(&item.self_ty) else {
            return;
        };
        let line = item.impl_token.span.start().line;

        match &item.trait_ {
            // impl !Send for T {}
            Some((Some(_), _, _)) => {}
            Some((None, path, _)) => {
                let trait_path = syn_path_string(path);
                let unit = self.unit_mut(&type_name, line);
                if !unit.implemented_traits.contains(&trait_path) {
                    unit.implemented_traits.push(trait_path);
                }
            }
            None => {
                let constants = item.items.iter().filter_map(|impl_item| match impl_item {
                    ImplItem::Const(c) => Some(c.ident.to_string()),
                    _ => None,
                });
                let constants: Vec<String> = constants.collect();
                self.unit_mut(&type_name, line).constants.extend(constants);
            }
        }
    }

    fn record_trait(&mut self, item: &ItemTrait) {
        let supertraits = item
            .supertraits
            .iter()
            .filter_map(|bound| match bound {
                TypeParamBound::Trait(t) => Some(syn_path_string(&t.path)),
                _ => None,
            })
            .collect();

        let name = item.ident.to_string();
        self.traits.push(TraitDecl {
            qualified_name: self.build_qualified_name(&name),
            name,
            supertraits,
        });
    }
}

impl<'ast> Visit<'ast> for UnitExtractor {
    fn visit_item(&mut self, item: &'ast Item) {
        match item {
            Item::Struct(s) => self.record_type(&s.ident),
            Item::Enum(e) => self.record_type(&e.ident),
            Item::Union(u) => self.record_type(&u.ident),
            Item::Impl(i) => self.record_impl(i),
            Item::Trait(t) => self.record_trait(t),

            Item::Mod(ItemMod {
                ident,
                content: Some((_, items)),
                ..
            }) => {
                self.current_mod.push(ident.to_string());
                for i in items {
                    self.visit_item(i);
                }
                self.current_mod.pop();
            }

            _ => {}
        }
    }
}

/// Name of an impl's self type: the last path segment, generics dropped.
/// Returns `None` for references, tuples, slices and other non-path types.
fn self_type_name(ty: &syn::Type) -> Option<String> {
    match ty {
        syn::Type::Path(p) if p.qself.is_none() => {
            p.path.segments.last().map(|s| s.ident.to_string())
        }
        syn::Type::Group(g) => self_type_name(&g.elem),
        syn::Type::Paren(p) => self_type_name(&p.elem),
        _ => None,
    }
}

/// Extract units and trait declarations, failing on syntax errors.
///
/// `base_module` is the file's own module path (see
/// [`module_path_for_file`](crate::scan::module_path_for_file)).
pub fn extract_units_strict(
    path: &Path,
    base_module: &[String],
    content: &str,
) -> EnumspotResult<UnitExtractionResult> {
    let ast: File = syn::parse_file(content).map_err(|e| EnumspotError::from_syn(path, &e))?;

    let mut extractor = UnitExtractor::new(path.display().to_string(), base_module);
    extractor.visit_file(&ast);

    Ok(UnitExtractionResult {
        units: extractor.units,
        traits: extractor.traits,
    })
}

/// Extract units and trait declarations.
///
/// On parse error, logs a warning and returns an empty result.
pub fn extract_units(path: &Path, base_module: &[String], content: &str) -> UnitExtractionResult {
    match extract_units_strict(path, base_module, content) {
        Ok(result) => result,
        Err(e) => {
            warn!(file = %path.display(), error = %e, "AST parse failed, file skipped");
            UnitExtractionResult::default()
        }
    }
}
