//! Module path bookkeeping and `::`-path helpers for AST extraction.

/// Trait for extractors that track the current module hierarchy while
/// walking a file.
pub trait ModulePathBuilder {
    /// Returns the current module path components.
    fn current_mod(&self) -> &[String];

    /// Builds the current module path as a `::` separated string.
    ///
    /// # Example
    /// If `current_mod()` returns `["model", "billing"]`,
    /// this returns `"model::billing"`.
    fn build_module_path(&self) -> String {
        self.current_mod().join("::")
    }

    /// Builds the fully-qualified `crate::...::name` path of an item
    /// declared in the current module.
    fn build_qualified_name(&self, name: &str) -> String {
        qualified_name(self.current_mod(), name)
    }
}

/// `crate::<modules>::<name>`.
pub fn qualified_name(modules: &[String], name: &str) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(modules.len() + 2);
    parts.push("crate");
    parts.extend(modules.iter().map(String::as_str));
    parts.push(name);
    parts.join("::")
}

/// Render a `syn::Path` as `a::b::C`, dropping generic arguments and any
/// leading `::`.
pub fn syn_path_string(path: &syn::Path) -> String {
    path.segments
        .iter()
        .map(|s| s.ident.to_string())
        .collect::<Vec<_>>()
        .join("::")
}

/// Last `::` segment of a path string.
pub fn last_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}

/// Whether two type paths refer to the same item as far as text can tell.
///
/// Equal paths match, and a path matches any longer path it is a `::`-suffix
/// of: `Entity` matches `crate::model::Entity`, `model::Entity` matches
/// `crate::model::Entity`, but `Entity` does not match `BaseEntity`.
pub fn paths_match(a: &str, b: &str) -> bool {
    let a = a.trim_start_matches("::");
    let b = b.trim_start_matches("::");
    if a == b {
        return true;
    }
    let (short, long) = if a.len() < b.len() { (a, b) } else { (b, a) };
    long.strip_suffix(short)
        .is_some_and(|head| head.ends_with("::"))
}
