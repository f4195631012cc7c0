//! Builder pattern API for enumspot analysis.
//!
//! ```rust,ignore
//! use enumspot_core::prelude::*;
//!
//! let result = Enumspot::load("/path/to/crate")?
//!     .parent_types(["Entity"])
//!     .non_enum_prefixes(["LEGACY"])
//!     .analyze()?;
//!
//! for d in &result.diagnostics {
//!     println!("{}:{}: {}", d.file, d.line, d.message);
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::cluster::{render_message, Cluster, NonEnumPrefixes};
use crate::config::{load_config, EnumspotConfig, CONFIG_FILE_NAME};
use crate::error::{EnumspotResult, IoResultExt};
use crate::rule::{EmbeddedEnumConfig, EmbeddedEnumRule};
use crate::scan::{
    gather_rs_files_with_excludes, module_path_for_file, relative_display, target_for_file,
    LIB_TARGET,
};
use crate::units::{
    extract_units_strict, merge_units, ClassUnit, SourceHost, TraitHierarchy,
    UnitExtractionResult,
};

/// Builder for configuring an embedded-enum analysis of one crate.
#[derive(Debug, Clone)]
pub struct Enumspot {
    /// Root path of the crate to analyze
    root: PathBuf,

    /// Rule configuration
    config: EmbeddedEnumConfig,

    /// Custom excluded directories
    excluded_dirs: Vec<String>,

    /// Ignored module path patterns
    ignored_patterns: Vec<String>,
}

impl Enumspot {
    /// Create a builder with the default rule configuration.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            config: EmbeddedEnumConfig::default(),
            excluded_dirs: Vec::new(),
            ignored_patterns: Vec::new(),
        }
    }

    /// Create a builder from a parsed configuration file.
    pub fn from_config(root: impl Into<PathBuf>, file: &EnumspotConfig) -> Result<Self> {
        let root = root.into();
        let config = file.to_rule_config(&root.join(CONFIG_FILE_NAME))?;
        Ok(Self {
            root,
            config,
            excluded_dirs: Vec::new(),
            ignored_patterns: file.ignore.clone().unwrap_or_default(),
        })
    }

    /// Create a builder from `enumspot.toml` at the root, or defaults when
    /// the file is absent.
    pub fn load(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        match load_config(&root)? {
            Some(file) => Self::from_config(root, &file),
            None => Ok(Self::new(root)),
        }
    }

    /// Add traits whose implementors are checked.
    pub fn parent_types(mut self, types: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.config
            .parent_types
            .extend(types.into_iter().map(Into::into));
        self
    }

    /// Add prefixes that are never reported.
    pub fn non_enum_prefixes(mut self, prefixes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.config.non_enum_prefixes = self.config.non_enum_prefixes.extended(prefixes);
        self
    }

    /// Replace the deny-list, built-in defaults included.
    pub fn replace_non_enum_prefixes(
        mut self,
        prefixes: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.config.non_enum_prefixes = NonEnumPrefixes::new(prefixes);
        self
    }

    /// Set the enum namespace; an empty string disables the exemption.
    pub fn enum_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.config.enum_namespace = namespace.into();
        self
    }

    /// Set or clear the namespace checked even inside the enum namespace.
    pub fn exempt_namespace(mut self, namespace: Option<String>) -> Self {
        self.config.exempt_namespace = namespace;
        self
    }

    /// Set the prefix separator.
    pub fn separator(mut self, separator: char) -> Self {
        self.config.separator = separator;
        self
    }

    /// Add directories to exclude from scanning.
    pub fn exclude_dirs(mut self, dirs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.excluded_dirs.extend(dirs.into_iter().map(Into::into));
        self
    }

    /// Add module path patterns to ignore (`prefix*`, `*suffix`, or substring).
    pub fn ignore_patterns(mut self, patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.ignored_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &EmbeddedEnumConfig {
        &self.config
    }

    /// Run the analysis.
    pub fn analyze(&self) -> Result<AnalysisResult> {
        // 1. Gather files
        let excludes: Vec<&str> = self.excluded_dirs.iter().map(String::as_str).collect();
        let files = gather_rs_files_with_excludes(&self.root, &excludes)
            .context("Failed to gather .rs files")?;

        // 2. Extract units per file in parallel; unreadable or broken files
        // are reported and skipped
        let extracted: Vec<(String, EnumspotResult<UnitExtractionResult>)> = files
            .par_iter()
            .map(|file| {
                let rel = relative_display(&self.root, file);
                let result = fs::read_to_string(file).with_path(&rel).and_then(|content| {
                    let module_path = module_path_for_file(&self.root, file);
                    extract_units_strict(Path::new(&rel), &module_path, &content)
                });
                (target_for_file(&self.root, file), result)
            })
            .collect();

        let mut targets: BTreeMap<String, UnitExtractionResult> = BTreeMap::new();
        let mut skipped_files = Vec::new();
        for (target, result) in extracted {
            match result {
                Ok(r) => {
                    let entry = targets.entry(target).or_default();
                    entry.units.extend(r.units);
                    entry.traits.extend(r.traits);
                }
                Err(e) if e.is_recoverable() => {
                    warn!(file = %e.path().display(), error = %e, "file skipped");
                    skipped_files.push(e.to_string());
                }
                Err(e) => return Err(e.into()),
            }
        }

        // 3. One host per compilation target. Library traits are visible to
        // every target; a test, bench, example or binary sees its own too.
        let lib_traits = targets
            .get(LIB_TARGET)
            .map(|t| t.traits.clone())
            .unwrap_or_default();
        let hosts: Vec<(SourceHost, Vec<ClassUnit>)> = targets
            .into_iter()
            .map(|(target, extracted)| {
                let mut hierarchy = TraitHierarchy::from_decls(&lib_traits);
                if target != LIB_TARGET {
                    for decl in &extracted.traits {
                        hierarchy.add(decl);
                    }
                }
                (SourceHost::new(hierarchy), merge_units(extracted.units))
            })
            .collect();
        let units_scanned: usize = hosts.iter().map(|(_, units)| units.len()).sum();

        // Classify units in parallel, each against its target's hierarchy
        let rule = EmbeddedEnumRule::new(self.config.clone());
        let pairs: Vec<(&SourceHost, &ClassUnit)> = hosts
            .iter()
            .flat_map(|(host, units)| units.iter().map(move |unit| (host, unit)))
            .collect();
        let mut diagnostics: Vec<EnumClusterDiagnostic> = pairs
            .into_par_iter()
            .filter(|(_, unit)| !self.is_ignored(unit))
            .flat_map_iter(|(host, unit)| {
                rule.classify_unit(host, unit)
                    .into_iter()
                    .map(move |cluster| EnumClusterDiagnostic::new(unit, cluster))
            })
            .collect();

        // 4. Deterministic order; stable sort keeps per-unit cluster order
        diagnostics.sort_by(|a, b| a.file.cmp(&b.file).then(a.line.cmp(&b.line)));

        info!(
            files = files.len(),
            units = units_scanned,
            diagnostics = diagnostics.len(),
            "analysis complete"
        );

        Ok(AnalysisResult {
            root: self.root.clone(),
            files_scanned: files.len(),
            units_scanned,
            skipped_files,
            diagnostics,
        })
    }

    /// Check if a unit's module path matches any ignored pattern.
    fn is_ignored(&self, unit: &ClassUnit) -> bool {
        let name = format!("{}::{}", unit.module_path.join("::"), unit.name);
        let name = name.trim_start_matches("::");
        is_ignored(name, &self.ignored_patterns)
    }
}

/// Pattern match used for ignore lists: `prefix*`, `*suffix`, or substring.
pub fn is_ignored(name: &str, patterns: &[String]) -> bool {
    patterns.iter().any(|pattern| {
        if let Some(prefix) = pattern.strip_suffix('*') {
            name.starts_with(prefix)
        } else if let Some(suffix) = pattern.strip_prefix('*') {
            name.ends_with(suffix)
        } else {
            name == pattern || name.contains(pattern.as_str())
        }
    })
}

/// One reported constant family, located in source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumClusterDiagnostic {
    /// File containing the unit, relative to the crate root
    pub file: String,
    /// Line of the unit (1-indexed)
    pub line: usize,
    /// Fully-qualified unit name
    pub unit: String,
    /// Shared prefix of the constants
    pub prefix: String,
    /// The constants, in declaration order
    pub constants: Vec<String>,
    /// Rendered message
    pub message: String,
}

impl EnumClusterDiagnostic {
    pub fn new(unit: &ClassUnit, cluster: Cluster) -> Self {
        Self {
            file: unit.file.clone(),
            line: unit.line,
            unit: unit.qualified_name(),
            message: render_message(&cluster.members),
            prefix: cluster.prefix,
            constants: cluster.members,
        }
    }
}

/// Result of running an analysis.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    /// Root path that was analyzed
    pub root: PathBuf,
    /// Number of .rs files found
    pub files_scanned: usize,
    /// Number of units extracted
    pub units_scanned: usize,
    /// Files that could not be read or parsed, with the reason
    pub skipped_files: Vec<String>,
    /// Reported families, sorted by file then line
    pub diagnostics: Vec<EnumClusterDiagnostic>,
}

impl AnalysisResult {
    pub fn has_findings(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Diagnostics of one file (relative path as reported).
    pub fn diagnostics_for<'a>(
        &'a self,
        file: &'a str,
    ) -> impl Iterator<Item = &'a EnumClusterDiagnostic> + 'a {
        self.diagnostics.iter().filter(move |d| d.file == file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn create_test_crate() -> PathBuf {
        let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir()
            .join("enumspot_builder_test")
            .join(format!("{}_{}", std::process::id(), id));

        if dir.exists() {
            fs::remove_dir_all(&dir).ok();
        }
        fs::create_dir_all(dir.join("src/model")).expect("Failed to create test directory");

        fs::write(
            dir.join("Cargo.toml"),
            "[package]\nname = \"shop\"\nversion = \"0.1.0\"",
        )
        .expect("Failed to write Cargo.toml");

        fs::write(
            dir.join("src/lib.rs"),
            "pub mod model;\npub trait Entity {}\n",
        )
        .expect("Failed to write lib.rs");

        fs::write(dir.join("src/model/mod.rs"), "pub mod product;\n")
            .expect("Failed to write mod.rs");

        fs::write(
            dir.join("src/model/product.rs"),
            r#"use crate::Entity;

pub struct Product;

impl Entity for Product {}

impl Product {
    pub const STATUS_ENABLED: u8 = 1;
    pub const STATUS_DISABLED: u8 = 0;
    pub const MAX_PRICE: u32 = 10;
    pub const MAX_ITEMS: u32 = 10;
}
"#,
        )
        .expect("Failed to write product.rs");

        dir
    }

    #[test]
    fn test_builder_basic() {
        let dir = create_test_crate();

        let result = Enumspot::new(&dir).parent_types(["Entity"]).analyze().unwrap();

        assert_eq!(result.files_scanned, 3);
        assert_eq!(result.diagnostics.len(), 1);
        let d = &result.diagnostics[0];
        assert_eq!(d.file, "src/model/product.rs");
        assert_eq!(d.line, 3);
        assert_eq!(d.unit, "crate::model::product::Product");
        assert_eq!(d.prefix, "STATUS");
        assert_eq!(d.constants, vec!["STATUS_ENABLED", "STATUS_DISABLED"]);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_builder_without_parent_types_reports_nothing() {
        let dir = create_test_crate();

        let result = Enumspot::new(&dir).analyze().unwrap();
        assert!(!result.has_findings());
        assert_eq!(result.units_scanned, 1);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_builder_non_enum_prefixes() {
        let dir = create_test_crate();

        let result = Enumspot::new(&dir)
            .parent_types(["Entity"])
            .non_enum_prefixes(["STATUS"])
            .analyze()
            .unwrap();
        assert!(!result.has_findings());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_builder_ignore_patterns() {
        let dir = create_test_crate();

        let result = Enumspot::new(&dir)
            .parent_types(["Entity"])
            .ignore_patterns(["model::*"])
            .analyze()
            .unwrap();
        assert!(!result.has_findings());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_builder_loads_config_file() {
        let dir = create_test_crate();
        fs::write(
            dir.join(CONFIG_FILE_NAME),
            "parent_types = [\"Entity\"]\nnon_enum_prefixes = [\"STATUS\"]\nextend_default_prefixes = false\n",
        )
        .unwrap();

        let result = Enumspot::load(&dir).unwrap().analyze().unwrap();
        // STATUS denied, MAX allowed once the defaults are replaced
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].prefix, "MAX");

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_broken_file_is_skipped() {
        let dir = create_test_crate();
        fs::write(dir.join("src/broken.rs"), "impl {").unwrap();

        let result = Enumspot::new(&dir).parent_types(["Entity"]).analyze().unwrap();
        assert_eq!(result.skipped_files.len(), 1);
        assert_eq!(result.diagnostics.len(), 1);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_is_ignored_patterns() {
        let patterns = vec!["gen*".to_string(), "*Dto".to_string(), "legacy".to_string()];
        assert!(is_ignored("generated::Product", &patterns));
        assert!(is_ignored("api::ProductDto", &patterns));
        assert!(is_ignored("shop::legacy::Cart", &patterns));
        assert!(!is_ignored("shop::Cart", &patterns));
    }
}
