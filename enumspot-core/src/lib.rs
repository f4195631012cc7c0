//! enumspot-core: detection of enum-like constant families embedded in types
//!
//! A type implementing one of the configured parent traits that declares
//! associated constants such as `STATUS_ENABLED` and `STATUS_DISABLED` is
//! carrying an enumeration inline. This library finds those families and
//! reports them, one diagnostic per family.
//!
//! # Features
//!
//! - **Prefix clustering**: Group constant names by the text before their
//!   last separator
//! - **Deny-list**: Never report prefixes such as `MAX` or `DEFAULT`
//! - **Ancestry check**: Only implementors of the parent traits, directly or
//!   through declared supertraits, are checked
//! - **Enum namespace skip**: Types under an `enums` module are exempt
//! - **Workspace support**: Analyze entire Cargo workspaces
//!
//! # Quick Start
//!
//! Use the [`prelude`] module for convenient imports:
//!
//! ```rust,ignore
//! use enumspot_core::prelude::*;
//!
//! let result = Enumspot::load("/path/to/crate")?
//!     .parent_types(["Entity"])
//!     .analyze()?;
//!
//! for d in &result.diagnostics {
//!     println!("{}:{}: {}", d.file, d.line, d.message);
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`cluster`]: Prefix matching, deny-list and message rendering
//! - [`rule`]: The rule orchestrator and its host abstraction
//! - [`units`]: Rust source model (types, constants, trait hierarchy)
//! - [`scan`]: Parallel file discovery and module paths
//! - [`builder`]: Fluent builder API for configuration
//! - [`config`]: `enumspot.toml` loading
//! - [`error`]: Typed error handling

pub mod builder;
pub mod cluster;
pub mod common;
pub mod config;
pub mod error;
pub mod logging;
pub mod prelude;
pub mod report;
pub mod rule;
pub mod scan;
pub mod units;
pub mod workspace;

// ============================================================================
// Explicit Re-exports (avoiding glob imports for clear API surface)
// ============================================================================

// Error types
pub use error::{EnumspotError, EnumspotResult, IoResultExt};

// Builder API
pub use builder::{is_ignored, AnalysisResult, EnumClusterDiagnostic, Enumspot};

// Configuration
pub use config::{load_config, parse_config, EnumspotConfig, OutputConfig, CONFIG_FILE_NAME};

// Clustering
pub use cluster::{
    render_message, render_messages, Cluster, NonEnumPrefixes, PrefixClusters, PrefixMatcher,
    DEFAULT_NON_ENUM_PREFIXES, DEFAULT_SEPARATOR, ERROR_MESSAGE,
};

// Rule
pub use rule::{
    ConfiguredCodeSample, EmbeddedEnumConfig, EmbeddedEnumRule, RuleDefinition, UnitHost,
    DEFAULT_ENUM_NAMESPACE, DEFAULT_EXEMPT_NAMESPACE, RULE_NAME,
};

// Source model
pub use units::{
    extract_units, extract_units_strict, merge_units, ClassUnit, SourceHost, TraitDecl, TraitHierarchy,
    UnitExtractionResult,
};

// Logging
pub use logging::init_structured_logging;

// Reporting
pub use report::{format_json, format_plain, print_json, print_plain};

// File scanning
pub use scan::{
    gather_rs_files, gather_rs_files_with_excludes, module_path_for_file,
    normalize_path_string, relative_display, target_for_file, LIB_TARGET,
};

// Workspace analysis
pub use workspace::{
    analyze_crate, analyze_crate_with, analyze_workspace, analyze_workspace_with,
    find_all_crates, find_crate_root, is_workspace_root, CrateAnalysis,
};

// Common trait re-exports
pub use common::GraphTraversal;
