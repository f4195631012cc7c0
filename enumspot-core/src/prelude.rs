//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use enumspot_core::prelude::*;
//! ```
//!
//! This provides the types needed to run an analysis and read its results
//! without pulling in the building blocks.

// Core analysis types
pub use crate::error::{EnumspotError, EnumspotResult};

// Builder API
pub use crate::builder::{AnalysisResult, EnumClusterDiagnostic, Enumspot};

// Rule
pub use crate::rule::{EmbeddedEnumConfig, EmbeddedEnumRule, RuleDefinition, UnitHost};

// Configuration
pub use crate::config::{load_config, EnumspotConfig};

// File scanning
pub use crate::scan::{gather_rs_files, gather_rs_files_with_excludes};

// Workspace analysis
pub use crate::workspace::{analyze_crate, analyze_workspace, CrateAnalysis};
