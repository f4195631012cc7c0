//! Rust source host for the embedded-enum rule.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────┐     ┌─────────────────────┐
//! │  unit_extractor.rs  │     │    hierarchy.rs     │
//! │  ─────────────────  │     │  ─────────────────  │
//! │  Types, inherent    │ ──▶ │  Supertrait index   │
//! │  consts, impls,     │     │  across all files   │
//! │  trait declarations │     │                     │
//! └──────────┬──────────┘     └──────────┬──────────┘
//!            │                           │
//!            └───────────┬───────────────┘
//!                        ▼
//!            ┌─────────────────────┐
//!            │   source_host.rs    │
//!            │  ─────────────────  │
//!            │  UnitHost for       │
//!            │  ClassUnit          │
//!            └─────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use enumspot_core::rule::{EmbeddedEnumConfig, EmbeddedEnumRule};
//! use enumspot_core::units::{extract_units, SourceHost, TraitHierarchy};
//!
//! let extracted = extract_units(&path, &module_path, &content);
//! let host = SourceHost::new(TraitHierarchy::from_decls(&extracted.traits));
//! let rule = EmbeddedEnumRule::new(EmbeddedEnumConfig::with_parent_types(["Entity"]));
//!
//! for unit in &extracted.units {
//!     for message in rule.process_unit(&host, unit) {
//!         println!("{}:{}: {}", unit.file, unit.line, message);
//!     }
//! }
//! ```

pub mod hierarchy;
pub mod merge;
pub mod source_host;
pub mod unit_extractor;

pub use hierarchy::TraitHierarchy;
pub use merge::merge_units;
pub use source_host::SourceHost;
pub use unit_extractor::{
    extract_units, extract_units_strict, ClassUnit, TraitDecl, UnitExtractionResult,
};
