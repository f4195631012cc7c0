//! Identifier-cluster classification: group, filter, render.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────┐     ┌─────────────────────┐     ┌─────────────────────┐
//! │  prefix_matcher.rs  │     │    classifier.rs    │     │      render.rs      │
//! │  ─────────────────  │     │  ─────────────────  │     │  ─────────────────  │
//! │  Group names by     │ ──▶ │  Deny-list of       │ ──▶ │  One message per    │
//! │  shared prefix      │     │  generic prefixes   │     │  surviving cluster  │
//! └─────────────────────┘     └─────────────────────┘     └─────────────────────┘
//! ```
//!
//! Everything here is pure and per unit; nothing is cached between calls.

pub mod classifier;
pub mod prefix_matcher;
pub mod render;

pub use classifier::{NonEnumPrefixes, DEFAULT_NON_ENUM_PREFIXES};
pub use prefix_matcher::{Cluster, PrefixClusters, PrefixMatcher, DEFAULT_SEPARATOR};
pub use render::{render_message, render_messages, ERROR_MESSAGE};
