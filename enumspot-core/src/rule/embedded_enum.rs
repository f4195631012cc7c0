//! The embedded-enum rule: spot constant families that want to be an enum.
//!
//! ```text
//! impl Product {                      enum ProductStatus {
//!     const STATUS_ENABLED: u8 = 1;       Enabled = 1,
//!     const STATUS_DISABLED: u8 = 0;  =>  Disabled = 0,
//! }                                   }
//! ```
//!
//! Per unit the rule runs a fixed pipeline:
//!
//! 1. skip check (enum namespace, interesting ancestry)
//! 2. constant extraction through the host
//! 3. prefix clustering
//! 4. filtering: fewer than two members, then the deny-list
//! 5. rendering, one message per surviving cluster
//!
//! The rule holds only immutable configuration, so one instance can serve any
//! number of units from any number of threads.

use tracing::debug;

use super::host::UnitHost;
use crate::cluster::{render_messages, Cluster, NonEnumPrefixes, PrefixMatcher, DEFAULT_SEPARATOR};

/// Module segment that marks code already living in an enum namespace.
pub const DEFAULT_ENUM_NAMESPACE: &str = "enums";

/// Namespace excluded from the enum-namespace exemption.
pub const DEFAULT_EXEMPT_NAMESPACE: &str = "rules::enums";

/// Immutable configuration of [`EmbeddedEnumRule`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedEnumConfig {
    /// Only units with one of these ancestors are checked.
    pub parent_types: Vec<String>,
    /// Prefixes never reported.
    pub non_enum_prefixes: NonEnumPrefixes,
    /// `::`-separated module path marking enum code; empty disables the exemption.
    pub enum_namespace: String,
    /// `::`-separated module path that stays checked even inside the enum namespace.
    pub exempt_namespace: Option<String>,
    /// Separator between a constant's prefix and the rest of its name.
    pub separator: char,
}

impl Default for EmbeddedEnumConfig {
    fn default() -> Self {
        Self {
            parent_types: Vec::new(),
            non_enum_prefixes: NonEnumPrefixes::default(),
            enum_namespace: DEFAULT_ENUM_NAMESPACE.to_string(),
            exempt_namespace: Some(DEFAULT_EXEMPT_NAMESPACE.to_string()),
            separator: DEFAULT_SEPARATOR,
        }
    }
}

impl EmbeddedEnumConfig {
    /// Default configuration checking units with the given ancestors.
    pub fn with_parent_types(parent_types: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            parent_types: parent_types.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

/// Orchestrates classification of one unit at a time.
#[derive(Debug, Clone)]
pub struct EmbeddedEnumRule {
    config: EmbeddedEnumConfig,
    matcher: PrefixMatcher,
}

impl EmbeddedEnumRule {
    pub fn new(config: EmbeddedEnumConfig) -> Self {
        let matcher = PrefixMatcher::new(config.separator);
        Self { config, matcher }
    }

    pub fn config(&self) -> &EmbeddedEnumConfig {
        &self.config
    }

    /// Whether the unit is exempt from the check.
    ///
    /// A unit is skipped when its name is unavailable, when it already lives
    /// in the enum namespace (outside the exempt namespace), or when none of
    /// the configured parent types is among its ancestors.
    pub fn should_skip<H: UnitHost>(&self, host: &H, unit: &H::Unit) -> bool {
        let Some(name) = host.unit_name(unit) else {
            debug!("unit without a name, skipping");
            return true;
        };

        if self.is_in_enum_namespace(&name) {
            debug!(unit = %name, "already in enum namespace, skipping");
            return true;
        }

        let interesting = self
            .config
            .parent_types
            .iter()
            .any(|parent| host.is_subclass_of(unit, parent));
        if !interesting {
            debug!(unit = %name, "no configured parent type in ancestry, skipping");
        }
        !interesting
    }

    /// Clusters of the unit that look like an implicit enumeration,
    /// in order of first appearance.
    pub fn classify_unit<H: UnitHost>(&self, host: &H, unit: &H::Unit) -> Vec<Cluster> {
        if self.should_skip(host, unit) {
            return Vec::new();
        }

        let names = host.resolve_constant_names(unit);
        let clusters: Vec<Cluster> = self
            .matcher
            .match_names(&names)
            .into_iter()
            .filter(|c| c.is_family())
            .filter(|c| !self.config.non_enum_prefixes.is_non_enum_prefix(&c.prefix))
            .collect();

        debug!(
            constants = names.len(),
            candidates = clusters.len(),
            "classified unit"
        );
        clusters
    }

    /// Rendered diagnostics for the unit; empty when the rule does not apply
    /// or the unit is clean.
    pub fn process_unit<H: UnitHost>(&self, host: &H, unit: &H::Unit) -> Vec<String> {
        render_messages(&self.classify_unit(host, unit))
    }

    fn is_in_enum_namespace(&self, fully_qualified: &str) -> bool {
        let segments = path_segments(fully_qualified);
        // The last segment names the unit itself, not a namespace.
        let modules = match segments.split_last() {
            Some((_, modules)) => modules,
            None => return false,
        };

        let enum_ns = path_segments(&self.config.enum_namespace);
        if enum_ns.is_empty() || !contains_run(modules, &enum_ns) {
            return false;
        }

        match &self.config.exempt_namespace {
            Some(exempt) => {
                let exempt = path_segments(exempt);
                exempt.is_empty() || !contains_run(modules, &exempt)
            }
            None => true,
        }
    }
}

fn path_segments(path: &str) -> Vec<&str> {
    path.split("::").filter(|s| !s.is_empty()).collect()
}

fn contains_run(haystack: &[&str], needle: &[&str]) -> bool {
    !needle.is_empty() && haystack.windows(needle.len()).any(|w| w == needle)
}
