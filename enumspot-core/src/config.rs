//! Configuration loading from enumspot.toml.
//!
//! ```toml
//! parent_types = ["Entity"]
//! non_enum_prefixes = ["LEGACY"]
//! extend_default_prefixes = true
//! enum_namespace = "enums"
//! exempt_namespace = "rules::enums"
//! separator = "_"
//! ignore = ["generated"]
//!
//! [output]
//! format = "json"
//! ```
//!
//! Every key is optional; missing keys fall back to the rule defaults.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};

use crate::cluster::NonEnumPrefixes;
use crate::error::{EnumspotError, EnumspotResult};
use crate::rule::EmbeddedEnumConfig;

/// Name of the configuration file looked up at the crate root.
pub const CONFIG_FILE_NAME: &str = "enumspot.toml";

/// Main configuration structure for enumspot.toml.
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct EnumspotConfig {
    /// Traits whose implementors are checked.
    pub parent_types: Option<Vec<String>>,
    /// Prefixes never reported.
    pub non_enum_prefixes: Option<Vec<String>>,
    /// Keep the built-in deny-list and add `non_enum_prefixes` to it
    /// (default), or replace it.
    pub extend_default_prefixes: Option<bool>,
    /// Module path marking enum code; `""` disables the exemption.
    pub enum_namespace: Option<String>,
    /// Module path checked even inside the enum namespace; `""` disables it.
    pub exempt_namespace: Option<String>,
    /// Single-character prefix separator.
    pub separator: Option<String>,
    /// Module path patterns to ignore.
    pub ignore: Option<Vec<String>>,
    /// Output configuration.
    pub output: Option<OutputConfig>,
}

/// Output format configuration.
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Output format: "plain" or "json".
    pub format: Option<String>,
}

impl EnumspotConfig {
    /// Whether the file asks for JSON output.
    pub fn wants_json(&self) -> bool {
        self.output
            .as_ref()
            .and_then(|o| o.format.as_deref())
            .is_some_and(|f| f.eq_ignore_ascii_case("json"))
    }

    /// Build the immutable rule configuration.
    ///
    /// `origin` is only used to label errors.
    pub fn to_rule_config(&self, origin: &Path) -> EnumspotResult<EmbeddedEnumConfig> {
        let defaults = EmbeddedEnumConfig::default();

        let separator = match &self.separator {
            None => defaults.separator,
            Some(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => c,
                    _ => {
                        return Err(EnumspotError::config(
                            origin,
                            format!("separator must be exactly one character, got {:?}", s),
                        ))
                    }
                }
            }
        };

        let extra = self.non_enum_prefixes.clone().unwrap_or_default();
        let non_enum_prefixes = if self.extend_default_prefixes.unwrap_or(true) {
            NonEnumPrefixes::default().extended(extra)
        } else {
            NonEnumPrefixes::new(extra)
        };

        let exempt_namespace = match &self.exempt_namespace {
            Some(s) if s.is_empty() => None,
            Some(s) => Some(s.clone()),
            None => defaults.exempt_namespace,
        };

        Ok(EmbeddedEnumConfig {
            parent_types: self.parent_types.clone().unwrap_or_default(),
            non_enum_prefixes,
            enum_namespace: self
                .enum_namespace
                .clone()
                .unwrap_or(defaults.enum_namespace),
            exempt_namespace,
            separator,
        })
    }
}

/// Parse configuration text.
pub fn parse_config(content: &str) -> Result<EnumspotConfig> {
    toml::from_str(content).with_context(|| format!("Invalid {}", CONFIG_FILE_NAME))
}

/// Loads configuration from enumspot.toml if it exists.
pub fn load_config(root: &Path) -> Result<Option<EnumspotConfig>> {
    let path = root.join(CONFIG_FILE_NAME);
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let cfg = parse_config(&content)?;
    Ok(Some(cfg))
}
