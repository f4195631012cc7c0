//! Self-documentation of the embedded-enum rule.

use serde::Serialize;

use super::embedded_enum::EmbeddedEnumConfig;
use crate::cluster::ERROR_MESSAGE;

/// Stable identifier of the rule, used as diagnostic code.
pub const RULE_NAME: &str = "embedded_enum_constants";

/// A before/after example together with the configuration it assumes.
#[derive(Debug, Clone, Serialize)]
pub struct ConfiguredCodeSample {
    pub bad_code: &'static str,
    pub good_code: &'static str,
    pub parent_types: Vec<String>,
}

/// Human-readable description of a rule.
#[derive(Debug, Clone, Serialize)]
pub struct RuleDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub samples: Vec<ConfiguredCodeSample>,
    /// Effective configuration, flattened for display
    pub non_enum_prefixes: Vec<String>,
    pub enum_namespace: String,
    pub exempt_namespace: Option<String>,
}

const BAD_CODE: &str = r#"struct Product;

impl Entity for Product {}

impl Product {
    pub const STATUS_ENABLED: u8 = 1;
    pub const STATUS_DISABLED: u8 = 0;
}"#;

const GOOD_CODE: &str = r#"struct Product;

impl Entity for Product {}

#[repr(u8)]
pub enum ProductStatus {
    Enabled = 1,
    Disabled = 0,
}"#;

impl RuleDefinition {
    /// Definition of the embedded-enum rule under `config`.
    pub fn embedded_enum(config: &EmbeddedEnumConfig) -> Self {
        let parent_types = if config.parent_types.is_empty() {
            vec!["Entity".to_string()]
        } else {
            config.parent_types.clone()
        };

        Self {
            name: RULE_NAME,
            description: ERROR_MESSAGE,
            samples: vec![ConfiguredCodeSample {
                bad_code: BAD_CODE,
                good_code: GOOD_CODE,
                parent_types,
            }],
            non_enum_prefixes: config.non_enum_prefixes.to_sorted_vec(),
            enum_namespace: config.enum_namespace.clone(),
            exempt_namespace: config.exempt_namespace.clone(),
        }
    }

    /// Plain-text rendering for `--explain`.
    pub fn to_text(&self) -> String {
        let mut parts: Vec<String> = vec![
            format!("RULE: {}", self.name),
            format!("MESSAGE: {}", self.description),
        ];

        for sample in &self.samples {
            parts.push(format!("CONFIGURED PARENT TYPES: {}", sample.parent_types.join(", ")));
            parts.push(format!("BEFORE:\n{}", sample.bad_code));
            parts.push(format!("AFTER:\n{}", sample.good_code));
        }

        parts.push(format!(
            "IGNORED PREFIXES: {}",
            self.non_enum_prefixes.join(", ")
        ));
        parts.push(format!("ENUM NAMESPACE: {}", self.enum_namespace));
        if let Some(exempt) = &self.exempt_namespace {
            parts.push(format!("CHECKED ANYWAY: {}", exempt));
        }

        parts.join("\n\n")
    }
}
