//! Rule orchestration.
//!
//! - [`host`]: the [`UnitHost`] trait a source model implements
//! - [`embedded_enum`]: the embedded-enum rule and its configuration
//! - [`definition`]: rule documentation for `--explain`

pub mod definition;
pub mod embedded_enum;
pub mod host;

pub use definition::{ConfiguredCodeSample, RuleDefinition, RULE_NAME};
pub use embedded_enum::{
    EmbeddedEnumConfig, EmbeddedEnumRule, DEFAULT_ENUM_NAMESPACE, DEFAULT_EXEMPT_NAMESPACE,
};
pub use host::UnitHost;
