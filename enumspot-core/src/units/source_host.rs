//! [`UnitHost`] over units extracted from Rust source.

use super::hierarchy::TraitHierarchy;
use super::unit_extractor::ClassUnit;
use crate::rule::UnitHost;

/// Answers the rule's reflection queries from parsed source.
///
/// Holds the crate's trait hierarchy; units themselves carry their names,
/// constants and implemented traits.
#[derive(Debug, Clone, Default)]
pub struct SourceHost {
    hierarchy: TraitHierarchy,
}

impl SourceHost {
    pub fn new(hierarchy: TraitHierarchy) -> Self {
        Self { hierarchy }
    }

    pub fn hierarchy(&self) -> &TraitHierarchy {
        &self.hierarchy
    }
}

impl UnitHost for SourceHost {
    type Unit = ClassUnit;

    fn unit_name(&self, unit: &ClassUnit) -> Option<String> {
        if unit.name.is_empty() {
            None
        } else {
            Some(unit.qualified_name())
        }
    }

    fn is_subclass_of(&self, unit: &ClassUnit, ancestor: &str) -> bool {
        self.hierarchy
            .implements(&unit.implemented_traits, ancestor)
    }

    fn resolve_constant_names(&self, unit: &ClassUnit) -> Vec<String> {
        unit.constants.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{EmbeddedEnumConfig, EmbeddedEnumRule};
    use crate::units::unit_extractor::extract_units;
    use std::path::PathBuf;

    fn analyze(content: &str, parents: &[&str]) -> Vec<String> {
        let base = vec!["model".to_string()];
        let extracted = extract_units(&PathBuf::from("model.rs"), &base, content);
        let host = SourceHost::new(TraitHierarchy::from_decls(&extracted.traits));
        let rule = EmbeddedEnumRule::new(EmbeddedEnumConfig::with_parent_types(
            parents.iter().copied(),
        ));

        extracted
            .units
            .iter()
            .flat_map(|unit| rule.process_unit(&host, unit))
            .collect()
    }

    #[test]
    fn test_unit_name_is_qualified() {
        let host = SourceHost::default();
        let unit = ClassUnit {
            name: "Product".into(),
            module_path: vec!["shop".into()],
            file: "shop.rs".into(),
            line: 1,
            constants: vec![],
            implemented_traits: vec![],
            declared: true,
        };
        assert_eq!(host.unit_name(&unit).as_deref(), Some("crate::shop::Product"));
    }

    #[test]
    fn test_reports_family_on_entity() {
        let content = r#"
pub struct Product;
impl Entity for Product {}
impl Product {
    pub const STATUS_ENABLED: u8 = 1;
    pub const STATUS_DISABLED: u8 = 0;
    pub const NAME: &'static str = "product";
}
"#;
        let messages = analyze(content, &["Entity"]);
        assert_eq!(
            messages,
            vec!["Constants \"STATUS_ENABLED\", \"STATUS_DISABLED\" should be extracted to standalone enum class"]
        );
    }

    #[test]
    fn test_subtrait_of_parent_is_checked() {
        let content = r#"
pub trait Sellable: Entity {}
pub struct Product;
impl Sellable for Product {}
impl Product {
    const KIND_BOOK: u8 = 0;
    const KIND_MUSIC: u8 = 1;
}
"#;
        assert_eq!(analyze(content, &["Entity"]).len(), 1);
    }

    #[test]
    fn test_unrelated_type_not_checked() {
        let content = r#"
pub struct Config;
impl Config {
    const MODE_FAST: u8 = 0;
    const MODE_SLOW: u8 = 1;
}
"#;
        assert!(analyze(content, &["Entity"]).is_empty());
    }

    #[test]
    fn test_default_deny_list_applies() {
        let content = r#"
pub struct Product;
impl Entity for Product {}
impl Product {
    const MAX_ITEMS: usize = 10;
    const MAX_PRICE: usize = 100;
}
"#;
        assert!(analyze(content, &["Entity"]).is_empty());
    }
}
