//! Collaborator boundary between the rule and a concrete source model.

/// Reflection and symbol queries the embedded-enum rule needs from its host.
///
/// The rule never inspects type structure itself; it treats these answers as
/// opaque. A host that cannot supply a name or an ancestry answers `None` /
/// `false`, which the rule reads as "not interesting".
pub trait UnitHost {
    /// The scanned, class-like unit type.
    type Unit: ?Sized;

    /// Fully-qualified name of the unit (`::`-separated), if known.
    fn unit_name(&self, unit: &Self::Unit) -> Option<String>;

    /// Whether `ancestor` appears in the unit's ancestry.
    fn is_subclass_of(&self, unit: &Self::Unit, ancestor: &str) -> bool;

    /// Constant names declared directly on the unit, in declaration order.
    /// Duplicates are passed through.
    fn resolve_constant_names(&self, unit: &Self::Unit) -> Vec<String>;
}

impl<H: UnitHost + ?Sized> UnitHost for &H {
    type Unit = H::Unit;

    fn unit_name(&self, unit: &Self::Unit) -> Option<String> {
        (**self).unit_name(unit)
    }

    fn is_subclass_of(&self, unit: &Self::Unit, ancestor: &str) -> bool {
        (**self).is_subclass_of(unit, ancestor)
    }

    fn resolve_constant_names(&self, unit: &Self::Unit) -> Vec<String> {
        (**self).resolve_constant_names(unit)
    }
}
