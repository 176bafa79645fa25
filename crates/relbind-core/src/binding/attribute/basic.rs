use super::{AttributeBindingId, SingularBindingOptions};
use crate::binding::RelationalValueBinding;
use crate::domain::SingularAttribute;
use crate::relational::Value;

/// A scalar attribute mapped to one or more columns or formulas.
#[derive(Debug, Clone)]
pub struct BasicAttributeBinding {
    pub id: AttributeBindingId,

    pub attribute: SingularAttribute,

    /// Ordered relational values backing the attribute.
    pub relational_value_bindings: Vec<RelationalValueBinding>,

    pub options: SingularBindingOptions,

    /// When the database, rather than the application, produces the value.
    pub generation: PropertyGeneration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PropertyGeneration {
    #[default]
    Never,
    Insert,
    Always,
}

impl BasicAttributeBinding {
    /// The relational values, in binding order.
    pub fn values(&self) -> impl ExactSizeIterator<Item = &Value> + '_ {
        self.relational_value_bindings
            .iter()
            .map(|binding| &binding.value)
    }

    /// True if the attribute is bound to exactly the given values, in order.
    pub fn matches_values(&self, values: &[Value]) -> bool {
        self.values().eq(values.iter())
    }

    pub fn has_derived_value(&self) -> bool {
        self.relational_value_bindings
            .iter()
            .any(RelationalValueBinding::is_derived)
    }

    pub fn is_nullable(&self) -> bool {
        self.relational_value_bindings
            .iter()
            .any(|binding| binding.nullable)
    }
}
