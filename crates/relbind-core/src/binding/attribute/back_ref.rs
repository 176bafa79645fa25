use super::AttributeBindingId;
use crate::domain::SingularAttribute;

/// Synthetic attribute mirroring the inverse side of a collection.
#[derive(Debug, Clone)]
pub struct BackRefAttributeBinding {
    pub id: AttributeBindingId,

    pub attribute: SingularAttribute,

    /// The plural binding whose inverse side this attribute represents.
    pub plural_attribute_binding: AttributeBindingId,
}
