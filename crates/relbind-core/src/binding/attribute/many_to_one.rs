use super::{AttributeBindingId, SingularBindingOptions};
use crate::binding::{EntityBindingId, RelationalValueBinding};
use crate::domain::SingularAttribute;

/// A singular association to another entity.
#[derive(Debug, Clone)]
pub struct ManyToOneAttributeBinding {
    pub id: AttributeBindingId,

    pub attribute: SingularAttribute,

    pub options: SingularBindingOptions,

    /// The entity binding on the other side of the association.
    pub referenced_entity_binding: EntityBindingId,

    /// The binding on the target side that the foreign key joins to
    /// (usually its identifier).
    pub referenced_attribute_binding: AttributeBindingId,

    /// Columns realizing the foreign key.
    pub relational_value_bindings: Vec<RelationalValueBinding>,
}

