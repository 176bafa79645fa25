use super::{
    AttributeBinding, AttributeBindingId, BasicAttributeBinding, CompositeAttributeBinding,
    EntityBinding, EntityBindingId, ManyToOneAttributeBinding, PluralAttributeBinding,
    PluralAttributeElementNature, PluralAttributeIndexNature, PluralBindingOptions, PluralKind,
    PropertyGeneration, RelationalValueBinding, SingularBindingOptions,
};
use crate::domain::{PluralAttribute, SingularAttribute};
use crate::relational::Value;
use crate::{Error, Result};

/// Something attribute bindings can be declared on: an entity binding, or
/// a composite attribute binding opened through
/// [`EntityBinding::composite_container`].
///
/// Every `make_*` method follows the same steps: check the preconditions of
/// the binding kind, build the binding, register it under the attribute
/// name and return its id. Registering a name that is already taken
/// replaces the previous binding unless the metamodel was built with
/// [`NameCollision::Reject`](super::NameCollision::Reject).
pub trait AttributeBindingContainer {
    /// The entity binding that stores bindings made through this container.
    fn entity_binding_id(&self) -> EntityBindingId;

    /// Dotted path naming this container, used in messages.
    fn path_base(&self) -> String;

    /// Bindings registered directly on this container, in registration order.
    fn attribute_bindings(&self) -> impl Iterator<Item = &AttributeBinding> + '_;

    /// Looks up a binding registered directly on this container.
    fn locate_attribute_binding(&self, name: &str) -> Option<&AttributeBinding>;

    /// Finds the basic attribute binding registered directly on this
    /// container whose relational values equal `values`, in order. Other
    /// binding kinds are skipped, and so are inherited bindings.
    fn locate_attribute_binding_by_values(&self, values: &[Value]) -> Option<&AttributeBinding> {
        self.attribute_bindings().find(|binding| {
            binding
                .as_basic()
                .is_some_and(|basic| basic.matches_values(values))
        })
    }

    /// The id the next registered binding will receive.
    fn next_attribute_binding_id(&self) -> AttributeBindingId;

    /// Records `binding` under its attribute name.
    fn register_attribute_binding(&mut self, binding: AttributeBinding) -> Result<AttributeBindingId>;

    fn make_basic_attribute_binding(
        &mut self,
        attribute: SingularAttribute,
        relational_value_bindings: Vec<RelationalValueBinding>,
        options: SingularBindingOptions,
        generation: PropertyGeneration,
    ) -> Result<AttributeBindingId> {
        let id = self.next_attribute_binding_id();
        self.register_attribute_binding(AttributeBinding::Basic(BasicAttributeBinding {
            id,
            attribute,
            relational_value_bindings,
            options,
            generation,
        }))
    }

    fn make_component_attribute_binding(
        &mut self,
        attribute: SingularAttribute,
        parent_reference: Option<SingularAttribute>,
        options: SingularBindingOptions,
    ) -> Result<AttributeBindingId> {
        let id = self.next_attribute_binding_id();
        self.register_attribute_binding(AttributeBinding::Composite(
            CompositeAttributeBinding::new(id, attribute, parent_reference, options),
        ))
    }

    /// `referenced_attribute_binding` must already be bound on the target
    /// entity binding or one of its super-entity bindings.
    fn make_many_to_one_attribute_binding(
        &mut self,
        attribute: SingularAttribute,
        options: SingularBindingOptions,
        referenced_entity_binding: EntityBindingId,
        referenced_attribute_binding: AttributeBindingId,
        relational_value_bindings: Vec<RelationalValueBinding>,
    ) -> Result<AttributeBindingId> {
        let id = self.next_attribute_binding_id();
        self.register_attribute_binding(AttributeBinding::ManyToOne(ManyToOneAttributeBinding {
            id,
            attribute,
            options,
            referenced_entity_binding,
            referenced_attribute_binding,
            relational_value_bindings,
        }))
    }

    fn make_bag_attribute_binding(
        &mut self,
        attribute: PluralAttribute,
        element_nature: PluralAttributeElementNature,
        referenced_attribute_binding: AttributeBindingId,
        options: PluralBindingOptions,
    ) -> Result<AttributeBindingId> {
        make_plural(
            self,
            attribute,
            element_nature,
            referenced_attribute_binding,
            options,
            PluralKind::Bag,
        )
    }

    fn make_list_attribute_binding(
        &mut self,
        attribute: PluralAttribute,
        element_nature: PluralAttributeElementNature,
        referenced_attribute_binding: AttributeBindingId,
        options: PluralBindingOptions,
        base: i32,
    ) -> Result<AttributeBindingId> {
        make_plural(
            self,
            attribute,
            element_nature,
            referenced_attribute_binding,
            options,
            PluralKind::List { base },
        )
    }

    fn make_map_attribute_binding(
        &mut self,
        attribute: PluralAttribute,
        element_nature: PluralAttributeElementNature,
        index_nature: PluralAttributeIndexNature,
        referenced_attribute_binding: AttributeBindingId,
        options: PluralBindingOptions,
    ) -> Result<AttributeBindingId> {
        make_plural(
            self,
            attribute,
            element_nature,
            referenced_attribute_binding,
            options,
            PluralKind::Map { index_nature },
        )
    }

    fn make_set_attribute_binding(
        &mut self,
        attribute: PluralAttribute,
        element_nature: PluralAttributeElementNature,
        referenced_attribute_binding: AttributeBindingId,
        options: PluralBindingOptions,
    ) -> Result<AttributeBindingId> {
        make_plural(
            self,
            attribute,
            element_nature,
            referenced_attribute_binding,
            options,
            PluralKind::Set,
        )
    }
}

fn make_plural<C: AttributeBindingContainer + ?Sized>(
    container: &mut C,
    attribute: PluralAttribute,
    element_nature: PluralAttributeElementNature,
    referenced_attribute_binding: AttributeBindingId,
    options: PluralBindingOptions,
    kind: PluralKind,
) -> Result<AttributeBindingId> {
    let expected = kind.nature();
    if attribute.nature != expected {
        return Err(Error::internal_consistency(format!(
            "Expected attribute `{}.{}` to have plural nature {expected}, but was {}",
            container.path_base(),
            attribute.name,
            attribute.nature
        )));
    }

    let id = container.next_attribute_binding_id();
    container.register_attribute_binding(AttributeBinding::Plural(PluralAttributeBinding {
        id,
        attribute,
        element_nature,
        referenced_attribute_binding,
        options,
        kind,
    }))
}

/// A composite attribute binding opened for declaring sub-attributes.
///
/// Bindings made here are stored by the owning entity binding but are only
/// registered on the composite, never in the entity's own attribute map.
pub struct CompositeContainer<'a> {
    entity: &'a mut EntityBinding,
    index: usize,
}

impl<'a> CompositeContainer<'a> {
    pub(crate) fn new(entity: &'a mut EntityBinding, index: usize) -> Self {
        Self { entity, index }
    }

    pub fn composite(&self) -> &CompositeAttributeBinding {
        self.entity
            .attribute_binding(self.id())
            .expect_composite()
    }

    pub fn id(&self) -> AttributeBindingId {
        AttributeBindingId {
            entity: self.entity.id(),
            index: self.index,
        }
    }

}

impl AttributeBindingContainer for CompositeContainer<'_> {
    fn entity_binding_id(&self) -> EntityBindingId {
        self.entity.id()
    }

    fn path_base(&self) -> String {
        format!(
            "{}.{}",
            self.entity.path_base(),
            self.composite().attribute.name
        )
    }

    fn attribute_bindings(&self) -> impl Iterator<Item = &AttributeBinding> + '_ {
        self.composite()
            .sub_attribute_bindings()
            .filter_map(move |id| self.entity.get_attribute_binding(id.index))
    }

    fn locate_attribute_binding(&self, name: &str) -> Option<&AttributeBinding> {
        let id = self.composite().sub_attribute_binding(name)?;
        self.entity.get_attribute_binding(id.index)
    }

    fn next_attribute_binding_id(&self) -> AttributeBindingId {
        self.entity.next_attribute_binding_id()
    }

    fn register_attribute_binding(&mut self, binding: AttributeBinding) -> Result<AttributeBindingId> {
        self.entity.store_attribute_binding(Some(self.index), binding)
    }
}
