use super::{
    AttributeBinding, AttributeBindingId, Builder, EntityBinding, EntityBindingId, EntityMode,
    HierarchyDetails, HierarchyId, InheritanceType, NameCollision,
};
use crate::Result;
use std::sync::Arc;

/// Owns every entity binding and hierarchy of a mapping.
///
/// Bindings are created and mutated by a single schema-processing pass.
/// [`finish`](Metamodel::finish) ends that pass; the returned `Arc` is then
/// shared read-only by whatever plans persistence operations.
#[derive(Debug)]
pub struct Metamodel {
    entity_bindings: Vec<EntityBinding>,

    hierarchies: Vec<HierarchyDetails>,

    name_collision: NameCollision,

    verify_on_finish: bool,
}

impl Metamodel {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn new() -> Self {
        Builder::new().build()
    }

    pub(crate) fn with_config(name_collision: NameCollision, verify_on_finish: bool) -> Self {
        Self {
            entity_bindings: vec![],
            hierarchies: vec![],
            name_collision,
            verify_on_finish,
        }
    }

    /// Creates the binding for the root entity of a new hierarchy, together
    /// with the hierarchy's details.
    pub fn add_root_entity_binding(
        &mut self,
        inheritance_type: InheritanceType,
        entity_mode: EntityMode,
    ) -> EntityBindingId {
        let id = EntityBindingId(self.entity_bindings.len());
        let hierarchy = HierarchyId(self.hierarchies.len());

        self.hierarchies.push(HierarchyDetails::new(
            hierarchy,
            id,
            inheritance_type,
            entity_mode,
        ));
        self.entity_bindings
            .push(EntityBinding::new(id, None, hierarchy, self.name_collision));

        tracing::debug!(entity_binding = ?id, ?hierarchy, ?inheritance_type, ?entity_mode, "created root entity binding");
        id
    }

    /// Creates the binding for a sub-entity of `super_entity_binding`.
    ///
    /// The new binding joins its parent's hierarchy and is appended to the
    /// parent's sub-entity bindings.
    ///
    /// # Panics
    ///
    /// Panics if `super_entity_binding` does not exist.
    #[track_caller]
    pub fn add_sub_entity_binding(&mut self, super_entity_binding: impl Into<EntityBindingId>) -> EntityBindingId {
        let super_id = super_entity_binding.into();
        let hierarchy = self.entity_binding(super_id).hierarchy();

        debug_assert_eq!(
            self.super_entity_bindings(super_id)
                .last()
                .map_or(super_id, EntityBinding::id),
            self.hierarchy(hierarchy).root_entity_binding(),
            "super entity binding is not part of its hierarchy"
        );

        let id = EntityBindingId(self.entity_bindings.len());
        self.entity_bindings.push(EntityBinding::new(
            id,
            Some(super_id),
            hierarchy,
            self.name_collision,
        ));
        self.entity_binding_mut(super_id).push_sub_entity_binding(id);

        tracing::debug!(entity_binding = ?id, super_entity_binding = ?super_id, ?hierarchy, "created sub-entity binding");
        id
    }

    /// Get an entity binding by ID
    #[track_caller]
    pub fn entity_binding(&self, id: impl Into<EntityBindingId>) -> &EntityBinding {
        self.entity_bindings
            .get(id.into().0)
            .expect("invalid entity binding ID")
    }

    #[track_caller]
    pub fn entity_binding_mut(&mut self, id: impl Into<EntityBindingId>) -> &mut EntityBinding {
        self.entity_bindings
            .get_mut(id.into().0)
            .expect("invalid entity binding ID")
    }

    pub fn entity_bindings(&self) -> impl ExactSizeIterator<Item = &EntityBinding> + '_ {
        self.entity_bindings.iter()
    }

    /// Finds the entity binding bound to the entity named `entity_name`.
    pub fn locate_entity_binding(&self, entity_name: &str) -> Option<&EntityBinding> {
        self.entity_bindings.iter().find(|binding| {
            binding
                .entity()
                .is_some_and(|entity| entity.name == entity_name)
        })
    }

    #[track_caller]
    pub fn hierarchy(&self, id: HierarchyId) -> &HierarchyDetails {
        self.hierarchies.get(id.0).expect("invalid hierarchy ID")
    }

    #[track_caller]
    pub fn hierarchy_mut(&mut self, id: HierarchyId) -> &mut HierarchyDetails {
        self.hierarchies.get_mut(id.0).expect("invalid hierarchy ID")
    }

    pub fn hierarchies(&self) -> impl ExactSizeIterator<Item = &HierarchyDetails> + '_ {
        self.hierarchies.iter()
    }

    /// The hierarchy details shared by `id` and the rest of its tree.
    #[track_caller]
    pub fn hierarchy_details(&self, id: impl Into<EntityBindingId>) -> &HierarchyDetails {
        self.hierarchy(self.entity_binding(id).hierarchy())
    }

    #[track_caller]
    pub fn hierarchy_details_mut(&mut self, id: impl Into<EntityBindingId>) -> &mut HierarchyDetails {
        let hierarchy = self.entity_binding(id).hierarchy();
        self.hierarchy_mut(hierarchy)
    }

    /// Get an attribute binding by ID, whichever entity binding stores it.
    #[track_caller]
    pub fn attribute_binding(&self, id: AttributeBindingId) -> &AttributeBinding {
        self.entity_binding(id.entity).attribute_binding(id)
    }

    pub(crate) fn get_entity_binding(&self, id: EntityBindingId) -> Option<&EntityBinding> {
        self.entity_bindings.get(id.0)
    }

    pub(crate) fn get_attribute_binding(&self, id: AttributeBindingId) -> Option<&AttributeBinding> {
        self.get_entity_binding(id.entity)?
            .get_attribute_binding(id.index)
    }

    /// True if queries against `id` may return instances of more than one
    /// entity type.
    ///
    /// This holds for any binding with a super- or sub-entity binding, and
    /// also for a lone entity whose hierarchy declares a discriminator.
    pub fn is_polymorphic(&self, id: impl Into<EntityBindingId>) -> bool {
        let entity_binding = self.entity_binding(id);
        !entity_binding.is_root()
            || self.hierarchy(entity_binding.hierarchy()).has_discriminator()
            || entity_binding.has_sub_entity_bindings()
    }

    pub fn is_versioned(&self, id: impl Into<EntityBindingId>) -> bool {
        self.hierarchy_details(id).is_versioned()
    }

    /// Ends the construction pass, verifying the metamodel unless the
    /// builder disabled it.
    pub fn finish(self) -> Result<Arc<Metamodel>> {
        if self.verify_on_finish {
            self.verify()?;
        }

        tracing::debug!(
            entity_bindings = self.entity_bindings.len(),
            hierarchies = self.hierarchies.len(),
            "metamodel finished"
        );

        Ok(Arc::new(self))
    }
}

impl Default for Metamodel {
    fn default() -> Self {
        Self::new()
    }
}
