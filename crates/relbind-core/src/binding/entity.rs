use super::{
    AttributeBinding, AttributeBindingContainer, AttributeBindingId, CompositeAttributeBinding,
    CompositeContainer, CustomSql, FilterDefinition, HierarchyId, JpaCallbackSource,
    MetaAttributeContext, NameCollision, SecondaryTable, SingularBindingOptions,
};
use crate::domain::{ClassRef, Entity, SingularAttribute};
use crate::relational::Table;
use crate::{Error, Result};

use indexmap::{IndexMap, IndexSet};
use std::{fmt, sync::Arc};

const NULL_DISCRIMINATOR_MATCH_VALUE: &str = "null";
const NOT_NULL_DISCRIMINATOR_MATCH_VALUE: &str = "not null";

const EMBEDDED_ACCESSOR_NAME: &str = "embedded";

/// Links one entity of the domain model to its relational representation
/// and to its place in an inheritance hierarchy.
///
/// Entity bindings live in a [`Metamodel`](super::Metamodel), which creates
/// them and records the links between super- and sub-entity bindings.
#[derive(Debug)]
pub struct EntityBinding {
    id: EntityBindingId,

    super_entity_binding: Option<EntityBindingId>,

    sub_entity_bindings: Vec<EntityBindingId>,

    hierarchy: HierarchyId,

    name_collision: NameCollision,

    entity: Option<Arc<Entity>>,

    primary_table: Option<Arc<Table>>,

    primary_table_name: Option<String>,

    /// Keyed by the secondary table's logical name.
    secondary_tables: IndexMap<String, SecondaryTable>,

    /// Every attribute binding created through this entity binding,
    /// including composite sub-attributes and replaced bindings.
    attribute_bindings: Vec<AttributeBinding>,

    /// Attribute bindings declared directly on this entity, by name.
    attribute_binding_map: IndexMap<String, usize>,

    filter_definitions: IndexSet<FilterDefinition>,

    synchronized_table_names: IndexSet<String>,

    pub proxy_interface_type: Option<ClassRef>,

    pub jpa_entity_name: Option<String>,

    pub custom_entity_persister_class: Option<ClassRef>,

    pub custom_entity_tuplizer_class: Option<ClassRef>,

    /// Discriminator value selecting this entity, including the `"null"` and
    /// `"not null"` sentinels.
    pub discriminator_match_value: Option<String>,

    pub meta_attribute_context: Option<Arc<MetaAttributeContext>>,

    pub lazy: bool,

    pub mutable: bool,

    pub where_filter: Option<String>,

    /// Name of the row-id column, for databases that expose one.
    pub row_id: Option<String>,

    pub dynamic_update: bool,

    pub dynamic_insert: bool,

    pub batch_size: usize,

    pub select_before_update: bool,

    pub has_subselect_loadable_collections: bool,

    /// `None` until the mapping says one way or the other.
    pub is_abstract: Option<bool>,

    pub custom_loader_name: Option<String>,

    pub custom_insert: Option<CustomSql>,

    pub custom_update: Option<CustomSql>,

    pub custom_delete: Option<CustomSql>,

    /// Lifecycle callback sources, in invocation order.
    pub jpa_callback_classes: Vec<JpaCallbackSource>,
}

/// Uniquely identifies an entity binding within its metamodel
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityBindingId(pub usize);

impl EntityBinding {
    pub(crate) fn new(
        id: EntityBindingId,
        super_entity_binding: Option<EntityBindingId>,
        hierarchy: HierarchyId,
        name_collision: NameCollision,
    ) -> Self {
        Self {
            id,
            super_entity_binding,
            sub_entity_bindings: vec![],
            hierarchy,
            name_collision,
            entity: None,
            primary_table: None,
            primary_table_name: None,
            secondary_tables: IndexMap::new(),
            attribute_bindings: vec![],
            attribute_binding_map: IndexMap::new(),
            filter_definitions: IndexSet::new(),
            synchronized_table_names: IndexSet::new(),
            proxy_interface_type: None,
            jpa_entity_name: None,
            custom_entity_persister_class: None,
            custom_entity_tuplizer_class: None,
            discriminator_match_value: None,
            meta_attribute_context: None,
            lazy: false,
            mutable: true,
            where_filter: None,
            row_id: None,
            dynamic_update: false,
            dynamic_insert: false,
            batch_size: 0,
            select_before_update: false,
            has_subselect_loadable_collections: false,
            is_abstract: None,
            custom_loader_name: None,
            custom_insert: None,
            custom_update: None,
            custom_delete: None,
            jpa_callback_classes: vec![],
        }
    }

    pub fn id(&self) -> EntityBindingId {
        self.id
    }

    /// The hierarchy this binding belongs to. Shared with every other
    /// binding of the same inheritance tree.
    pub fn hierarchy(&self) -> HierarchyId {
        self.hierarchy
    }

    pub fn super_entity_binding(&self) -> Option<EntityBindingId> {
        self.super_entity_binding
    }

    pub fn is_root(&self) -> bool {
        self.super_entity_binding.is_none()
    }

    pub fn has_sub_entity_bindings(&self) -> bool {
        !self.sub_entity_bindings.is_empty()
    }

    /// Immediate sub-entity bindings, in the order they were created.
    pub fn direct_sub_entity_bindings(&self) -> &[EntityBindingId] {
        &self.sub_entity_bindings
    }

    pub(crate) fn push_sub_entity_binding(&mut self, id: EntityBindingId) {
        self.sub_entity_bindings.push(id);
    }

    pub fn entity(&self) -> Option<&Arc<Entity>> {
        self.entity.as_ref()
    }

    pub fn set_entity(&mut self, entity: Arc<Entity>) {
        self.entity = Some(entity);
    }

    /// Class backing the bound entity, if any.
    pub fn class_reference(&self) -> Option<&ClassRef> {
        self.entity.as_ref()?.class_reference.as_ref()
    }

    pub fn primary_table(&self) -> Option<&Arc<Table>> {
        self.primary_table.as_ref()
    }

    pub fn set_primary_table(&mut self, primary_table: Arc<Table>) {
        self.primary_table = Some(primary_table);
    }

    pub fn primary_table_name(&self) -> Option<&str> {
        self.primary_table_name.as_deref()
    }

    pub fn set_primary_table_name(&mut self, primary_table_name: impl Into<String>) {
        self.primary_table_name = Some(primary_table_name.into());
    }

    /// Registers a secondary table under its own logical name.
    pub fn add_secondary_table(&mut self, secondary_table: SecondaryTable) {
        let name = secondary_table.logical_name().to_string();
        tracing::debug!(entity_binding = ?self.id, table = %name, "registered secondary table");
        self.secondary_tables.insert(name, secondary_table);
    }

    pub fn secondary_table(&self, name: &str) -> Option<&SecondaryTable> {
        self.secondary_tables.get(name)
    }

    pub fn secondary_tables(&self) -> impl ExactSizeIterator<Item = &SecondaryTable> + '_ {
        self.secondary_tables.values()
    }

    /// Resolves a logical table name to the table backing it.
    ///
    /// `None`, or the primary table name, resolves to the primary table.
    /// Any other name must be a registered secondary table.
    ///
    /// Resolving to the primary table fails when none has been set, rather
    /// than returning an absent result.
    pub fn locate_table(&self, table_name: Option<&str>) -> Result<&Arc<Table>> {
        let table_name = match table_name {
            Some(name) if Some(name) != self.primary_table_name() => name,
            _ => {
                return self.primary_table.as_ref().ok_or_else(|| {
                    Error::internal_consistency(format!("{self} has no primary table"))
                })
            }
        };

        match self.secondary_tables.get(table_name) {
            Some(secondary_table) => Ok(&secondary_table.table),
            None => Err(Error::internal_consistency(format!(
                "Unable to find table {table_name} amongst tables {:?}",
                self.secondary_tables.keys().collect::<Vec<_>>()
            ))),
        }
    }

    pub fn is_discriminator_match_value_null(&self) -> bool {
        self.discriminator_match_value.as_deref() == Some(NULL_DISCRIMINATOR_MATCH_VALUE)
    }

    pub fn is_discriminator_match_value_not_null(&self) -> bool {
        self.discriminator_match_value.as_deref() == Some(NOT_NULL_DISCRIMINATOR_MATCH_VALUE)
    }

    pub fn filter_definitions(&self) -> impl ExactSizeIterator<Item = &FilterDefinition> + '_ {
        self.filter_definitions.iter()
    }

    pub fn add_filter_definition(&mut self, filter_definition: FilterDefinition) {
        self.filter_definitions.insert(filter_definition);
    }

    /// Tables whose modification invalidates cached queries against this entity.
    pub fn synchronized_table_names(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.synchronized_table_names.iter().map(String::as_str)
    }

    pub fn add_synchronized_table_names<I>(&mut self, names: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.synchronized_table_names
            .extend(names.into_iter().map(Into::into));
    }

    /// Returns the attribute binding stored under `id`.
    ///
    /// # Panics
    ///
    /// Panics if the id belongs to another entity binding or is out of range.
    #[track_caller]
    pub fn attribute_binding(&self, id: AttributeBindingId) -> &AttributeBinding {
        assert_eq!(self.id, id.entity, "attribute binding of another entity binding");
        self.attribute_bindings
            .get(id.index)
            .expect("invalid attribute binding ID")
    }

    pub(crate) fn get_attribute_binding(&self, index: usize) -> Option<&AttributeBinding> {
        self.attribute_bindings.get(index)
    }

    /// Attribute bindings declared directly on this entity, in registration
    /// order. Inherited bindings are not included.
    pub fn attribute_bindings(&self) -> impl ExactSizeIterator<Item = &AttributeBinding> + '_ {
        self.attribute_binding_map
            .values()
            .map(move |&index| &self.attribute_bindings[index])
    }

    /// Number of attribute bindings declared directly on this entity.
    pub fn attribute_binding_span(&self) -> usize {
        self.attribute_binding_map.len()
    }

    /// Opens a composite binding of this entity as a container, so that
    /// sub-attributes can be bound inside it.
    pub fn composite_container(&mut self, id: AttributeBindingId) -> Result<CompositeContainer<'_>> {
        let is_composite = id.entity == self.id
            && self
                .attribute_bindings
                .get(id.index)
                .is_some_and(AttributeBinding::is_composite);

        if !is_composite {
            return Err(Error::internal_consistency(format!(
                "{id:?} is not a composite attribute binding of {self}"
            )));
        }

        Ok(CompositeContainer::new(self, id.index))
    }

    /// Binds a synthetic composite grouping attribute bindings that already
    /// exist on this entity (for example, the parts of a non-aggregated
    /// composite identifier).
    ///
    /// The parts keep the given order, and none is dropped when two of them
    /// share an attribute name.
    pub fn make_virtual_component_attribute_binding(
        &mut self,
        synthetic_attribute: SingularAttribute,
        sub_attribute_bindings: &[AttributeBindingId],
        meta_attribute_context: Option<Arc<MetaAttributeContext>>,
    ) -> Result<AttributeBindingId> {
        check_synthetic(&synthetic_attribute)?;

        let mut parts = Vec::with_capacity(sub_attribute_bindings.len());
        for &sub_id in sub_attribute_bindings {
            let binding = (sub_id.entity == self.id)
                .then(|| self.attribute_bindings.get(sub_id.index))
                .flatten()
                .ok_or_else(|| {
                    Error::internal_consistency(format!(
                        "virtual composite `{}` refers to {sub_id:?}, which is not bound on {self}",
                        synthetic_attribute.name
                    ))
                })?;
            parts.push((binding.name().to_string(), sub_id));
        }

        let options = SingularBindingOptions {
            property_accessor_name: Some(EMBEDDED_ACCESSOR_NAME.to_string()),
            included_in_optimistic_locking: false,
            meta_attribute_context,
            ..SingularBindingOptions::default()
        };

        let id = self.next_attribute_binding_id();
        self.register_attribute_binding(AttributeBinding::Composite(
            CompositeAttributeBinding::new_virtual(id, synthetic_attribute, options, parts),
        ))
    }

    /// Binds a synthetic attribute mirroring the inverse side of the given
    /// plural attribute binding.
    pub fn make_back_ref_attribute_binding(
        &mut self,
        synthetic_attribute: SingularAttribute,
        plural_attribute_binding: AttributeBindingId,
    ) -> Result<AttributeBindingId> {
        check_synthetic(&synthetic_attribute)?;

        let id = self.next_attribute_binding_id();
        self.register_attribute_binding(AttributeBinding::BackRef(super::BackRefAttributeBinding {
            id,
            attribute: synthetic_attribute,
            plural_attribute_binding,
        }))
    }

    /// Stores a binding and registers it by name, either on this entity
    /// (`container` is `None`) or on the composite stored at `container`.
    pub(crate) fn store_attribute_binding(
        &mut self,
        container: Option<usize>,
        binding: AttributeBinding,
    ) -> Result<AttributeBindingId> {
        let id = binding.id();
        debug_assert_eq!(id, self.next_attribute_binding_id());

        let name = binding.name().to_string();
        let existing = match container {
            None => self.attribute_binding_map.contains_key(&name),
            Some(index) => self.attribute_bindings[index]
                .expect_composite()
                .sub_attribute_binding(&name)
                .is_some(),
        };

        if existing {
            let path = self.attribute_path(container, &name);
            match self.name_collision {
                NameCollision::Replace => {
                    tracing::debug!(entity_binding = ?self.id, attribute = %path, "replacing attribute binding");
                }
                NameCollision::Reject => {
                    return Err(Error::internal_consistency(format!(
                        "attribute binding `{path}` is already registered"
                    )));
                }
            }
        }

        tracing::trace!(
            entity_binding = ?self.id,
            attribute = %name,
            kind = binding_kind(&binding),
            "registered attribute binding"
        );

        self.attribute_bindings.push(binding);

        match container {
            None => {
                self.attribute_binding_map.insert(name, id.index);
            }
            Some(index) => {
                if let Some(composite) = self.attribute_bindings[index].as_composite_mut() {
                    composite.register(name, id);
                }
            }
        }

        Ok(id)
    }

    pub(crate) fn attribute_path(&self, container: Option<usize>, name: &str) -> String {
        let mut path = match container {
            None => self.path_base(),
            Some(index) => {
                let composite = &self.attribute_bindings[index];
                format!("{}.{}", self.path_base(), composite.name())
            }
        };
        path.push('.');
        path.push_str(name);
        path
    }
}

impl AttributeBindingContainer for EntityBinding {
    fn entity_binding_id(&self) -> EntityBindingId {
        self.id
    }

    fn path_base(&self) -> String {
        match &self.entity {
            Some(entity) => entity.name.clone(),
            None => format!("{:?}", self.id),
        }
    }

    fn attribute_bindings(&self) -> impl Iterator<Item = &AttributeBinding> + '_ {
        EntityBinding::attribute_bindings(self)
    }

    fn locate_attribute_binding(&self, name: &str) -> Option<&AttributeBinding> {
        self.attribute_binding_map
            .get(name)
            .map(|&index| &self.attribute_bindings[index])
    }

    fn next_attribute_binding_id(&self) -> AttributeBindingId {
        AttributeBindingId {
            entity: self.id,
            index: self.attribute_bindings.len(),
        }
    }

    fn register_attribute_binding(&mut self, binding: AttributeBinding) -> Result<AttributeBindingId> {
        self.store_attribute_binding(None, binding)
    }
}

fn check_synthetic(attribute: &SingularAttribute) -> Result<()> {
    if attribute.synthetic {
        Ok(())
    } else {
        Err(Error::internal_consistency(format!(
            "Illegal attempt to create synthetic attribute binding from non-synthetic attribute reference `{}`",
            attribute.name
        )))
    }
}

fn binding_kind(binding: &AttributeBinding) -> &'static str {
    match binding {
        AttributeBinding::Basic(_) => "basic",
        AttributeBinding::Composite(_) => "composite",
        AttributeBinding::ManyToOne(_) => "many-to-one",
        AttributeBinding::BackRef(_) => "back-ref",
        AttributeBinding::Plural(binding) => binding.nature().name(),
    }
}

impl fmt::Display for EntityBinding {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.entity {
            Some(entity) => write!(fmt, "EntityBinding{{entity={}}}", entity.name),
            None => fmt.write_str("EntityBinding{entity=not set}"),
        }
    }
}

impl From<&EntityBinding> for EntityBindingId {
    fn from(value: &EntityBinding) -> Self {
        value.id
    }
}

impl From<&Self> for EntityBindingId {
    fn from(src: &Self) -> Self {
        *src
    }
}

impl fmt::Debug for EntityBindingId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "EntityBindingId({})", self.0)
    }
}
