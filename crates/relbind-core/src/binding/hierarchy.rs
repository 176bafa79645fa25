use super::{AttributeBindingId, EntityBindingId};
use crate::relational::Value;
use std::fmt;

/// Facts shared by every entity binding of one inheritance hierarchy.
#[derive(Debug, Clone)]
pub struct HierarchyDetails {
    /// Uniquely identifies the hierarchy within the metamodel
    pub id: HierarchyId,

    root: EntityBindingId,

    pub inheritance_type: InheritanceType,

    pub entity_mode: EntityMode,

    /// Binding of the identifier attribute, once bound.
    pub identifier: Option<AttributeBindingId>,

    pub discriminator: Option<EntityDiscriminator>,

    pub version: EntityVersion,

    pub optimistic_lock_style: OptimisticLockStyle,

    /// When true, the hierarchy is only returned by queries naming it explicitly.
    pub explicit_polymorphism: bool,

    pub caching: Option<Caching>,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HierarchyId(pub usize);

/// How the hierarchy is laid out across tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InheritanceType {
    /// The root has no sub-entities.
    NoInheritance,
    SingleTable,
    Joined,
    TablePerClass,
}

/// Representation of entity instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntityMode {
    #[default]
    Pojo,
    Map,
}

/// The value that tells sub-entities apart in a shared table.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityDiscriminator {
    pub relational_value: Value,

    /// Restrict queries by discriminator even when not strictly needed.
    pub forced: bool,

    /// Whether the value is written by inserts.
    pub inserted: bool,
}

#[derive(Debug, Clone, Default)]
pub struct EntityVersion {
    pub versioning_attribute_binding: Option<AttributeBindingId>,

    /// Version value identifying a transient instance.
    pub unsaved_value: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OptimisticLockStyle {
    None,
    #[default]
    Version,
    Dirty,
    All,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caching {
    pub region: String,
    pub access_type: CacheAccessType,
    pub cache_lazy_properties: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CacheAccessType {
    ReadOnly,
    ReadWrite,
    NonstrictReadWrite,
    Transactional,
}

impl HierarchyDetails {
    pub(crate) fn new(
        id: HierarchyId,
        root: EntityBindingId,
        inheritance_type: InheritanceType,
        entity_mode: EntityMode,
    ) -> Self {
        Self {
            id,
            root,
            inheritance_type,
            entity_mode,
            identifier: None,
            discriminator: None,
            version: EntityVersion::default(),
            optimistic_lock_style: OptimisticLockStyle::default(),
            explicit_polymorphism: false,
            caching: None,
        }
    }

    /// The entity binding at the top of the hierarchy.
    pub fn root_entity_binding(&self) -> EntityBindingId {
        self.root
    }

    pub fn is_versioned(&self) -> bool {
        self.version.versioning_attribute_binding.is_some()
    }

    pub fn has_discriminator(&self) -> bool {
        self.discriminator.is_some()
    }
}

impl fmt::Debug for HierarchyId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "HierarchyId({})", self.0)
    }
}
