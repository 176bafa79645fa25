//! Entity bindings: the link between domain entities and their relational
//! representation, arranged in inheritance hierarchies.

mod attribute;
pub use attribute::{
    AttributeBinding, AttributeBindingId, BackRefAttributeBinding, BasicAttributeBinding,
    CompositeAttributeBinding, ManyToOneAttributeBinding, NaturalIdMutability,
    PluralAttributeBinding, PluralAttributeElementNature, PluralAttributeIndexNature,
    PluralBindingOptions, PluralKind, PropertyGeneration, SingularBindingOptions,
};

mod builder;
pub use builder::{Builder, NameCollision};

mod callback;
pub use callback::{CallbackType, JpaCallbackSource};

mod closure;
pub use closure::{PostOrderSubEntityBindings, PreOrderSubEntityBindings, SuperEntityBindings};

mod container;
pub use container::{AttributeBindingContainer, CompositeContainer};

mod custom_sql;
pub use custom_sql::{CustomSql, ExecuteUpdateResultCheckStyle};

mod entity;
pub use entity::{EntityBinding, EntityBindingId};

mod filter;
pub use filter::FilterDefinition;

mod hierarchy;
pub use hierarchy::{
    CacheAccessType, Caching, EntityDiscriminator, EntityMode, EntityVersion, HierarchyDetails,
    HierarchyId, InheritanceType, OptimisticLockStyle,
};

mod meta_attribute;
pub use meta_attribute::{MetaAttribute, MetaAttributeContext};

mod metamodel;
pub use metamodel::Metamodel;

mod relational_value;
pub use relational_value::RelationalValueBinding;

mod secondary_table;
pub use secondary_table::SecondaryTable;

mod verify;
