//! Domain-level descriptors
//!
//! These describe an entity type and its attributes as resolved from mapping
//! metadata. The binding layer stores them but never interprets anything
//! beyond names, the synthetic flag, and the plural nature.

mod attribute;
pub use attribute::{Attribute, PluralAttribute, PluralAttributeNature, SingularAttribute};

mod class_ref;
pub use class_ref::ClassRef;

mod entity;
pub use entity::Entity;
