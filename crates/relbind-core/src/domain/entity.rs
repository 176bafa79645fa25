use super::{Attribute, ClassRef};
use indexmap::IndexMap;

/// Describes one entity type of the domain model.
///
/// Entity bindings share these through an `Arc`; a descriptor is never owned
/// by the binding that refers to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Name of the entity
    pub name: String,

    /// Class backing the entity. Absent for dynamic (map-mode) entities.
    pub class_reference: Option<ClassRef>,

    /// Attributes declared directly by this entity, keyed by name.
    pub attributes: IndexMap<String, Attribute>,
}

impl Entity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            class_reference: None,
            attributes: IndexMap::new(),
        }
    }

    pub fn with_class_reference(mut self, class_reference: ClassRef) -> Self {
        self.class_reference = Some(class_reference);
        self
    }

    /// Declares an attribute, returning `self` for chaining.
    pub fn with_attribute(mut self, attribute: impl Into<Attribute>) -> Self {
        let attribute = attribute.into();
        self.attributes
            .insert(attribute.name().to_string(), attribute);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    pub fn attributes(&self) -> impl ExactSizeIterator<Item = &Attribute> + '_ {
        self.attributes.values()
    }

    /// True if no class backs the entity.
    pub fn is_dynamic(&self) -> bool {
        self.class_reference.is_none()
    }
}
