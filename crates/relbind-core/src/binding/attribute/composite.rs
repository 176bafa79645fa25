use super::{AttributeBindingId, SingularBindingOptions};
use crate::domain::SingularAttribute;
use indexmap::IndexMap;

/// An attribute made of a nested group of sub-attributes.
///
/// Sub-attribute bindings are stored by the owning entity binding; the
/// composite only keeps their ids, in order, with an index by name.
#[derive(Debug, Clone)]
pub struct CompositeAttributeBinding {
    pub id: AttributeBindingId,

    pub attribute: SingularAttribute,

    /// Attribute on the composite type that points back at the owner.
    pub parent_reference: Option<SingularAttribute>,

    pub options: SingularBindingOptions,

    sub_attribute_bindings: Vec<AttributeBindingId>,

    /// Position in `sub_attribute_bindings` of the first part with each name.
    names: IndexMap<String, usize>,

    virtual_: bool,
}

impl CompositeAttributeBinding {
    pub(crate) fn new(
        id: AttributeBindingId,
        attribute: SingularAttribute,
        parent_reference: Option<SingularAttribute>,
        options: SingularBindingOptions,
    ) -> Self {
        Self {
            id,
            attribute,
            parent_reference,
            options,
            sub_attribute_bindings: vec![],
            names: IndexMap::new(),
            virtual_: false,
        }
    }

    /// Every part is kept, even when several share a name. Lookup by name
    /// then finds the first of them.
    pub(crate) fn new_virtual(
        id: AttributeBindingId,
        attribute: SingularAttribute,
        options: SingularBindingOptions,
        parts: Vec<(String, AttributeBindingId)>,
    ) -> Self {
        let mut sub_attribute_bindings = Vec::with_capacity(parts.len());
        let mut names = IndexMap::with_capacity(parts.len());

        for (name, part) in parts {
            names.entry(name).or_insert(sub_attribute_bindings.len());
            sub_attribute_bindings.push(part);
        }

        Self {
            id,
            attribute,
            parent_reference: None,
            options,
            sub_attribute_bindings,
            names,
            virtual_: true,
        }
    }

    /// True if the composite groups existing bindings rather than owning
    /// its own sub-attributes.
    pub fn is_virtual(&self) -> bool {
        self.virtual_
    }

    pub fn sub_attribute_binding(&self, name: &str) -> Option<AttributeBindingId> {
        self.names
            .get(name)
            .map(|&position| self.sub_attribute_bindings[position])
    }

    /// Sub-attribute binding ids in registration order.
    pub fn sub_attribute_bindings(&self) -> impl ExactSizeIterator<Item = AttributeBindingId> + '_ {
        self.sub_attribute_bindings.iter().copied()
    }

    pub fn sub_attribute_binding_span(&self) -> usize {
        self.sub_attribute_bindings.len()
    }

    /// Records a sub-attribute, returning the id it replaced, if any. A
    /// replacement takes over the position of the binding it replaces.
    pub(crate) fn register(
        &mut self,
        name: String,
        id: AttributeBindingId,
    ) -> Option<AttributeBindingId> {
        match self.names.get(&name) {
            Some(&position) => Some(std::mem::replace(
                &mut self.sub_attribute_bindings[position],
                id,
            )),
            None => {
                self.names.insert(name, self.sub_attribute_bindings.len());
                self.sub_attribute_bindings.push(id);
                None
            }
        }
    }
}
