use indexmap::IndexMap;
use std::sync::Arc;

/// A free-form annotation attached to a mapping element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaAttribute {
    pub name: String,
    pub values: Vec<String>,
}

/// Meta-attributes visible at one level of the mapping.
///
/// Lookups fall back to the parent context, so an entity sees the
/// meta-attributes declared for its whole mapping document unless it
/// overrides them.
#[derive(Debug, Clone, Default)]
pub struct MetaAttributeContext {
    parent: Option<Arc<MetaAttributeContext>>,
    meta_attributes: IndexMap<String, MetaAttribute>,
}

impl MetaAttribute {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: vec![],
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.values.push(value.into());
        self
    }

    /// The single value, or `None` if there are zero or several.
    pub fn value(&self) -> Option<&str> {
        match &self.values[..] {
            [value] => Some(value),
            _ => None,
        }
    }
}

impl MetaAttributeContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parent(parent: Arc<MetaAttributeContext>) -> Self {
        Self {
            parent: Some(parent),
            meta_attributes: IndexMap::new(),
        }
    }

    pub fn parent(&self) -> Option<&MetaAttributeContext> {
        self.parent.as_deref()
    }

    pub fn add(&mut self, meta_attribute: MetaAttribute) {
        self.meta_attributes
            .insert(meta_attribute.name.clone(), meta_attribute);
    }

    /// Looks up a meta-attribute here, then in the parent chain.
    pub fn get(&self, name: &str) -> Option<&MetaAttribute> {
        self.local(name)
            .or_else(|| self.parent.as_ref().and_then(|parent| parent.get(name)))
    }

    /// Looks up a meta-attribute declared at this level only.
    pub fn local(&self, name: &str) -> Option<&MetaAttribute> {
        self.meta_attributes.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.meta_attributes.is_empty()
            && self.parent.as_ref().map_or(true, |parent| parent.is_empty())
    }
}
