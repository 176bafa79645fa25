use super::{AttributeBindingId, PluralBindingOptions};
use crate::domain::{PluralAttribute, PluralAttributeNature};

/// A collection-valued attribute (bag, list, map or set).
#[derive(Debug, Clone)]
pub struct PluralAttributeBinding {
    pub id: AttributeBindingId,

    pub attribute: PluralAttribute,

    /// What the collection elements are.
    pub element_nature: PluralAttributeElementNature,

    /// The owning-side binding the collection key refers to.
    pub referenced_attribute_binding: AttributeBindingId,

    pub options: PluralBindingOptions,

    /// Collection shape with its shape-specific settings.
    pub kind: PluralKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PluralKind {
    Bag,
    /// Positional collection; `base` is the index stored for the first element.
    List {
        base: i32,
    },
    Map {
        index_nature: PluralAttributeIndexNature,
    },
    Set,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PluralAttributeElementNature {
    Basic,
    Aggregate,
    OneToMany,
    ManyToMany,
    ManyToAny,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PluralAttributeIndexNature {
    Basic,
    Aggregate,
    ManyToMany,
    ManyToAny,
}

impl PluralAttributeBinding {
    pub fn nature(&self) -> PluralAttributeNature {
        self.kind.nature()
    }

    /// Base index offset for lists.
    pub fn list_base(&self) -> Option<i32> {
        match self.kind {
            PluralKind::List { base } => Some(base),
            _ => None,
        }
    }

    pub fn map_index_nature(&self) -> Option<PluralAttributeIndexNature> {
        match self.kind {
            PluralKind::Map { index_nature } => Some(index_nature),
            _ => None,
        }
    }

    pub fn is_indexed(&self) -> bool {
        matches!(self.kind, PluralKind::List { .. } | PluralKind::Map { .. })
    }

    pub fn is_association(&self) -> bool {
        matches!(
            self.element_nature,
            PluralAttributeElementNature::OneToMany
                | PluralAttributeElementNature::ManyToMany
                | PluralAttributeElementNature::ManyToAny
        )
    }
}

impl PluralKind {
    pub fn nature(self) -> PluralAttributeNature {
        match self {
            Self::Bag => PluralAttributeNature::Bag,
            Self::List { .. } => PluralAttributeNature::List,
            Self::Map { .. } => PluralAttributeNature::Map,
            Self::Set => PluralAttributeNature::Set,
        }
    }
}
