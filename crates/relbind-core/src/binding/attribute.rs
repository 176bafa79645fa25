mod back_ref;
pub use back_ref::BackRefAttributeBinding;

mod basic;
pub use basic::{BasicAttributeBinding, PropertyGeneration};

mod composite;
pub use composite::CompositeAttributeBinding;

mod many_to_one;
pub use many_to_one::ManyToOneAttributeBinding;

mod plural;
pub use plural::{
    PluralAttributeBinding, PluralAttributeElementNature, PluralAttributeIndexNature, PluralKind,
};

use super::{EntityBindingId, MetaAttributeContext};
use std::{fmt, sync::Arc};

/// Binds one attribute of an entity (or composite) to its relational
/// representation.
///
/// The set of variants is closed; consumers match on it exhaustively.
#[derive(Debug, Clone)]
pub enum AttributeBinding {
    Basic(BasicAttributeBinding),
    Composite(CompositeAttributeBinding),
    ManyToOne(ManyToOneAttributeBinding),
    BackRef(BackRefAttributeBinding),
    Plural(PluralAttributeBinding),
}

/// Identifies an attribute binding: the entity binding that stores it and
/// its position in that binding's storage.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeBindingId {
    pub entity: EntityBindingId,
    pub index: usize,
}

/// Settings shared by every singular attribute binding.
#[derive(Debug, Clone)]
pub struct SingularBindingOptions {
    /// Strategy used to read and write the attribute. `None` selects the
    /// default accessor.
    pub property_accessor_name: Option<String>,

    /// True if changes to the attribute take part in optimistic locking.
    pub included_in_optimistic_locking: bool,

    pub lazy: bool,

    pub natural_id_mutability: NaturalIdMutability,

    pub meta_attribute_context: Option<Arc<MetaAttributeContext>>,
}

/// Settings shared by every plural attribute binding.
#[derive(Debug, Clone)]
pub struct PluralBindingOptions {
    pub property_accessor_name: Option<String>,
    pub included_in_optimistic_locking: bool,
    pub meta_attribute_context: Option<Arc<MetaAttributeContext>>,
}

/// The role an attribute plays in the entity's natural identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NaturalIdMutability {
    Mutable,
    Immutable,
    #[default]
    NotNaturalId,
}

impl AttributeBinding {
    pub fn id(&self) -> AttributeBindingId {
        match self {
            Self::Basic(binding) => binding.id,
            Self::Composite(binding) => binding.id,
            Self::ManyToOne(binding) => binding.id,
            Self::BackRef(binding) => binding.id,
            Self::Plural(binding) => binding.id,
        }
    }

    /// Name of the bound attribute.
    pub fn name(&self) -> &str {
        match self {
            Self::Basic(binding) => &binding.attribute.name,
            Self::Composite(binding) => &binding.attribute.name,
            Self::ManyToOne(binding) => &binding.attribute.name,
            Self::BackRef(binding) => &binding.attribute.name,
            Self::Plural(binding) => &binding.attribute.name,
        }
    }

    /// The entity binding whose storage holds this binding.
    pub fn container(&self) -> EntityBindingId {
        self.id().entity
    }

    pub fn is_synthetic(&self) -> bool {
        match self {
            Self::Basic(binding) => binding.attribute.synthetic,
            Self::Composite(binding) => binding.attribute.synthetic,
            Self::ManyToOne(binding) => binding.attribute.synthetic,
            Self::BackRef(binding) => binding.attribute.synthetic,
            Self::Plural(_) => false,
        }
    }

    pub fn is_singular(&self) -> bool {
        !self.is_plural()
    }

    pub fn is_association(&self) -> bool {
        matches!(self, Self::ManyToOne(..) | Self::Plural(..))
    }

    pub fn is_lazy(&self) -> bool {
        match self {
            Self::Basic(binding) => binding.options.lazy,
            Self::Composite(binding) => binding.options.lazy,
            Self::ManyToOne(binding) => binding.options.lazy,
            Self::BackRef(_) | Self::Plural(_) => false,
        }
    }

    pub fn is_basic(&self) -> bool {
        matches!(self, Self::Basic(..))
    }

    pub fn as_basic(&self) -> Option<&BasicAttributeBinding> {
        match self {
            Self::Basic(binding) => Some(binding),
            _ => None,
        }
    }

    #[track_caller]
    pub fn expect_basic(&self) -> &BasicAttributeBinding {
        match self {
            Self::Basic(binding) => binding,
            _ => panic!("expected basic attribute binding, but was {self:?}"),
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Composite(..))
    }

    pub fn as_composite(&self) -> Option<&CompositeAttributeBinding> {
        match self {
            Self::Composite(binding) => Some(binding),
            _ => None,
        }
    }

    #[track_caller]
    pub fn expect_composite(&self) -> &CompositeAttributeBinding {
        match self {
            Self::Composite(binding) => binding,
            _ => panic!("expected composite attribute binding, but was {self:?}"),
        }
    }

    pub(crate) fn as_composite_mut(&mut self) -> Option<&mut CompositeAttributeBinding> {
        match self {
            Self::Composite(binding) => Some(binding),
            _ => None,
        }
    }

    pub fn is_many_to_one(&self) -> bool {
        matches!(self, Self::ManyToOne(..))
    }

    pub fn as_many_to_one(&self) -> Option<&ManyToOneAttributeBinding> {
        match self {
            Self::ManyToOne(binding) => Some(binding),
            _ => None,
        }
    }

    #[track_caller]
    pub fn expect_many_to_one(&self) -> &ManyToOneAttributeBinding {
        match self {
            Self::ManyToOne(binding) => binding,
            _ => panic!("expected many-to-one attribute binding, but was {self:?}"),
        }
    }

    pub fn is_back_ref(&self) -> bool {
        matches!(self, Self::BackRef(..))
    }

    pub fn as_back_ref(&self) -> Option<&BackRefAttributeBinding> {
        match self {
            Self::BackRef(binding) => Some(binding),
            _ => None,
        }
    }

    pub fn is_plural(&self) -> bool {
        matches!(self, Self::Plural(..))
    }

    pub fn as_plural(&self) -> Option<&PluralAttributeBinding> {
        match self {
            Self::Plural(binding) => Some(binding),
            _ => None,
        }
    }

    #[track_caller]
    pub fn expect_plural(&self) -> &PluralAttributeBinding {
        match self {
            Self::Plural(binding) => binding,
            _ => panic!("expected plural attribute binding, but was {self:?}"),
        }
    }
}

impl From<&AttributeBinding> for AttributeBindingId {
    fn from(value: &AttributeBinding) -> Self {
        value.id()
    }
}

impl fmt::Debug for AttributeBindingId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "AttributeBindingId({}/{})", self.entity.0, self.index)
    }
}

impl Default for SingularBindingOptions {
    fn default() -> Self {
        Self {
            property_accessor_name: None,
            included_in_optimistic_locking: true,
            lazy: false,
            natural_id_mutability: NaturalIdMutability::NotNaturalId,
            meta_attribute_context: None,
        }
    }
}

impl Default for PluralBindingOptions {
    fn default() -> Self {
        Self {
            property_accessor_name: None,
            included_in_optimistic_locking: true,
            meta_attribute_context: None,
        }
    }
}
