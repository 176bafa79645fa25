use std::fmt;

/// An attribute declared by an entity or composite type.
#[derive(Debug, Clone, PartialEq)]
pub enum Attribute {
    Singular(SingularAttribute),
    Plural(PluralAttribute),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SingularAttribute {
    /// The attribute name, unique within its declaring container.
    pub name: String,

    /// True if the attribute was generated while processing the mapping
    /// rather than declared by it (virtual composites, back-references).
    pub synthetic: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PluralAttribute {
    pub name: String,

    /// The collection semantics declared for the attribute.
    pub nature: PluralAttributeNature,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PluralAttributeNature {
    Bag,
    List,
    Map,
    Set,
}

impl Attribute {
    pub fn name(&self) -> &str {
        match self {
            Self::Singular(attribute) => &attribute.name,
            Self::Plural(attribute) => &attribute.name,
        }
    }

    pub fn is_singular(&self) -> bool {
        matches!(self, Self::Singular(..))
    }

    pub fn is_plural(&self) -> bool {
        matches!(self, Self::Plural(..))
    }

    pub fn as_singular(&self) -> Option<&SingularAttribute> {
        match self {
            Self::Singular(attribute) => Some(attribute),
            _ => None,
        }
    }

    pub fn as_plural(&self) -> Option<&PluralAttribute> {
        match self {
            Self::Plural(attribute) => Some(attribute),
            _ => None,
        }
    }
}

impl SingularAttribute {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            synthetic: false,
        }
    }

    /// Creates an attribute generated during mapping processing.
    pub fn synthetic(name: impl Into<String>) -> Self {
        Self {
            synthetic: true,
            ..Self::new(name)
        }
    }
}

impl PluralAttribute {
    pub fn new(name: impl Into<String>, nature: PluralAttributeNature) -> Self {
        Self {
            name: name.into(),
            nature,
        }
    }
}

impl From<SingularAttribute> for Attribute {
    fn from(value: SingularAttribute) -> Self {
        Self::Singular(value)
    }
}

impl From<PluralAttribute> for Attribute {
    fn from(value: PluralAttribute) -> Self {
        Self::Plural(value)
    }
}

impl PluralAttributeNature {
    pub fn name(self) -> &'static str {
        match self {
            Self::Bag => "BAG",
            Self::List => "LIST",
            Self::Map => "MAP",
            Self::Set => "SET",
        }
    }
}

impl fmt::Debug for PluralAttributeNature {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(self.name())
    }
}

impl fmt::Display for PluralAttributeNature {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(self.name())
    }
}
