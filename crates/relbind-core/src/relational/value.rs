use std::fmt;

/// A relational value an attribute can be bound to.
///
/// Equality is structural, which is what locating an attribute binding by
/// its relational values relies on.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Column(Column),
    Derived(DerivedValue),
}

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Column {
    /// Logical name of the table that holds the column.
    pub table: String,

    pub name: String,
}

/// A value computed by an SQL expression (a formula).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct DerivedValue {
    pub expression: String,
}

impl Value {
    pub fn column(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Column(Column {
            table: table.into(),
            name: name.into(),
        })
    }

    pub fn derived(expression: impl Into<String>) -> Self {
        Self::Derived(DerivedValue {
            expression: expression.into(),
        })
    }

    pub fn is_column(&self) -> bool {
        matches!(self, Self::Column(..))
    }

    pub fn as_column(&self) -> Option<&Column> {
        match self {
            Self::Column(column) => Some(column),
            _ => None,
        }
    }
}

impl From<Column> for Value {
    fn from(value: Column) -> Self {
        Self::Column(value)
    }
}

impl From<DerivedValue> for Value {
    fn from(value: DerivedValue) -> Self {
        Self::Derived(value)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Column(column) => column.fmt(fmt),
            Self::Derived(derived) => derived.fmt(fmt),
        }
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "Column({}.{})", self.table, self.name)
    }
}

impl fmt::Debug for DerivedValue {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "Derived({})", self.expression)
    }
}
