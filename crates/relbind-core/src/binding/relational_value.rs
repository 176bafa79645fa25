use crate::relational::Value;

/// Binds an attribute to one relational value, with its DML participation.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationalValueBinding {
    pub value: Value,

    /// True if the value is written by `INSERT` statements.
    pub include_in_insert: bool,

    /// True if the value is written by `UPDATE` statements.
    pub include_in_update: bool,

    pub nullable: bool,
}

impl RelationalValueBinding {
    /// Binds a column that is both inserted and updated.
    pub fn column(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            include_in_insert: true,
            include_in_update: true,
            nullable: true,
        }
    }

    /// Binds a derived value. Derived values are never written.
    pub fn derived(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            include_in_insert: false,
            include_in_update: false,
            nullable: true,
        }
    }

    pub fn is_derived(&self) -> bool {
        !self.value.is_column()
    }
}

impl From<Value> for RelationalValueBinding {
    fn from(value: Value) -> Self {
        if value.is_column() {
            Self::column(value)
        } else {
            Self::derived(value)
        }
    }
}
