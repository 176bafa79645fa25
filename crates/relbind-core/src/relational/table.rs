/// A table (or inline view) that backs one or more entities.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Table {
    /// Name the mapping uses to refer to the table.
    pub logical_name: String,

    /// Name of the table in the database, when it differs from the logical name.
    pub physical_name: Option<String>,

    /// Database schema (namespace) containing the table.
    pub schema: Option<String>,
}

impl Table {
    pub fn new(logical_name: impl Into<String>) -> Self {
        Self {
            logical_name: logical_name.into(),
            physical_name: None,
            schema: None,
        }
    }

    pub fn logical_name(&self) -> &str {
        &self.logical_name
    }

    pub fn physical_name(&self) -> &str {
        self.physical_name.as_deref().unwrap_or(&self.logical_name)
    }

    /// Returns a reference to a column of this table.
    pub fn column(&self, name: impl Into<String>) -> super::Column {
        super::Column {
            table: self.logical_name.clone(),
            name: name.into(),
        }
    }
}
