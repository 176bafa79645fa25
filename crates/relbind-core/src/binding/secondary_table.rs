use super::CustomSql;
use crate::relational::{Table, Value};
use std::sync::Arc;

/// A table joined to the primary table to supply additional columns.
#[derive(Debug, Clone)]
pub struct SecondaryTable {
    pub table: Arc<Table>,

    /// Columns of the secondary table that reference the primary table's key.
    pub foreign_key_columns: Vec<Value>,

    /// An optional join is outer: rows may be missing.
    pub optional: bool,

    /// When true, the owning entity never writes to this table.
    pub inverse: bool,

    pub lazy: bool,

    pub cascade_delete: bool,

    pub custom_insert: Option<CustomSql>,
    pub custom_update: Option<CustomSql>,
    pub custom_delete: Option<CustomSql>,
}

impl SecondaryTable {
    pub fn new(table: Arc<Table>) -> Self {
        Self {
            table,
            foreign_key_columns: vec![],
            optional: false,
            inverse: false,
            lazy: false,
            cascade_delete: false,
            custom_insert: None,
            custom_update: None,
            custom_delete: None,
        }
    }

    /// Name the secondary table is registered under.
    pub fn logical_name(&self) -> &str {
        self.table.logical_name()
    }
}
