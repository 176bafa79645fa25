/// Hand-written SQL replacing a generated statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomSql {
    pub sql: String,

    /// True if the SQL invokes a stored procedure.
    pub callable: bool,

    pub check_style: ExecuteUpdateResultCheckStyle,
}

/// How the row count reported by a custom statement is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecuteUpdateResultCheckStyle {
    None,
    #[default]
    Count,
    Param,
}

impl CustomSql {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            callable: false,
            check_style: ExecuteUpdateResultCheckStyle::default(),
        }
    }

    pub fn callable(sql: impl Into<String>) -> Self {
        Self {
            callable: true,
            check_style: ExecuteUpdateResultCheckStyle::Param,
            ..Self::new(sql)
        }
    }
}
