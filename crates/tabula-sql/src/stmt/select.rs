use super::{Name, Statement};

/// Reads columns from every row of a table.
#[derive(Debug, Clone)]
pub struct Select {
    pub table: Name,
    pub columns: Vec<Name>,

    /// Ascending sort column
    pub order_by: Option<Name>,
}

impl Statement {
    pub fn select(table: impl Into<Name>, columns: Vec<Name>, order_by: Option<Name>) -> Self {
        Select {
            table: table.into(),
            columns,
            order_by,
        }
        .into()
    }
}

impl From<Select> for Statement {
    fn from(value: Select) -> Self {
        Self::Select(value)
    }
}
