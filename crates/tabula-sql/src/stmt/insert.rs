use super::{Name, Statement};

use tabula_core::stmt::ValueRecord;

/// A multi-row `INSERT ... VALUES` statement. Values become parameters.
#[derive(Debug, Clone)]
pub struct Insert {
    pub table: Name,
    pub columns: Vec<Name>,
    pub rows: Vec<ValueRecord>,
}

impl Statement {
    pub fn insert(table: impl Into<Name>, columns: Vec<Name>, rows: Vec<ValueRecord>) -> Self {
        Insert {
            table: table.into(),
            columns,
            rows,
        }
        .into()
    }
}

impl From<Insert> for Statement {
    fn from(value: Insert) -> Self {
        Self::Insert(value)
    }
}
