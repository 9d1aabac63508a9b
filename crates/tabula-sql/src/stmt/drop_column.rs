use super::{Name, Statement};

use tabula_core::schema::db::{Column, Table};

/// A statement to drop a column from a table.
#[derive(Debug, Clone)]
pub struct DropColumn {
    /// Name of the table.
    pub table: Name,

    /// Name of the column.
    pub name: Name,
}

impl Statement {
    pub fn drop_column(table: &Table, column: &Column) -> Self {
        DropColumn {
            table: Name::from(&table.name),
            name: Name::from(&column.name),
        }
        .into()
    }
}

impl From<DropColumn> for Statement {
    fn from(value: DropColumn) -> Self {
        Self::DropColumn(value)
    }
}
