use super::{ColumnDef, Name, Statement};

use tabula_core::{
    driver::Capability,
    schema::db::{Column, Table},
};

/// A statement to add a column to a table.
#[derive(Debug, Clone)]
pub struct AddColumn {
    /// Name of the table to add the column to.
    pub table: Name,

    /// Column definition.
    pub column: ColumnDef,
}

impl Statement {
    /// Adds a column to a table.
    pub fn add_column(table: &Table, column: &Column, capability: &Capability) -> Self {
        AddColumn {
            table: Name::from(&table.name),
            column: ColumnDef::from_schema(column, &capability.storage_types),
        }
        .into()
    }
}

impl From<AddColumn> for Statement {
    fn from(value: AddColumn) -> Self {
        Self::AddColumn(value)
    }
}
