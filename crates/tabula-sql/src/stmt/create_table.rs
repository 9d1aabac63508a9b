use super::{ColumnDef, Name, Statement};

use tabula_core::{driver::Capability, schema::db::Table};

#[derive(Debug, Clone)]
pub struct CreateTable {
    /// Name of the table
    pub name: Name,

    /// Column definitions
    pub columns: Vec<ColumnDef>,
}

impl Statement {
    pub fn create_table(table: &Table, capability: &Capability) -> Self {
        Statement::create_table_named(&table.name, table, capability)
    }

    /// Creates a table shaped like `table` under a different name.
    pub fn create_table_named(name: &str, table: &Table, capability: &Capability) -> Self {
        CreateTable {
            name: Name::from(name),
            columns: table
                .columns
                .iter()
                .map(|column| ColumnDef::from_schema(column, &capability.storage_types))
                .collect(),
        }
        .into()
    }
}

impl From<CreateTable> for Statement {
    fn from(value: CreateTable) -> Self {
        Self::CreateTable(value)
    }
}
