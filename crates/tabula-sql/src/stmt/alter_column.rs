use super::{ColumnDef, Conversion, Name, Statement};

use tabula_core::{
    driver::Capability,
    schema::db::{Column, Table},
};

/// A statement changing the type of a column in place.
#[derive(Debug, Clone)]
pub struct AlterColumn {
    /// Name of the table containing the column.
    pub table: Name,

    /// New column definition.
    pub column: ColumnDef,

    /// Rewrite applied to existing values.
    pub conversion: Conversion,
}

impl Statement {
    /// Retypes `from` into `to`, converting the stored values.
    pub fn alter_column(table: &Table, from: &Column, to: &Column, capability: &Capability) -> Self {
        let column = ColumnDef::from_schema(to, &capability.storage_types);
        let conversion = Conversion {
            from: from.storage_ty.clone(),
            to: column.ty.clone(),
        };

        AlterColumn {
            table: Name::from(&table.name),
            column,
            conversion,
        }
        .into()
    }
}

impl From<AlterColumn> for Statement {
    fn from(value: AlterColumn) -> Self {
        Self::AlterColumn(value)
    }
}
