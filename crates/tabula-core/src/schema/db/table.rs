use super::{Column, ColumnsDiff, Type};

/// Name of the hidden row identity column every physical table carries.
pub const ROW_ID_COLUMN: &str = "id";

/// A database table
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Name of the table
    pub name: String,

    /// The table's columns. The first column is always the row identity.
    pub columns: Vec<Column>,
}

impl Table {
    /// Creates a table holding only the row identity column.
    pub fn new(name: impl Into<String>) -> Table {
        Table {
            name: name.into(),
            columns: vec![Column {
                name: ROW_ID_COLUMN.to_string(),
                storage_ty: Type::Integer(8),
                nullable: false,
                primary_key: true,
                auto_increment: true,
            }],
        }
    }

    pub fn primary_key_column(&self) -> &Column {
        &self.columns[0]
    }

    /// Columns backing model fields, in field order.
    pub fn field_columns(&self) -> &[Column] {
        &self.columns[1..]
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn diff<'a>(&'a self, to: &'a Table) -> ColumnsDiff<'a> {
        ColumnsDiff::from(&self.columns, &to.columns)
    }
}
