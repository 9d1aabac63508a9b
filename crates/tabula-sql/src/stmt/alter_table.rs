use super::{Name, Statement};

/// A statement to alter a SQL table.
#[derive(Debug, Clone)]
pub struct AlterTable {
    /// Current name of the table.
    pub name: Name,

    /// The alteration to apply.
    pub action: AlterTableAction,
}

/// The action to perform in an ALTER TABLE statement.
#[derive(Debug, Clone)]
pub enum AlterTableAction {
    /// Rename the table to a new name.
    RenameTo(Name),
}

impl Statement {
    /// Renames a table.
    pub fn alter_table_rename_to(name: impl Into<Name>, new_name: impl Into<Name>) -> Self {
        AlterTable {
            name: name.into(),
            action: AlterTableAction::RenameTo(new_name.into()),
        }
        .into()
    }
}

impl From<AlterTable> for Statement {
    fn from(value: AlterTable) -> Self {
        Self::AlterTable(value)
    }
}
