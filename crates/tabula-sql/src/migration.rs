use tabula_core::{
    driver::Capability,
    schema::db::{Migration, MigrationStep, Table},
};

use crate::stmt::{Conversion, CopyColumn, Name, Statement};

/// Prefix of the scratch table a rebuild copies rows into.
pub const REBUILD_TABLE_PREFIX: &str = "__tabula_rebuild_";

/// One statement of a lowered migration.
#[derive(Debug, Clone)]
pub struct MigrationStatement {
    statement: Statement,
}

impl MigrationStatement {
    /// Lowers `migration` into the ordered statements `capability` can run.
    ///
    /// Adds come first, then alters, then drops. When a column changes type
    /// and the database cannot alter it in place, the whole migration becomes
    /// a table rebuild: create the next shape under a scratch name, copy the
    /// surviving columns with their values converted, drop the old table and
    /// rename the scratch table into place.
    pub fn from_migration(migration: &Migration, capability: &Capability) -> Vec<Self> {
        if migration.has_alters() && !capability.schema_mutations.alter_column_type {
            return rebuild_table(migration, capability);
        }

        let table = &migration.previous;

        migration
            .steps
            .iter()
            .map(|step| match step {
                MigrationStep::AddColumn(column) => {
                    Statement::add_column(table, column, capability)
                }
                MigrationStep::AlterColumn { from, to } => {
                    // The serializer has no in-place form for these backends
                    debug_assert!(capability.schema_mutations.alter_column_type);
                    Statement::alter_column(table, from, to, capability)
                }
                MigrationStep::DropColumn(column) => Statement::drop_column(table, column),
            })
            .map(MigrationStatement::from)
            .collect()
    }

    pub fn statement(&self) -> &Statement {
        &self.statement
    }
}

impl From<Statement> for MigrationStatement {
    fn from(statement: Statement) -> Self {
        MigrationStatement { statement }
    }
}

fn rebuild_table(migration: &Migration, capability: &Capability) -> Vec<MigrationStatement> {
    let previous = &migration.previous;
    let next = &migration.next;
    let scratch = format!("{REBUILD_TABLE_PREFIX}{}", next.name);

    vec![
        Statement::create_table_named(&scratch, next, capability),
        Statement::copy_table(
            Name::from(&previous.name),
            Name::from(&scratch),
            surviving_columns(previous, next),
        ),
        Statement::drop_table(&previous.name),
        Statement::alter_table_rename_to(scratch, &next.name),
    ]
    .into_iter()
    .map(MigrationStatement::from)
    .collect()
}

/// Columns present in both shapes, in the next table's order.
fn surviving_columns(previous: &Table, next: &Table) -> Vec<CopyColumn> {
    next.columns
        .iter()
        .filter_map(|to| {
            let from = previous.column(&to.name)?;

            Some(CopyColumn {
                target: Name::from(&to.name),
                source: Name::from(&from.name),
                conversion: Conversion::between(&from.storage_ty, &to.storage_ty),
            })
        })
        .collect()
}
