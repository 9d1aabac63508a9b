//! Migration Executor: moves a model's table and catalog entry from one field
//! list to the next.

use tabula_core::{
    schema::{
        app::{FieldId, FieldSet, Model},
        db::Migration,
        FieldsDiff, Mapping,
    },
    validate, Connection, Error, Result,
};

/// A validated, not yet applied, change of a model's fields.
#[derive(Debug)]
pub(crate) struct Plan {
    pub(crate) diff: FieldsDiff,
    pub(crate) migration: Migration,
}

impl Plan {
    /// Diffs `current` against `fields` and plans the table changes.
    ///
    /// Fails with `NoChangeRequested` when the field lists carry the same
    /// names and kinds, and with `IllegalRetype` when an existing field would
    /// change to anything but text.
    pub(crate) fn new(
        mapping: &Mapping,
        current: &Model,
        fields: &FieldSet,
        next_field_id: impl FnMut() -> FieldId,
    ) -> Result<Plan> {
        let diff = FieldsDiff::between(&current.fields, fields);

        if diff.is_empty() {
            return Err(Error::no_change_requested());
        }

        validate::retypes(&diff)?;

        let next = Model {
            id: current.id,
            name: current.name.clone(),
            fields: diff.apply(current, next_field_id),
        };

        let previous_table = mapping.table(current);
        let next_table = mapping.table(&next);
        let migration = Migration::plan(next, previous_table, next_table);

        Ok(Plan { diff, migration })
    }

    /// Applies the migration. The catalog only changes once every step went
    /// through.
    pub(crate) async fn apply(&self, connection: &mut dyn Connection) -> Result<()> {
        let model = &self.migration.model;
        let (adds, alters, drops) = self.migration.step_counts();

        tracing::debug!(
            target: "tabula",
            model = %model.name,
            model_id = %model.id,
            adds,
            alters,
            drops,
            "applying migration"
        );

        match connection.apply_migration(&self.migration).await {
            Ok(()) => {
                tracing::info!(
                    target: "tabula",
                    model = %model.name,
                    model_id = %model.id,
                    fields = model.fields.len(),
                    "migration applied"
                );
                Ok(())
            }
            Err(err) => {
                tracing::warn!(
                    target: "tabula",
                    model = %model.name,
                    model_id = %model.id,
                    rolled_back = connection.capability().transactional_ddl,
                    error = %err,
                    "migration failed"
                );
                Err(err.context(Error::migration_failed(model.name.as_str())))
            }
        }
    }

    /// Splits the plan into the field diff and the migrated model.
    pub(crate) fn into_parts(self) -> (FieldsDiff, Model) {
        (self.diff, self.migration.model)
    }
}
