use super::{Column, ColumnsDiffItem, Table};
use crate::schema::app::Model;

/// One structural change to a physical table.
#[derive(Debug, Clone, PartialEq)]
pub enum MigrationStep {
    AddColumn(Column),
    AlterColumn { from: Column, to: Column },
    DropColumn(Column),
}

/// The planned move of a model's physical table from one field list to the
/// next.
///
/// A migration carries both table shapes so drivers that cannot alter a
/// column in place can rebuild the table instead of replaying the steps.
#[derive(Debug, Clone)]
pub struct Migration {
    /// The model as it will look once the migration commits
    pub model: Model,

    pub previous: Table,

    pub next: Table,

    /// Ordered adds, then alters, then drops
    pub steps: Vec<MigrationStep>,
}

impl Migration {
    pub fn plan(model: Model, previous: Table, next: Table) -> Migration {
        let steps = previous
            .diff(&next)
            .into_iter()
            .map(|item| match item {
                ColumnsDiffItem::AddColumn(column) => MigrationStep::AddColumn(column.clone()),
                ColumnsDiffItem::AlterColumn { from, to } => MigrationStep::AlterColumn {
                    from: from.clone(),
                    to: to.clone(),
                },
                ColumnsDiffItem::DropColumn(column) => MigrationStep::DropColumn(column.clone()),
            })
            .collect();

        Migration {
            model,
            previous,
            next,
            steps,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn has_alters(&self) -> bool {
        self.steps
            .iter()
            .any(|step| matches!(step, MigrationStep::AlterColumn { .. }))
    }

    /// Counts of (adds, alters, drops).
    pub fn step_counts(&self) -> (usize, usize, usize) {
        self.steps
            .iter()
            .fold((0, 0, 0), |(add, alter, drop), step| match step {
                MigrationStep::AddColumn(_) => (add + 1, alter, drop),
                MigrationStep::AlterColumn { .. } => (add, alter + 1, drop),
                MigrationStep::DropColumn(_) => (add, alter, drop + 1),
            })
    }
}
