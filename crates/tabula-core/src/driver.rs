mod capability;
pub use capability::{Capability, SchemaMutations, StorageTypes};

mod response;
pub use response::{Response, Rows};

pub mod operation;
pub use operation::Operation;

use crate::{
    async_trait,
    schema::{
        app::Model,
        db::{Migration, Table},
    },
};

use std::fmt::Debug;

#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Describes the driver's capability, which informs migration lowering.
    fn capability(&self) -> &'static Capability;

    /// Creates a new connection to the database.
    async fn connect(&self) -> crate::Result<Box<dyn Connection>>;

    /// Upper bound on open connections, if the database imposes one.
    fn max_connections(&self) -> Option<usize> {
        None
    }
}

#[async_trait]
pub trait Connection: Debug + Send + 'static {
    fn capability(&self) -> &'static Capability;

    /// Reads every persisted model and its fields, creating the catalog
    /// storage if it does not exist yet.
    async fn load_catalog(&mut self) -> crate::Result<Vec<Model>>;

    /// Creates `table` for a new `model` and records the model in the catalog
    /// as one unit of work.
    async fn materialize(&mut self, model: &Model, table: &Table) -> crate::Result<()>;

    /// Applies the structural steps of `migration` and then replaces the
    /// model's catalog fields with `migration.model.fields`.
    ///
    /// When [`Capability::transactional_ddl`] is true, either everything
    /// commits or nothing does. Otherwise steps commit progressively and the
    /// catalog is only touched after the last step succeeds.
    async fn apply_migration(&mut self, migration: &Migration) -> crate::Result<()>;

    /// Execute a row operation
    async fn exec(&mut self, op: Operation) -> crate::Result<Response>;
}
