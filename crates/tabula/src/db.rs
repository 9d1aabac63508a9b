mod builder;
mod connect;
mod pool;

pub use builder::Builder;
pub use connect::*;
pub use pool::*;

use crate::{
    accessor::{self, Projection},
    migration::Plan,
    registry::Registry,
    Result,
};

use tabula_core::{
    driver::Capability,
    schema::{
        app::{Model, ModelId},
        db::Table,
        FieldsDiff, Mapping,
    },
    stmt::Row,
    validate,
};

use std::sync::Arc;

/// Shared state between all `Db` clones.
struct Shared {
    pool: Pool,
    registry: Registry,
    mapping: Mapping,
}

/// A handle to the schema engine. Cheap to clone; every clone shares the
/// pool and the registry.
#[derive(Clone)]
pub struct Db {
    shared: Arc<Shared>,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Connects with the default configuration.
    pub async fn connect(url: &str) -> Result<Db> {
        Db::builder().connect(url).await
    }

    /// Defines a new model and materializes its table.
    ///
    /// Names are sanitized, trimmed and lowercased first. Fails with
    /// `DuplicateModelName` if a model with the same name exists and with
    /// `MaterializationFailed` if storage rejects the table.
    pub async fn define_model<I, K, V>(&self, name: &str, fields: I) -> Result<Arc<Model>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let name = validate::model_name(name)?;
        let fields = validate::field_set(fields)?;

        let define = self.shared.registry.lock_define().await;
        define.check_name(&name).await?;

        let model = define.build_model(name, &fields);
        let table = self.shared.mapping.table(&model);

        let mut connection = self.shared.pool.get().await?;
        accessor::materialize(&mut **connection, &model, &table).await?;
        drop(connection);

        tracing::info!(
            target: "tabula",
            model = %model.name,
            model_id = %model.id,
            table = %table.name,
            fields = model.fields.len(),
            "model defined"
        );

        Ok(define.register(model).await)
    }

    /// Returns the model with its current field list.
    pub async fn get_model(&self, id: ModelId) -> Result<Arc<Model>> {
        let slot = self.shared.registry.slot(id).await?;
        let model = slot.read().await.clone();
        Ok(model)
    }

    /// Every model, in creation order.
    pub async fn models(&self) -> Vec<Arc<Model>> {
        self.shared.registry.models().await
    }

    /// Replaces the fields of a model and migrates its table to match.
    ///
    /// Returns what changed. Concurrent calls on the same model run one after
    /// the other; each diff is computed against the fields committed by the
    /// previous one. On a `MigrationFailed` error the caller should re-fetch
    /// the model before retrying.
    pub async fn replace_fields<I, K, V>(&self, id: ModelId, fields: I) -> Result<FieldsDiff>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let fields = validate::field_set(fields)?;
        let slot = self.shared.registry.slot(id).await?;

        // Held until the new model is committed
        let mut current = slot.write().await;

        let plan = Plan::new(&self.shared.mapping, &current, &fields, || {
            self.shared.registry.next_field_id()
        })?;

        let mut connection = self.shared.pool.get().await?;
        plan.apply(&mut **connection).await?;

        let (diff, model) = plan.into_parts();
        *current = Arc::new(model);

        Ok(diff)
    }

    /// Validates `rows` against the model's current fields and writes them
    /// all, or none. Returns the number of rows written.
    pub async fn insert(&self, id: ModelId, rows: Vec<Row>) -> Result<u64> {
        let slot = self.shared.registry.slot(id).await?;
        let model = slot.read().await;

        let rows = validate::rows(&model, rows, self.shared.mapping.text_max_length)?;
        let table = self.shared.mapping.table(&model);

        let mut connection = self.shared.pool.get().await?;
        let count = accessor::insert(&mut **connection, &model, &table, rows).await?;

        tracing::debug!(
            target: "tabula",
            model = %model.name,
            model_id = %model.id,
            count,
            "rows inserted"
        );

        Ok(count)
    }

    /// Reads every row of the model, in insertion order, shaped by the
    /// model's current fields.
    pub async fn project(&self, id: ModelId) -> Result<Projection> {
        let slot = self.shared.registry.slot(id).await?;
        let model = slot.read().await;
        let table = self.shared.mapping.table(&model);

        let mut connection = self.shared.pool.get().await?;
        let projection = accessor::project(&mut **connection, model.clone(), &table).await?;

        tracing::debug!(
            target: "tabula",
            model = %model.name,
            model_id = %model.id,
            rows = projection.len(),
            "projection scanned"
        );

        Ok(projection)
    }

    /// Describes the physical table backing `model`.
    pub fn table(&self, model: &Model) -> Table {
        self.shared.mapping.table(model)
    }

    pub fn mapping(&self) -> &Mapping {
        &self.shared.mapping
    }

    pub fn capability(&self) -> &'static Capability {
        self.shared.pool.capability()
    }
}

impl std::fmt::Debug for Db {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Db")
            .field("mapping", &self.shared.mapping)
            .field("pool", &self.shared.pool)
            .finish()
    }
}
