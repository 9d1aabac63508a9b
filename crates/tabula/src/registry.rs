use tabula_core::{
    schema::{
        app::{Field, FieldId, FieldSet, Model, ModelId},
        Name,
    },
    Error, Result,
};

use indexmap::IndexMap;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use tokio::sync::{Mutex, MutexGuard, RwLock};

/// The current version of one model.
///
/// Readers (insert, project) hold the read side for the whole storage
/// operation. A migration holds the write side from diff computation through
/// commit, so it never interleaves with another migration or with rows being
/// written or scanned on the same model.
pub(crate) type Slot = Arc<RwLock<Arc<Model>>>;

/// In-memory view of the persisted catalog, and the only place model
/// existence and name uniqueness are decided.
#[derive(Debug)]
pub(crate) struct Registry {
    models: RwLock<IndexMap<ModelId, Entry>>,

    /// Held for the whole of a model definition
    define: Mutex<()>,

    next_model_id: AtomicU64,
    next_field_id: AtomicU64,
}

#[derive(Debug)]
struct Entry {
    /// Model names never change, so they are readable without the slot lock
    name: Name,
    slot: Slot,
}

/// Exclusive right to define a model. Name checks and id allocation made
/// while holding it stay valid until the model is registered.
pub(crate) struct DefineGuard<'a> {
    registry: &'a Registry,
    _guard: MutexGuard<'a, ()>,
}

impl Registry {
    /// Builds the registry from the models loaded out of the catalog.
    pub(crate) fn new(models: Vec<Model>) -> Registry {
        let next_model_id = models.iter().map(|model| model.id.0).max().unwrap_or(0) + 1;
        let next_field_id = models
            .iter()
            .flat_map(|model| &model.fields)
            .map(|field| field.id.0)
            .max()
            .unwrap_or(0)
            + 1;

        let models = models
            .into_iter()
            .map(|model| {
                let id = model.id;
                let entry = Entry {
                    name: model.name.clone(),
                    slot: Arc::new(RwLock::new(Arc::new(model))),
                };
                (id, entry)
            })
            .collect();

        Registry {
            models: RwLock::new(models),
            define: Mutex::new(()),
            next_model_id: AtomicU64::new(next_model_id),
            next_field_id: AtomicU64::new(next_field_id),
        }
    }

    pub(crate) async fn lock_define(&self) -> DefineGuard<'_> {
        DefineGuard {
            registry: self,
            _guard: self.define.lock().await,
        }
    }

    pub(crate) async fn slot(&self, id: ModelId) -> Result<Slot> {
        self.models
            .read()
            .await
            .get(&id)
            .map(|entry| entry.slot.clone())
            .ok_or_else(|| Error::model_not_found(id))
    }

    /// Snapshot of every model, in creation order.
    pub(crate) async fn models(&self) -> Vec<Arc<Model>> {
        let slots: Vec<Slot> = self
            .models
            .read()
            .await
            .values()
            .map(|entry| entry.slot.clone())
            .collect();

        let mut ret = Vec::with_capacity(slots.len());
        for slot in slots {
            ret.push(slot.read().await.clone());
        }
        ret
    }

    pub(crate) fn next_field_id(&self) -> FieldId {
        FieldId(self.next_field_id.fetch_add(1, Ordering::Relaxed))
    }
}

impl DefineGuard<'_> {
    /// Fails with `DuplicateModelName` if `name` is taken.
    pub(crate) async fn check_name(&self, name: &Name) -> Result<()> {
        let models = self.registry.models.read().await;

        if models.values().any(|entry| entry.name == *name) {
            return Err(Error::duplicate_model_name(name.as_str()));
        }

        Ok(())
    }

    /// Assigns identities to a new model and its fields.
    pub(crate) fn build_model(&self, name: Name, fields: &FieldSet) -> Model {
        let id = ModelId(self.registry.next_model_id.fetch_add(1, Ordering::Relaxed));

        Model {
            id,
            name,
            fields: fields
                .iter()
                .map(|(name, kind)| Field {
                    id: self.registry.next_field_id(),
                    model: id,
                    name: name.clone(),
                    kind,
                })
                .collect(),
        }
    }

    /// Makes a materialized model visible to every other operation.
    pub(crate) async fn register(self, model: Model) -> Arc<Model> {
        let model = Arc::new(model);
        let entry = Entry {
            name: model.name.clone(),
            slot: Arc::new(RwLock::new(model.clone())),
        };

        self.registry.models.write().await.insert(model.id, entry);
        model
    }
}
