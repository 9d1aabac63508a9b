//! Request and response payloads exchanged with the layer in front of the
//! engine. Requests deserialize from the caller's body; responses serialize
//! back out. Failures are reported with [`Error::report`](crate::Error::report).

use crate::{Db, Projection, Result};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tabula_core::{
    schema::{app::ModelId, FieldsDiff, Kind, Name},
    stmt::Row,
};

/// Define a new model: `{"model_name": .., "fields": {name: kind}}`
#[derive(Debug, Clone, Deserialize)]
pub struct DefineModel {
    pub model_name: String,
    pub fields: IndexMap<String, String>,
}

/// Replace a model's fields
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateModel {
    pub model_id: ModelId,
    pub fields: IndexMap<String, String>,
}

/// Insert rows into a model
#[derive(Debug, Clone, Deserialize)]
pub struct Populate {
    pub model_id: ModelId,
    pub rows: Vec<Row>,
}

/// List the rows of a model
#[derive(Debug, Clone, Deserialize)]
pub struct List {
    pub model_id: ModelId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelSummary {
    pub model_id: ModelId,
    pub model_name: Name,
}

/// Acknowledges a field update and lists what changed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelUpdated {
    pub model_id: ModelId,
    pub added: Vec<Name>,
    pub retyped: Vec<Retyped>,
    pub removed: Vec<Name>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Retyped {
    pub field_name: Name,
    pub from: Kind,
    pub to: Kind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Populated {
    pub count: u64,
}

impl DefineModel {
    pub async fn exec(self, db: &Db) -> Result<ModelSummary> {
        let model = db.define_model(&self.model_name, &self.fields).await?;

        Ok(ModelSummary {
            model_id: model.id,
            model_name: model.name.clone(),
        })
    }
}

impl UpdateModel {
    pub async fn exec(self, db: &Db) -> Result<ModelUpdated> {
        let diff = db.replace_fields(self.model_id, &self.fields).await?;
        Ok(ModelUpdated::new(self.model_id, diff))
    }
}

impl Populate {
    pub async fn exec(self, db: &Db) -> Result<Populated> {
        let count = db.insert(self.model_id, self.rows).await?;
        Ok(Populated { count })
    }
}

impl List {
    pub async fn exec(self, db: &Db) -> Result<Projection> {
        db.project(self.model_id).await
    }
}

impl ModelUpdated {
    fn new(model_id: ModelId, diff: FieldsDiff) -> ModelUpdated {
        ModelUpdated {
            model_id,
            added: diff.insertions.into_iter().map(|def| def.name).collect(),
            retyped: diff
                .retypes
                .into_iter()
                .map(|retype| Retyped {
                    field_name: retype.name,
                    from: retype.from,
                    to: retype.to,
                })
                .collect(),
            removed: diff.deletions,
        }
    }
}

impl Db {
    /// Summaries of every model, in creation order.
    pub async fn list_models(&self) -> Vec<ModelSummary> {
        self.models()
            .await
            .iter()
            .map(|model| ModelSummary {
                model_id: model.id,
                model_name: model.name.clone(),
            })
            .collect()
    }
}
