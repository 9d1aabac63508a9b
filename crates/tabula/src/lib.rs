//! A dynamic schema engine.
//!
//! Models are defined at runtime as a name and a list of typed fields. Each
//! model is backed by one physical table whose columns follow the model's
//! current fields. Changing the fields migrates the table in place; rows are
//! validated against the fields before they are written and projected back
//! through them when read.
//!
//! ```no_run
//! # async fn demo() -> tabula::Result<()> {
//! let db = tabula::Db::connect("sqlite::memory:").await?;
//!
//! let user = db
//!     .define_model("User", [("name", "text"), ("age", "numeric")])
//!     .await?;
//!
//! db.insert(user.id, vec![tabula::row! { "name" => "Ann", "age" => 31 }])
//!     .await?;
//!
//! for row in &db.project(user.id).await? {
//!     println!("{row:?}");
//! }
//! # Ok(())
//! # }
//! ```

mod accessor;
pub use accessor::{Iter, Projection};

pub mod db;
pub use db::Db;

mod migration;

mod registry;

pub mod request;

pub use tabula_core::{
    driver,
    errors,
    row,
    schema::{
        self,
        app::{Field, FieldId, Model, ModelId},
        FieldsDiff, Kind,
    },
    stmt::{Row, Value},
    Error, ErrorReport, Result,
};
