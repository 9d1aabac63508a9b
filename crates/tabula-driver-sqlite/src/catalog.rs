//! Persistent registry storage.
//!
//! Two tables hold every model and its ordered field list. They are created
//! on first use and only ever changed inside the same transaction as the
//! structural change they describe.

use rusqlite::{params, Connection as RusqliteConnection, OptionalExtension};
use tabula_core::{
    schema::{
        app::{Field, FieldId, Model, ModelId},
        Kind, Name,
    },
    Error, Result,
};

const CREATE_MODELS: &str = r#"CREATE TABLE IF NOT EXISTS "__tabula_models" (
    "id" INTEGER PRIMARY KEY,
    "name" TEXT NOT NULL UNIQUE
)"#;

const CREATE_FIELDS: &str = r#"CREATE TABLE IF NOT EXISTS "__tabula_fields" (
    "id" INTEGER PRIMARY KEY,
    "model_id" INTEGER NOT NULL REFERENCES "__tabula_models" ("id"),
    "position" INTEGER NOT NULL,
    "name" TEXT NOT NULL,
    "kind" TEXT NOT NULL,
    UNIQUE ("model_id", "name")
)"#;

pub(crate) fn ensure(connection: &RusqliteConnection) -> Result<()> {
    connection
        .execute_batch(&format!("{CREATE_MODELS};\n{CREATE_FIELDS};"))
        .map_err(Error::driver_operation_failed)
}

pub(crate) fn load(connection: &RusqliteConnection) -> Result<Vec<Model>> {
    let mut models = {
        let mut stmt = connection
            .prepare(r#"SELECT "id", "name" FROM "__tabula_models" ORDER BY "id""#)
            .map_err(Error::driver_operation_failed)?;

        let rows = stmt
            .query_map([], |row| {
                Ok(Model {
                    id: ModelId(row.get::<_, i64>(0)? as u64),
                    name: Name::from_trusted(row.get::<_, String>(1)?),
                    fields: vec![],
                })
            })
            .map_err(Error::driver_operation_failed)?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(Error::driver_operation_failed)?
    };

    let mut stmt = connection
        .prepare(
            r#"SELECT "id", "model_id", "name", "kind" FROM "__tabula_fields" ORDER BY "model_id", "position""#,
        )
        .map_err(Error::driver_operation_failed)?;

    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        })
        .map_err(Error::driver_operation_failed)?;

    for row in rows {
        let (id, model_id, name, kind) = row.map_err(Error::driver_operation_failed)?;
        let model_id = ModelId(model_id as u64);

        let Some(model) = models.iter_mut().find(|model| model.id == model_id) else {
            return Err(tabula_core::err!(
                "catalog field `{name}` references missing model id={model_id}"
            ));
        };

        model.fields.push(Field {
            id: FieldId(id as u64),
            model: model_id,
            name: Name::from_trusted(name),
            kind: Kind::from_name(&kind)?,
        });
    }

    Ok(models)
}

pub(crate) fn insert_model(connection: &RusqliteConnection, model: &Model) -> Result<()> {
    connection
        .execute(
            r#"INSERT INTO "__tabula_models" ("id", "name") VALUES (?1, ?2)"#,
            params![model.id.0 as i64, model.name.as_str()],
        )
        .map_err(Error::driver_operation_failed)?;

    insert_fields(connection, model)
}

/// Replaces the catalog field list of `model` with its current fields.
pub(crate) fn replace_fields(connection: &RusqliteConnection, model: &Model) -> Result<()> {
    let exists = connection
        .query_row(
            r#"SELECT 1 FROM "__tabula_models" WHERE "id" = ?1"#,
            params![model.id.0 as i64],
            |_| Ok(()),
        )
        .optional()
        .map_err(Error::driver_operation_failed)?;

    if exists.is_none() {
        return Err(Error::model_not_found(model.id));
    }

    connection
        .execute(
            r#"DELETE FROM "__tabula_fields" WHERE "model_id" = ?1"#,
            params![model.id.0 as i64],
        )
        .map_err(Error::driver_operation_failed)?;

    insert_fields(connection, model)
}

fn insert_fields(connection: &RusqliteConnection, model: &Model) -> Result<()> {
    let mut stmt = connection
        .prepare_cached(
            r#"INSERT INTO "__tabula_fields" ("id", "model_id", "position", "name", "kind") VALUES (?1, ?2, ?3, ?4, ?5)"#,
        )
        .map_err(Error::driver_operation_failed)?;

    for (position, field) in model.fields.iter().enumerate() {
        stmt.execute(params![
            field.id.0 as i64,
            model.id.0 as i64,
            position as i64,
            field.name.as_str(),
            field.kind.as_str(),
        ])
        .map_err(Error::driver_operation_failed)?;
    }

    Ok(())
}
