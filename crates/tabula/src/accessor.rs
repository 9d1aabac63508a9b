//! Reads and writes rows through the shape of a model's current fields.

mod projection;
pub use projection::{Iter, Projection};

use tabula_core::{
    driver::operation::{Insert, Scan},
    schema::{
        app::Model,
        db::{Table, ROW_ID_COLUMN},
    },
    stmt::{Row, Value, ValueRecord},
    Connection, Error, Result,
};

use std::sync::Arc;

/// Creates the physical table of a brand-new model and records the model in
/// the catalog.
pub(crate) async fn materialize(
    connection: &mut dyn Connection,
    model: &Model,
    table: &Table,
) -> Result<()> {
    if model.fields.is_empty() {
        return Err(Error::empty_field_set());
    }

    connection
        .materialize(model, table)
        .await
        .map_err(|err| err.context(Error::materialization_failed(model.name.as_str())))
}

/// Writes one record per row. Fields a row omits are stored as null.
///
/// `rows` must already have passed row validation against `model`.
pub(crate) async fn insert(
    connection: &mut dyn Connection,
    model: &Model,
    table: &Table,
    rows: Vec<Row>,
) -> Result<u64> {
    if rows.is_empty() {
        return Ok(0);
    }

    let columns: Vec<String> = table
        .field_columns()
        .iter()
        .map(|column| column.name.clone())
        .collect();

    let records = rows
        .iter()
        .map(|row| {
            ValueRecord::from_vec(
                model
                    .field_names()
                    .map(|name| row.get(name.as_str()).cloned().unwrap_or_else(Value::null))
                    .collect(),
            )
        })
        .collect();

    let response = connection
        .exec(
            Insert {
                table: table.name.clone(),
                columns,
                rows: records,
            }
            .into(),
        )
        .await?;

    response.rows.into_count()
}

/// Reads every record of `model`'s table, shaped by the model's fields.
pub(crate) async fn project(
    connection: &mut dyn Connection,
    model: Arc<Model>,
    table: &Table,
) -> Result<Projection> {
    debug_assert!(table.column(ROW_ID_COLUMN).is_some());

    let response = connection
        .exec(
            Scan {
                table: table.name.clone(),
                columns: table.field_columns().to_vec(),
            }
            .into(),
        )
        .await?;

    let mut records = vec![];
    let mut values = response.rows.into_values()?;

    while let Some(value) = values.next().await {
        match value? {
            Value::Record(record) => records.push(record),
            value => tabula_core::bail!("expected a record from a scan; got {value}"),
        }
    }

    Ok(Projection::new(model, records))
}
