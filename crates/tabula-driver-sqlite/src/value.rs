use rusqlite::{
    types::{ToSql, ToSqlOutput, Value as SqlValue, ValueRef},
    Row,
};
use tabula_core::{
    schema::db,
    stmt::{self, Value as CoreValue},
};

#[derive(Debug)]
pub struct Value(CoreValue);

impl From<CoreValue> for Value {
    fn from(value: CoreValue) -> Self {
        Self(value)
    }
}

impl Value {
    /// Converts this SQLite driver value into the core value.
    pub fn into_inner(self) -> CoreValue {
        self.0
    }

    /// Converts a SQLite value within a row to a core value, guided by the
    /// column's storage type.
    pub fn from_sql(row: &Row, index: usize, ty: &db::Type) -> rusqlite::Result<Self> {
        let value: SqlValue = row.get(index)?;

        let core_value = match value {
            SqlValue::Null => stmt::Value::Null,
            SqlValue::Integer(value) => match ty {
                db::Type::Boolean => stmt::Value::Bool(value != 0),
                db::Type::Integer(_) => stmt::Value::I64(value),
                // TEXT affinity normally converts on write; be lenient on read
                db::Type::VarChar(_) => stmt::Value::String(value.to_string()),
            },
            SqlValue::Text(value) => stmt::Value::String(value),
            SqlValue::Real(value) => stmt::Value::F64(value),
            SqlValue::Blob(_) => {
                return Err(rusqlite::Error::InvalidColumnType(
                    index,
                    "blob".to_string(),
                    rusqlite::types::Type::Blob,
                ))
            }
        };

        Ok(Value(core_value))
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        use stmt::Value;

        match &self.0 {
            Value::Bool(true) => Ok(ToSqlOutput::Owned(SqlValue::Integer(1))),
            Value::Bool(false) => Ok(ToSqlOutput::Owned(SqlValue::Integer(0))),
            Value::I64(v) => Ok(ToSqlOutput::Owned(SqlValue::Integer(*v))),
            Value::F64(v) => Ok(ToSqlOutput::Owned(SqlValue::Real(*v))),
            Value::String(v) => Ok(ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes()))),
            Value::Null => Ok(ToSqlOutput::Owned(SqlValue::Null)),
            Value::Record(_) => Err(rusqlite::Error::ToSqlConversionFailure(
                "a record cannot be bound as a parameter".into(),
            )),
        }
    }
}
