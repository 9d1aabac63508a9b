mod catalog;

mod value;
pub(crate) use value::Value;

use rusqlite::Connection as RusqliteConnection;
use std::path::{Path, PathBuf};
use tabula_core::{
    async_trait,
    driver::{
        operation::{Insert, Operation, Scan},
        Capability, Driver, Response,
    },
    schema::{
        app::Model,
        db::{Migration, Table, ROW_ID_COLUMN},
    },
    stmt, Error, Result,
};
use tabula_sql::{self as sql, MigrationStatement};
use url::Url;

/// SQLite caps bound parameters per statement at 32766.
const MAX_PARAMS: usize = 32_766;

#[derive(Debug)]
pub enum Sqlite {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Create a new SQLite driver with an arbitrary connection URL
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str)
            .map_err(|err| Error::invalid_connection_url(format!("{err}; url={url_str}")))?;

        if url.scheme() != "sqlite" {
            return Err(Error::invalid_connection_url(format!(
                "connection URL does not have a `sqlite` scheme; url={url_str}"
            )));
        }

        if url.path() == ":memory:" {
            Ok(Self::InMemory)
        } else if url.path().is_empty() {
            Err(Error::invalid_connection_url(format!(
                "connection URL has no database path; url={url_str}"
            )))
        } else {
            Ok(Self::File(PathBuf::from(url.path())))
        }
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }
}

#[async_trait]
impl Driver for Sqlite {
    fn capability(&self) -> &'static Capability {
        &Capability::SQLITE
    }

    async fn connect(&self) -> Result<Box<dyn tabula_core::Connection>> {
        let connection = match self {
            Sqlite::File(path) => Connection::open(path)?,
            Sqlite::InMemory => Connection::in_memory()?,
        };
        Ok(Box::new(connection))
    }

    fn max_connections(&self) -> Option<usize> {
        // Every in-memory connection is a separate database
        matches!(self, Self::InMemory).then_some(1)
    }
}

#[derive(Debug)]
pub struct Connection {
    connection: RusqliteConnection,
}

impl Connection {
    pub fn in_memory() -> Result<Self> {
        let connection =
            RusqliteConnection::open_in_memory().map_err(Error::driver_operation_failed)?;

        Ok(Self { connection })
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = RusqliteConnection::open(path).map_err(Error::driver_operation_failed)?;
        let sqlite = Self { connection };
        Ok(sqlite)
    }
}

#[async_trait]
impl tabula_core::driver::Connection for Connection {
    fn capability(&self) -> &'static Capability {
        &Capability::SQLITE
    }

    async fn load_catalog(&mut self) -> Result<Vec<Model>> {
        catalog::ensure(&self.connection)?;
        catalog::load(&self.connection)
    }

    async fn materialize(&mut self, model: &Model, table: &Table) -> Result<()> {
        let sql = serialize(&sql::Statement::create_table(table, &Capability::SQLITE));

        self.transaction(|connection| {
            execute(connection, &sql)?;
            catalog::insert_model(connection, model)
        })
    }

    async fn apply_migration(&mut self, migration: &Migration) -> Result<()> {
        let statements: Vec<String> =
            MigrationStatement::from_migration(migration, &Capability::SQLITE)
                .iter()
                .map(|migration_stmt| serialize(migration_stmt.statement()))
                .collect();

        self.transaction(|connection| {
            for sql in &statements {
                execute(connection, sql)?;
            }

            catalog::replace_fields(connection, &migration.model)
        })
    }

    async fn exec(&mut self, op: Operation) -> Result<Response> {
        match op {
            Operation::Insert(op) => self.insert(op),
            Operation::Scan(op) => self.scan(op),
        }
    }
}

impl Connection {
    /// Runs `f` between `BEGIN` and `COMMIT`, rolling back if it fails.
    fn transaction<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&RusqliteConnection) -> Result<()>,
    {
        execute(&self.connection, "BEGIN")?;

        if let Err(err) = f(&self.connection) {
            execute(&self.connection, "ROLLBACK")?;
            return Err(err);
        }

        execute(&self.connection, "COMMIT")
    }

    fn insert(&mut self, op: Insert) -> Result<Response> {
        let Insert {
            table,
            columns,
            rows,
        } = op;

        if rows.is_empty() {
            return Ok(Response::count(0));
        }

        let columns: Vec<sql::stmt::Name> = columns.into_iter().map(Into::into).collect();
        let chunk_len = (MAX_PARAMS / columns.len().max(1)).max(1);
        let mut count = 0;

        self.transaction(|connection| {
            for chunk in rows.chunks(chunk_len) {
                let insert = sql::Statement::insert(&table, columns.clone(), chunk.to_vec());

                let mut params = Vec::<stmt::Value>::new();
                let sql_str = sql::Serializer::sqlite().serialize(&insert, &mut params);
                tracing::trace!(
                    target: "tabula::sqlite",
                    sql = %sql_str,
                    params = params.len(),
                    "insert"
                );

                let params = params.into_iter().map(Value::from).collect::<Vec<_>>();

                count += connection
                    .prepare_cached(&sql_str)
                    .and_then(|mut statement| {
                        statement.execute(rusqlite::params_from_iter(params.iter()))
                    })
                    .map_err(Error::driver_operation_failed)?;
            }
            Ok(())
        })?;

        Ok(Response::count(count as u64))
    }

    fn scan(&mut self, op: Scan) -> Result<Response> {
        let names = op
            .columns
            .iter()
            .map(|column| sql::stmt::Name::from(&column.name))
            .collect();
        let select = sql::Statement::select(&op.table, names, Some(ROW_ID_COLUMN.into()));
        let sql_str = serialize(&select);

        let mut statement = self
            .connection
            .prepare_cached(&sql_str)
            .map_err(Error::driver_operation_failed)?;

        let mut rows = statement.query([]).map_err(Error::driver_operation_failed)?;
        let mut ret: Vec<stmt::Value> = vec![];

        loop {
            match rows.next() {
                Ok(Some(row)) => {
                    let mut items = Vec::with_capacity(op.columns.len());

                    for (index, column) in op.columns.iter().enumerate() {
                        let value = Value::from_sql(row, index, &column.storage_ty)
                            .map_err(Error::driver_operation_failed)?;
                        items.push(value.into_inner());
                    }

                    ret.push(stmt::ValueRecord::from_vec(items).into());
                }
                Ok(None) => break,
                Err(err) => {
                    return Err(Error::driver_operation_failed(err));
                }
            }
        }

        tracing::trace!(target: "tabula::sqlite", table = %op.table, rows = ret.len(), "scan");

        Ok(Response::value_stream(stmt::ValueStream::from_vec(ret)))
    }
}

/// Serializes a statement that binds no parameters.
fn serialize(statement: &sql::Statement) -> String {
    let mut params = Vec::<stmt::Value>::new();
    let sql = sql::Serializer::sqlite().serialize(statement, &mut params);
    debug_assert!(params.is_empty(), "statement should not have parameters");
    sql
}

fn execute(connection: &RusqliteConnection, sql: &str) -> Result<()> {
    tracing::trace!(target: "tabula::sqlite", sql, "execute");

    connection
        .execute_batch(sql)
        .map_err(Error::driver_operation_failed)
}
