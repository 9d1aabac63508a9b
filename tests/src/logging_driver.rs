use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};
use tabula_core::{
    async_trait,
    driver::{Capability, Connection, Driver, Operation, Response},
    err,
    schema::{
        app::Model,
        db::{Migration, Table},
    },
    Result,
};
use tokio::sync::Semaphore;

/// Storage operations seen by a [`LoggingDriver`], in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverOp {
    Materialize { table: String },
    Migrate { table: String, steps: usize },
    Insert { table: String, rows: usize },
    Scan { table: String },
}

#[derive(Debug, Clone, Default)]
pub struct OpsLog {
    ops: Arc<Mutex<Vec<DriverOp>>>,

    /// When set, every migration is rejected before reaching storage
    fail_migrations: Arc<AtomicBool>,

    /// When set, migrations wait on the gate before reaching storage
    hold: Arc<Mutex<Option<MigrationGate>>>,
}

/// Parks migrations until released. See [`OpsLog::hold_migrations`].
#[derive(Debug, Clone)]
pub struct MigrationGate {
    entered: Arc<Semaphore>,
    release: Arc<Semaphore>,
}

impl MigrationGate {
    /// Waits until a migration is parked at the gate.
    pub async fn entered(&self) {
        match self.entered.acquire().await {
            Ok(permit) => permit.forget(),
            Err(err) => panic!("migration gate closed; err={err}"),
        }
    }

    /// Lets one parked migration continue to storage.
    pub fn release(&self) {
        self.release.add_permits(1);
    }

    async fn wait(&self) -> Result<()> {
        self.entered.add_permits(1);
        let permit = self
            .release
            .acquire()
            .await
            .map_err(|err| err!("migration gate closed: {err}"))?;
        permit.forget();
        Ok(())
    }
}

impl OpsLog {
    pub fn ops(&self) -> Vec<DriverOp> {
        self.ops.lock().expect("ops log poisoned").clone()
    }

    pub fn clear(&self) {
        self.ops.lock().expect("ops log poisoned").clear();
    }

    pub fn fail_migrations(&self, fail: bool) {
        self.fail_migrations.store(fail, Ordering::SeqCst);
    }

    /// Parks every following migration until the returned gate releases it.
    pub fn hold_migrations(&self) -> MigrationGate {
        let gate = MigrationGate {
            entered: Arc::new(Semaphore::new(0)),
            release: Arc::new(Semaphore::new(0)),
        };
        *self.hold.lock().expect("ops log poisoned") = Some(gate.clone());
        gate
    }

    fn push(&self, op: DriverOp) {
        self.ops.lock().expect("ops log poisoned").push(op);
    }
}

/// A driver wrapper that records every storage operation and can be told to
/// reject or park migrations.
#[derive(Debug)]
pub struct LoggingDriver {
    inner: Box<dyn Driver>,
    log: OpsLog,
}

impl LoggingDriver {
    pub fn new(driver: impl Driver) -> Self {
        Self {
            inner: Box::new(driver),
            log: OpsLog::default(),
        }
    }

    /// Get a handle to access the operations log
    pub fn log_handle(&self) -> OpsLog {
        self.log.clone()
    }
}

#[async_trait]
impl Driver for LoggingDriver {
    fn capability(&self) -> &'static Capability {
        self.inner.capability()
    }

    async fn connect(&self) -> Result<Box<dyn Connection>> {
        Ok(Box::new(LoggingConnection {
            inner: self.inner.connect().await?,
            log: self.log.clone(),
        }))
    }

    fn max_connections(&self) -> Option<usize> {
        self.inner.max_connections()
    }
}

#[derive(Debug)]
struct LoggingConnection {
    inner: Box<dyn Connection>,
    log: OpsLog,
}

#[async_trait]
impl Connection for LoggingConnection {
    fn capability(&self) -> &'static Capability {
        self.inner.capability()
    }

    async fn load_catalog(&mut self) -> Result<Vec<Model>> {
        self.inner.load_catalog().await
    }

    async fn materialize(&mut self, model: &Model, table: &Table) -> Result<()> {
        self.log.push(DriverOp::Materialize {
            table: table.name.clone(),
        });
        self.inner.materialize(model, table).await
    }

    async fn apply_migration(&mut self, migration: &Migration) -> Result<()> {
        self.log.push(DriverOp::Migrate {
            table: migration.next.name.clone(),
            steps: migration.steps.len(),
        });

        if self.log.fail_migrations.load(Ordering::SeqCst) {
            return Err(err!("injected failure"));
        }

        let gate = self.log.hold.lock().expect("ops log poisoned").clone();
        if let Some(gate) = gate {
            gate.wait().await?;
        }

        self.inner.apply_migration(migration).await
    }

    async fn exec(&mut self, op: Operation) -> Result<Response> {
        self.log.push(match &op {
            Operation::Insert(insert) => DriverOp::Insert {
                table: insert.table.clone(),
                rows: insert.rows.len(),
            },
            Operation::Scan(scan) => DriverOp::Scan {
                table: scan.table.clone(),
            },
        });

        self.inner.exec(op).await
    }
}
