use super::{Connect, Db, Pool, PoolConfig, Shared};
use crate::{registry::Registry, Result};

use tabula_core::{
    bail,
    driver::Driver,
    schema::{db, mapping, Mapping},
};

use std::sync::Arc;

#[derive(Debug, Default)]
pub struct Builder {
    table_name_prefix: Option<String>,
    text_max_length: Option<u64>,
    pool: PoolConfig,
}

impl Builder {
    /// Set the table name prefix for all tables
    pub fn table_name_prefix(&mut self, prefix: &str) -> &mut Self {
        self.table_name_prefix = Some(prefix.to_string());
        self
    }

    /// Set the length bound of text columns and text values
    pub fn text_max_length(&mut self, max: u64) -> &mut Self {
        self.text_max_length = Some(max);
        self
    }

    /// Cap the number of open connections. Drivers with their own limit,
    /// such as in-memory SQLite, may lower it further.
    pub fn max_connections(&mut self, max: usize) -> &mut Self {
        self.pool.max_size = max;
        self
    }

    pub async fn connect(&mut self, url: &str) -> Result<Db> {
        self.build(Connect::new(url)?).await
    }

    /// Opens the pool and loads every persisted model.
    pub async fn build(&mut self, driver: impl Driver) -> Result<Db> {
        let capability = driver.capability();

        let requested = self
            .text_max_length
            .unwrap_or(mapping::DEFAULT_TEXT_MAX_LENGTH);
        if requested == 0 {
            bail!("text_max_length must be at least 1");
        }

        let text_max_length = match capability.text_type(requested) {
            db::Type::VarChar(max) => max,
            _ => requested,
        };

        let mapping = Mapping {
            table_name_prefix: self
                .table_name_prefix
                .clone()
                .unwrap_or_else(|| mapping::DEFAULT_TABLE_NAME_PREFIX.to_string()),
            text_max_length,
        };

        let pool = Pool::new(driver, self.pool.clone())?;
        let models = pool.get().await?.load_catalog().await?;

        tracing::debug!(
            target: "tabula",
            models = models.len(),
            prefix = %mapping.table_name_prefix,
            text_max_length,
            "catalog loaded"
        );

        Ok(Db {
            shared: Arc::new(Shared {
                pool,
                registry: Registry::new(models),
                mapping,
            }),
        })
    }
}
