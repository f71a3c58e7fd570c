//! # Bankadmin Persistence
//!
//! Persistence layer cho Bankadmin - mapper contracts + SQLite mappers.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                    BankAdministration                         │
//! └───────┬──────────────┬───────────────┬───────────────┬────────┘
//!         │ UserMapper   │ CustomerMapper│ AccountMapper │ TransactionMapper
//! ┌───────▼──────────────▼───────────────▼───────────────▼────────┐
//! │          Sqlite*Mapper (one pooled connection per call)       │
//! └───────────────────────────────┬───────────────────────────────┘
//!                                 │
//!                          ┌──────▼──────┐
//!                          │   SQLite    │
//!                          └─────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bankadmin_persistence::{Database, Mapper};
//!
//! let db = Database::connect("sqlite:bank.db?mode=rwc").await?;
//! db.seed_cash_account(10000).await?;
//!
//! let accounts = db.account_mapper().find_all().await?;
//! ```

pub mod error;
pub mod mapper;
pub mod sqlite;

pub use error::{PersistenceError, PersistenceResult};
pub use mapper::{AccountMapper, CustomerMapper, Mapper, TransactionMapper, UserMapper};
pub use sqlite::{
    create_pool, init_database, init_in_memory, SqliteAccountMapper, SqliteCustomerMapper,
    SqliteTransactionMapper, SqliteUserMapper,
};
pub use sqlite::schema::{AccountRow, CustomerRow, TransactionRow, UserRow};

use bankadmin_core::{Account, Id};
use sqlx::SqlitePool;

/// Database handle - owns the SQLite pool and hands out mappers
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (or create) a database and make sure the schema exists
    ///
    /// # Arguments
    /// * `db_url` - SQLite database URL (e.g., "sqlite:bank.db?mode=rwc")
    pub async fn connect(db_url: &str) -> PersistenceResult<Self> {
        let pool = init_database(db_url).await?;
        tracing::debug!(db_url, "Database connected");
        Ok(Self { pool })
    }

    /// Fresh in-memory database, mostly for tests
    pub async fn in_memory() -> PersistenceResult<Self> {
        let pool = init_in_memory().await?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool. The schema is not touched.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get SQLite connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Insert the bank cash account row if it is missing
    pub async fn seed_cash_account(&self, id: Id) -> PersistenceResult<Account> {
        sqlite::seed_cash_account(&self.pool, id).await
    }

    pub fn user_mapper(&self) -> SqliteUserMapper {
        SqliteUserMapper::new(self.pool.clone())
    }

    pub fn customer_mapper(&self) -> SqliteCustomerMapper {
        SqliteCustomerMapper::new(self.pool.clone())
    }

    pub fn account_mapper(&self) -> SqliteAccountMapper {
        SqliteAccountMapper::new(self.pool.clone())
    }

    pub fn transaction_mapper(&self) -> SqliteTransactionMapper {
        SqliteTransactionMapper::new(self.pool.clone())
    }

    /// Close all pooled connections
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
