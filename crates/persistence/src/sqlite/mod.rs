//! SQLite persistence module
//!
//! Mapper implementations, row types and pool setup for SQLite.

pub mod mappers;
pub mod schema;

pub use mappers::{SqliteAccountMapper, SqliteCustomerMapper, SqliteTransactionMapper, SqliteUserMapper};
pub use schema::{
    create_schema, seed_cash_account, AccountRow, CustomerRow, TransactionRow, UserRow,
    BANK_OWNER_ID,
};

use crate::error::PersistenceResult;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Khởi tạo database connection pool
pub async fn create_pool(database_url: &str) -> PersistenceResult<SqlitePool> {
    let pool = SqlitePool::connect(database_url).await?;
    Ok(pool)
}

/// Tạo database (file nếu chưa có) và schema
pub async fn init_database(database_url: &str) -> PersistenceResult<SqlitePool> {
    let pool = SqlitePool::connect_with(
        SqliteConnectOptions::from_str(database_url)?.create_if_missing(true),
    )
    .await?;

    create_schema(&pool).await?;

    Ok(pool)
}

/// In-memory database with schema.
///
/// Every SQLite `:memory:` connection is its own database, so the pool is
/// pinned to one connection that is never recycled.
pub async fn init_in_memory() -> PersistenceResult<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;

    create_schema(&pool).await?;

    Ok(pool)
}
