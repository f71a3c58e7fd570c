//! BankAdministration - the application facade
//!
//! The operations themselves live next to the entity they are about
//! (`user.rs`, `customer.rs`, `account.rs`, `transaction.rs`); this module
//! holds the facade state and its constructors.

use crate::config::BankConfig;
use anyhow::Context;
use bankadmin_core::Id;
use bankadmin_persistence::{AccountMapper, CustomerMapper, Database, TransactionMapper, UserMapper};
use std::sync::Arc;

/// Result type for facade operations.
///
/// Failures are always propagated persistence errors with context attached.
/// "Not found" is never an error: it is `None` or an empty `Vec`.
pub type BankResult<T> = anyhow::Result<T>;

/// Facade over the four mappers.
///
/// Multi-step operations (`delete_customer`, `delete_account`, balances) run
/// their mapper calls one after another without an enclosing database
/// transaction. If a step fails the error is returned immediately and the
/// steps that already ran stay committed.
pub struct BankAdministration {
    pub(crate) users: Arc<dyn UserMapper>,
    pub(crate) customers: Arc<dyn CustomerMapper>,
    pub(crate) accounts: Arc<dyn AccountMapper>,
    pub(crate) transactions: Arc<dyn TransactionMapper>,
    pub(crate) config: BankConfig,
}

impl BankAdministration {
    /// Facade backed by the SQLite mappers of `db`
    pub fn new(db: &Database, config: BankConfig) -> Self {
        Self::with_mappers(
            Arc::new(db.user_mapper()),
            Arc::new(db.customer_mapper()),
            Arc::new(db.account_mapper()),
            Arc::new(db.transaction_mapper()),
            config,
        )
    }

    /// Connect to `config.database_url` (creating schema if needed)
    pub async fn open(config: BankConfig) -> BankResult<Self> {
        let db = Database::connect(&config.database_url)
            .await
            .with_context(|| format!("Failed to open database {}", config.database_url))?;
        Ok(Self::new(&db, config))
    }

    /// Facade over arbitrary mapper implementations
    pub fn with_mappers(
        users: Arc<dyn UserMapper>,
        customers: Arc<dyn CustomerMapper>,
        accounts: Arc<dyn AccountMapper>,
        transactions: Arc<dyn TransactionMapper>,
        config: BankConfig,
    ) -> Self {
        Self {
            users,
            customers,
            accounts,
            transactions,
            config,
        }
    }

    pub fn config(&self) -> &BankConfig {
        &self.config
    }

    /// Id của cash account đang được cấu hình
    pub fn cash_account_id(&self) -> Id {
        self.config.cash_account_id
    }
}
