//! Mapper contracts
//!
//! Mỗi business object có một mapper chuyển đổi giữa object và một row trong
//! bảng tương ứng. The facade only talks to these traits, so any backing
//! store (or a test double) can stand behind them.

use crate::error::PersistenceResult;
use async_trait::async_trait;
use bankadmin_core::{Account, Customer, Id, Transaction, User};

/// Operations every entity mapper provides.
///
/// Each call is self-contained: it acquires its own connection, commits its
/// own statements and releases the connection before returning. Nothing is
/// shared between two calls, so a sequence of calls is not atomic.
#[async_trait]
pub trait Mapper: Send + Sync {
    type Entity: Send + Sync;

    /// All rows of the table.
    async fn find_all(&self) -> PersistenceResult<Vec<Self::Entity>>;

    /// The row with primary key `id`, `None` if there is none.
    async fn find_by_key(&self, id: Id) -> PersistenceResult<Option<Self::Entity>>;

    /// Inserts `entity` under a fresh key (`MAX(id) + 1`, or 1 for an empty
    /// table) and returns it with that key. The incoming id is ignored.
    async fn insert(&self, entity: Self::Entity) -> PersistenceResult<Self::Entity>;

    /// Overwrites all non-key columns of the row whose key is `entity.id`.
    async fn update(&self, entity: &Self::Entity) -> PersistenceResult<()>;

    /// Removes the row whose key is `entity.id`. No-op if it does not exist.
    async fn delete(&self, entity: &Self::Entity) -> PersistenceResult<()>;
}

#[async_trait]
pub trait UserMapper: Mapper<Entity = User> {
    /// Users whose name matches `name` (SQL `LIKE` pattern), ordered by name
    async fn find_by_name(&self, name: &str) -> PersistenceResult<Vec<User>>;

    async fn find_by_email(&self, email: &str) -> PersistenceResult<Option<User>>;

    async fn find_by_google_user_id(&self, user_id: &str) -> PersistenceResult<Option<User>>;
}

#[async_trait]
pub trait CustomerMapper: Mapper<Entity = Customer> {
    /// Customers whose last name matches `last_name` (SQL `LIKE` pattern)
    async fn find_by_last_name(&self, last_name: &str) -> PersistenceResult<Vec<Customer>>;
}

#[async_trait]
pub trait AccountMapper: Mapper<Entity = Account> {
    async fn find_by_owner_id(&self, owner_id: Id) -> PersistenceResult<Vec<Account>>;
}

#[async_trait]
pub trait TransactionMapper: Mapper<Entity = Transaction> {
    /// Debits: transactions whose source is `account_id`, ordered by id
    async fn find_by_source_account_id(&self, account_id: Id) -> PersistenceResult<Vec<Transaction>>;

    /// Credits: transactions whose target is `account_id`, ordered by id
    async fn find_by_target_account_id(&self, account_id: Id) -> PersistenceResult<Vec<Transaction>>;
}
