//! Mapper implementations cho SQLite
//!
//! Every method acquires one pooled connection, runs its statements on it and
//! hands it back to the pool when the `PoolConnection` guard drops, on the
//! success path as well as on `?` early returns. Caller-supplied values are
//! always bound as parameters.

use crate::error::{PersistenceError, PersistenceResult};
use crate::mapper::{AccountMapper, CustomerMapper, Mapper, TransactionMapper, UserMapper};
use crate::sqlite::schema::*;
use async_trait::async_trait;
use bankadmin_core::{Account, Customer, Id, Transaction, User};
use sqlx::pool::PoolConnection;
use sqlx::{Sqlite, SqliteConnection, SqlitePool};

/// Scoped connection for a single mapper call
async fn acquire(pool: &SqlitePool) -> PersistenceResult<PoolConnection<Sqlite>> {
    Ok(pool.acquire().await?)
}

/// Next surrogate key: `MAX(id) + 1`, or 1 for an empty table.
///
/// `table` is always one of the fixed table names of this module, never
/// caller input. Fails once `MAX(id)` is `i64::MAX`.
async fn next_id(conn: &mut SqliteConnection, table: &'static str) -> PersistenceResult<Id> {
    let max: Option<i64> = sqlx::query_scalar(&format!("SELECT MAX(id) FROM {}", table))
        .fetch_one(conn)
        .await?;
    match max {
        None => Ok(1),
        Some(id) => id
            .checked_add(1)
            .ok_or_else(|| PersistenceError::key_space_exhausted(table)),
    }
}

async fn delete_by_id(pool: &SqlitePool, table: &'static str, id: Id) -> PersistenceResult<()> {
    let mut conn = acquire(pool).await?;
    let result = sqlx::query(&format!("DELETE FROM {} WHERE id = ?", table))
        .bind(id)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        tracing::debug!(table, id, "Delete matched no row");
    }
    Ok(())
}

fn log_unmatched_update(table: &'static str, id: Id, rows_affected: u64) {
    if rows_affected == 0 {
        tracing::debug!(table, id, "Update matched no row");
    }
}

// ============================================================================
// User Mapper
// ============================================================================

/// Mapper cho users table
#[derive(Debug, Clone)]
pub struct SqliteUserMapper {
    pool: SqlitePool,
}

impl SqliteUserMapper {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Mapper for SqliteUserMapper {
    type Entity = User;

    async fn find_all(&self) -> PersistenceResult<Vec<User>> {
        let mut conn = acquire(&self.pool).await?;
        let rows = sqlx::query_as::<_, UserRow>(
            "SELECT id, name, email, google_user_id FROM users ORDER BY id",
        )
        .fetch_all(&mut *conn)
        .await?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn find_by_key(&self, id: Id) -> PersistenceResult<Option<User>> {
        let mut conn = acquire(&self.pool).await?;
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, name, email, google_user_id FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(row.map(User::from))
    }

    async fn insert(&self, mut user: User) -> PersistenceResult<User> {
        let mut conn = acquire(&self.pool).await?;
        user.id = next_id(&mut conn, "users").await?;

        sqlx::query("INSERT INTO users (id, name, email, google_user_id) VALUES (?, ?, ?, ?)")
            .bind(user.id)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.user_id)
            .execute(&mut *conn)
            .await?;
        Ok(user)
    }

    async fn update(&self, user: &User) -> PersistenceResult<()> {
        let mut conn = acquire(&self.pool).await?;
        let result =
            sqlx::query("UPDATE users SET name = ?, email = ?, google_user_id = ? WHERE id = ?")
                .bind(&user.name)
                .bind(&user.email)
                .bind(&user.user_id)
                .bind(user.id)
                .execute(&mut *conn)
                .await?;
        log_unmatched_update("users", user.id, result.rows_affected());
        Ok(())
    }

    async fn delete(&self, user: &User) -> PersistenceResult<()> {
        delete_by_id(&self.pool, "users", user.id).await
    }
}

#[async_trait]
impl UserMapper for SqliteUserMapper {
    async fn find_by_name(&self, name: &str) -> PersistenceResult<Vec<User>> {
        let mut conn = acquire(&self.pool).await?;
        let rows = sqlx::query_as::<_, UserRow>(
            "SELECT id, name, email, google_user_id FROM users WHERE name LIKE ? ORDER BY name, id",
        )
        .bind(name)
        .fetch_all(&mut *conn)
        .await?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn find_by_email(&self, email: &str) -> PersistenceResult<Option<User>> {
        let mut conn = acquire(&self.pool).await?;
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, name, email, google_user_id FROM users WHERE email = ? ORDER BY id LIMIT 1",
        )
        .bind(email)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(row.map(User::from))
    }

    async fn find_by_google_user_id(&self, user_id: &str) -> PersistenceResult<Option<User>> {
        let mut conn = acquire(&self.pool).await?;
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, name, email, google_user_id FROM users WHERE google_user_id = ? ORDER BY id LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(row.map(User::from))
    }
}

// ============================================================================
// Customer Mapper
// ============================================================================

/// Mapper cho customers table
#[derive(Debug, Clone)]
pub struct SqliteCustomerMapper {
    pool: SqlitePool,
}

impl SqliteCustomerMapper {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Mapper for SqliteCustomerMapper {
    type Entity = Customer;

    async fn find_all(&self) -> PersistenceResult<Vec<Customer>> {
        let mut conn = acquire(&self.pool).await?;
        let rows = sqlx::query_as::<_, CustomerRow>(
            "SELECT id, firstName, lastName FROM customers ORDER BY id",
        )
        .fetch_all(&mut *conn)
        .await?;
        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn find_by_key(&self, id: Id) -> PersistenceResult<Option<Customer>> {
        let mut conn = acquire(&self.pool).await?;
        let row = sqlx::query_as::<_, CustomerRow>(
            "SELECT id, firstName, lastName FROM customers WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(row.map(Customer::from))
    }

    async fn insert(&self, mut customer: Customer) -> PersistenceResult<Customer> {
        let mut conn = acquire(&self.pool).await?;
        customer.id = next_id(&mut conn, "customers").await?;

        sqlx::query("INSERT INTO customers (id, firstName, lastName) VALUES (?, ?, ?)")
            .bind(customer.id)
            .bind(&customer.first_name)
            .bind(&customer.last_name)
            .execute(&mut *conn)
            .await?;
        Ok(customer)
    }

    async fn update(&self, customer: &Customer) -> PersistenceResult<()> {
        let mut conn = acquire(&self.pool).await?;
        let result = sqlx::query("UPDATE customers SET firstName = ?, lastName = ? WHERE id = ?")
            .bind(&customer.first_name)
            .bind(&customer.last_name)
            .bind(customer.id)
            .execute(&mut *conn)
            .await?;
        log_unmatched_update("customers", customer.id, result.rows_affected());
        Ok(())
    }

    async fn delete(&self, customer: &Customer) -> PersistenceResult<()> {
        delete_by_id(&self.pool, "customers", customer.id).await
    }
}

#[async_trait]
impl CustomerMapper for SqliteCustomerMapper {
    async fn find_by_last_name(&self, last_name: &str) -> PersistenceResult<Vec<Customer>> {
        let mut conn = acquire(&self.pool).await?;
        let rows = sqlx::query_as::<_, CustomerRow>(
            "SELECT id, firstName, lastName FROM customers WHERE lastName LIKE ? ORDER BY lastName, id",
        )
        .bind(last_name)
        .fetch_all(&mut *conn)
        .await?;
        Ok(rows.into_iter().map(Customer::from).collect())
    }
}

// ============================================================================
// Account Mapper
// ============================================================================

/// Mapper cho accounts table
#[derive(Debug, Clone)]
pub struct SqliteAccountMapper {
    pool: SqlitePool,
}

impl SqliteAccountMapper {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Mapper for SqliteAccountMapper {
    type Entity = Account;

    async fn find_all(&self) -> PersistenceResult<Vec<Account>> {
        let mut conn = acquire(&self.pool).await?;
        let rows = sqlx::query_as::<_, AccountRow>("SELECT id, owner FROM accounts ORDER BY id")
            .fetch_all(&mut *conn)
            .await?;
        Ok(rows.into_iter().map(Account::from).collect())
    }

    async fn find_by_key(&self, id: Id) -> PersistenceResult<Option<Account>> {
        let mut conn = acquire(&self.pool).await?;
        let row = sqlx::query_as::<_, AccountRow>("SELECT id, owner FROM accounts WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row.map(Account::from))
    }

    async fn insert(&self, mut account: Account) -> PersistenceResult<Account> {
        let mut conn = acquire(&self.pool).await?;
        account.id = next_id(&mut conn, "accounts").await?;

        sqlx::query("INSERT INTO accounts (id, owner) VALUES (?, ?)")
            .bind(account.id)
            .bind(account.owner)
            .execute(&mut *conn)
            .await?;
        Ok(account)
    }

    async fn update(&self, account: &Account) -> PersistenceResult<()> {
        let mut conn = acquire(&self.pool).await?;
        let result = sqlx::query("UPDATE accounts SET owner = ? WHERE id = ?")
            .bind(account.owner)
            .bind(account.id)
            .execute(&mut *conn)
            .await?;
        log_unmatched_update("accounts", account.id, result.rows_affected());
        Ok(())
    }

    async fn delete(&self, account: &Account) -> PersistenceResult<()> {
        delete_by_id(&self.pool, "accounts", account.id).await
    }
}

#[async_trait]
impl AccountMapper for SqliteAccountMapper {
    async fn find_by_owner_id(&self, owner_id: Id) -> PersistenceResult<Vec<Account>> {
        let mut conn = acquire(&self.pool).await?;
        let rows = sqlx::query_as::<_, AccountRow>(
            "SELECT id, owner FROM accounts WHERE owner = ? ORDER BY id",
        )
        .bind(owner_id)
        .fetch_all(&mut *conn)
        .await?;
        Ok(rows.into_iter().map(Account::from).collect())
    }
}

// ============================================================================
// Transaction Mapper
// ============================================================================

/// Mapper cho transactions table
#[derive(Debug, Clone)]
pub struct SqliteTransactionMapper {
    pool: SqlitePool,
}

impl SqliteTransactionMapper {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn find_where(&self, column: &'static str, account_id: Id) -> PersistenceResult<Vec<Transaction>> {
        let mut conn = acquire(&self.pool).await?;
        let rows = sqlx::query_as::<_, TransactionRow>(&format!(
            "SELECT id, sourceAccount, targetAccount, amount FROM transactions WHERE {} = ? ORDER BY id",
            column
        ))
        .bind(account_id)
        .fetch_all(&mut *conn)
        .await?;
        rows.into_iter().map(Transaction::try_from).collect()
    }
}

#[async_trait]
impl Mapper for SqliteTransactionMapper {
    type Entity = Transaction;

    async fn find_all(&self) -> PersistenceResult<Vec<Transaction>> {
        let mut conn = acquire(&self.pool).await?;
        let rows = sqlx::query_as::<_, TransactionRow>(
            "SELECT id, sourceAccount, targetAccount, amount FROM transactions ORDER BY id",
        )
        .fetch_all(&mut *conn)
        .await?;
        rows.into_iter().map(Transaction::try_from).collect()
    }

    async fn find_by_key(&self, id: Id) -> PersistenceResult<Option<Transaction>> {
        let mut conn = acquire(&self.pool).await?;
        let row = sqlx::query_as::<_, TransactionRow>(
            "SELECT id, sourceAccount, targetAccount, amount FROM transactions WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
        row.map(Transaction::try_from).transpose()
    }

    async fn insert(&self, mut transaction: Transaction) -> PersistenceResult<Transaction> {
        let mut conn = acquire(&self.pool).await?;
        transaction.id = next_id(&mut conn, "transactions").await?;

        sqlx::query(
            "INSERT INTO transactions (id, sourceAccount, targetAccount, amount) VALUES (?, ?, ?, ?)",
        )
        .bind(transaction.id)
        .bind(transaction.source_account)
        .bind(transaction.target_account)
        .bind(transaction.amount.to_string())
        .execute(&mut *conn)
        .await?;
        Ok(transaction)
    }

    async fn update(&self, transaction: &Transaction) -> PersistenceResult<()> {
        let mut conn = acquire(&self.pool).await?;
        let result = sqlx::query(
            "UPDATE transactions SET sourceAccount = ?, targetAccount = ?, amount = ? WHERE id = ?",
        )
        .bind(transaction.source_account)
        .bind(transaction.target_account)
        .bind(transaction.amount.to_string())
        .bind(transaction.id)
        .execute(&mut *conn)
        .await?;
        log_unmatched_update("transactions", transaction.id, result.rows_affected());
        Ok(())
    }

    async fn delete(&self, transaction: &Transaction) -> PersistenceResult<()> {
        delete_by_id(&self.pool, "transactions", transaction.id).await
    }
}

#[async_trait]
impl TransactionMapper for SqliteTransactionMapper {
    async fn find_by_source_account_id(&self, account_id: Id) -> PersistenceResult<Vec<Transaction>> {
        self.find_where("sourceAccount", account_id).await
    }

    async fn find_by_target_account_id(&self, account_id: Id) -> PersistenceResult<Vec<Transaction>> {
        self.find_where("targetAccount", account_id).await
    }
}
