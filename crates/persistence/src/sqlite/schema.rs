//! Database schema definitions
//!
//! Row types cho sqlx mapping từ SQLite tables, plus the DDL that creates
//! them. Table and column names are fixed:
//!
//! ```text
//! users        (id, name, email, google_user_id)
//! customers    (id, firstName, lastName)
//! accounts     (id, owner)
//! transactions (id, sourceAccount, targetAccount, amount)
//! ```
//!
//! Foreign keys (`owner`, `sourceAccount`, `targetAccount`) are not declared
//! as constraints.

use crate::error::{PersistenceError, PersistenceResult};
use bankadmin_core::{Account, Customer, Id, Transaction, User};
use rust_decimal::Decimal;
use sqlx::SqlitePool;
use std::str::FromStr;

/// Owner id stored on the seeded cash account row
pub const BANK_OWNER_ID: Id = 0;

/// Row type cho bảng `users`
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub google_user_id: String,
}

/// Row type cho bảng `customers`
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CustomerRow {
    pub id: i64,
    #[sqlx(rename = "firstName")]
    pub first_name: String,
    #[sqlx(rename = "lastName")]
    pub last_name: String,
}

/// Row type cho bảng `accounts`
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AccountRow {
    pub id: i64,
    pub owner: i64,
}

/// Row type cho bảng `transactions`
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TransactionRow {
    pub id: i64,
    #[sqlx(rename = "sourceAccount")]
    pub source_account: i64,
    #[sqlx(rename = "targetAccount")]
    pub target_account: i64,
    pub amount: String, // Decimal stored as TEXT
}

// === Conversion implementations ===

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            user_id: row.google_user_id,
        }
    }
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Self {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
        }
    }
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Self {
            id: row.id,
            owner: row.owner,
        }
    }
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = PersistenceError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        let amount = Decimal::from_str(row.amount.trim())
            .map_err(|_| PersistenceError::invalid_decimal("transactions", "amount", &row.amount))?;

        Ok(Self {
            id: row.id,
            source_account: row.source_account,
            target_account: row.target_account,
            amount,
        })
    }
}

// === DDL ===

/// Tạo 4 bảng nếu chưa có
pub async fn create_schema(pool: &SqlitePool) -> PersistenceResult<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL DEFAULT '',
            email TEXT NOT NULL DEFAULT '',
            google_user_id TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS customers (
            id INTEGER PRIMARY KEY,
            firstName TEXT NOT NULL DEFAULT '',
            lastName TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS accounts (
            id INTEGER PRIMARY KEY,
            owner INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS transactions (
            id INTEGER PRIMARY KEY,
            sourceAccount INTEGER NOT NULL DEFAULT 0,
            targetAccount INTEGER NOT NULL DEFAULT 0,
            amount TEXT NOT NULL DEFAULT '0'
        );
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Seed the bank's cash account row under `id` (no-op if it already exists)
pub async fn seed_cash_account(pool: &SqlitePool, id: Id) -> PersistenceResult<Account> {
    sqlx::query("INSERT OR IGNORE INTO accounts (id, owner) VALUES (?, ?)")
        .bind(id)
        .bind(BANK_OWNER_ID)
        .execute(pool)
        .await?;

    let row = sqlx::query_as::<_, AccountRow>("SELECT id, owner FROM accounts WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(row.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn tx_row(amount: &str) -> TransactionRow {
        TransactionRow {
            id: 5,
            source_account: 1,
            target_account: 2,
            amount: amount.to_string(),
        }
    }

    #[test]
    fn test_transaction_row_conversion() {
        let tx = Transaction::try_from(tx_row("12.50")).unwrap();
        assert_eq!(tx, Transaction::new(1, 2, dec!(12.50)).with_id(5));
    }

    #[test]
    fn test_transaction_row_invalid_amount() {
        let err = Transaction::try_from(tx_row("twelve")).unwrap_err();
        assert!(matches!(err, PersistenceError::InvalidDecimal { .. }));
    }

    #[test]
    fn test_user_row_maps_google_user_id() {
        let row = UserRow {
            id: 1,
            name: "Alice".to_string(),
            email: "alice@bank.test".to_string(),
            google_user_id: "g-1".to_string(),
        };
        let user: User = row.into();
        assert_eq!(user.user_id, "g-1");
    }
}
