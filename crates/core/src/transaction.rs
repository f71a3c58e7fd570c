//! # Transaction Module
//!
//! Một Transaction chuyển `amount` từ source account sang target
//! account. Hệ thống chỉ dùng một loại tiền tệ ngầm định.

use crate::{Id, PROVISIONAL_ID};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Money transfer between two accounts.
///
/// Nothing is validated here: `amount` may be zero or negative and
/// `source_account` may equal `target_account`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Id,
    pub source_account: Id,
    pub target_account: Id,
    pub amount: Decimal,
}

impl Transaction {
    pub fn new(source_account: Id, target_account: Id, amount: Decimal) -> Self {
        Self {
            id: PROVISIONAL_ID,
            source_account,
            target_account,
            amount,
        }
    }

    pub fn with_id(mut self, id: Id) -> Self {
        self.id = id;
        self
    }

    /// Debit of `account_id`: money leaves the account
    pub fn is_debit_of(&self, account_id: Id) -> bool {
        self.source_account == account_id
    }

    /// Credit of `account_id`: money arrives on the account
    pub fn is_credit_of(&self, account_id: Id) -> bool {
        self.target_account == account_id
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Transaction ({}): from {} to {}, amount {}",
            self.id, self.source_account, self.target_account, self.amount
        )
    }
}
