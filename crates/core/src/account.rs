//! # Account Module
//!
//! Định nghĩa Account - tài khoản thuộc về một Customer.
//! Số dư (balance) không được lưu trữ; nó được tính từ các Transactions.

use crate::customer::Customer;
use crate::{Id, PROVISIONAL_ID};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bank account.
///
/// `owner` references `Customer::id`. The reference is never checked against
/// existing customers; the bank's own cash account uses an owner that need
/// not exist either.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: Id,
    pub owner: Id,
}

impl Account {
    /// Tạo Account mới cho owner id
    pub fn new(owner: Id) -> Self {
        Self {
            id: PROVISIONAL_ID,
            owner,
        }
    }

    /// Tạo Account từ Customer
    pub fn for_customer(customer: &Customer) -> Self {
        Self::new(customer.id)
    }

    pub fn with_id(mut self, id: Id) -> Self {
        self.id = id;
        self
    }

    pub fn is_owned_by(&self, customer: &Customer) -> bool {
        self.owner == customer.id
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Account ({}): owner {}", self.id, self.owner)
    }
}
