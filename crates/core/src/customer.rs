//! # Customer Module

use crate::{Id, PROVISIONAL_ID};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Khách hàng của ngân hàng. Sở hữu 0..N accounts thông qua `Account::owner`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: Id,
    pub first_name: String,
    pub last_name: String,
}

impl Customer {
    pub fn new(first_name: &str, last_name: &str) -> Self {
        Self {
            id: PROVISIONAL_ID,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        }
    }

    pub fn with_id(mut self, id: Id) -> Self {
        self.id = id;
        self
    }

    /// "First Last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Customer ({}): {}", self.id, self.full_name())
    }
}
