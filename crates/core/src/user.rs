//! # User Module
//!
//! Người dùng của ứng dụng, được xác thực bởi một identity provider bên ngoài.

use crate::{Id, PROVISIONAL_ID};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Application user.
///
/// `user_id` is issued by the external identity provider (Google). The core
/// does not enforce uniqueness of `email` or `user_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Id,
    pub name: String,
    pub email: String,
    /// Stored in the `google_user_id` column
    pub user_id: String,
}

impl User {
    /// Tạo User mới với provisional id
    pub fn new(name: &str, email: &str, user_id: &str) -> Self {
        Self {
            id: PROVISIONAL_ID,
            name: name.to_string(),
            email: email.to_string(),
            user_id: user_id.to_string(),
        }
    }

    pub fn with_id(mut self, id: Id) -> Self {
        self.id = id;
        self
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "User ({}): {} <{}> [{}]",
            self.id, self.name, self.email, self.user_id
        )
    }
}
