//! # Bankadmin Core
//!
//! Business objects của hệ thống ngân hàng: User, Customer, Account, Transaction.
//!
//! ## Relationships
//!
//! ```text
//! Customer 1 ──── N Account 1 ──── N Transaction (source)
//!                           1 ──── N Transaction (target)
//! User (standalone, identified by an external user id)
//! ```
//!
//! Objects are plain data holders. They carry a surrogate `id` that the
//! persistence layer assigns on insert; before that they hold
//! [`PROVISIONAL_ID`].

pub mod account;
pub mod customer;
pub mod transaction;
pub mod user;

pub use account::Account;
pub use customer::Customer;
pub use transaction::Transaction;
pub use user::User;

/// Surrogate key shared by every business object.
pub type Id = i64;

/// Placeholder id of an object that has not been inserted yet.
pub const PROVISIONAL_ID: Id = 1;
