//! # Bankadmin Business
//!
//! Application logic layer. [`BankAdministration`] is the single entry point:
//! every operation is a transaction script that composes mapper calls and
//! enforces the cross-entity rules (cascading deletes, derived balances,
//! cash-account counterparts for deposits and withdrawals).

pub mod account;
pub mod administration;
pub mod config;
pub mod customer;
pub mod transaction;
pub mod user;

pub use administration::{BankAdministration, BankResult};
pub use config::{BankConfig, ConfigError, DEFAULT_CASH_ACCOUNT_ID};
