//! Bank configuration
//!
//! Loaded from environment variables (and an optional `.env` file):
//!
//! - `BANK_DATABASE_URL`: SQLite URL (default: `sqlite:bank.db?mode=rwc`)
//! - `BANK_CASH_ACCOUNT_ID`: id of the bank's cash account (default: 10000)

use bankadmin_core::Id;
use serde::Deserialize;
use thiserror::Error;

/// Id của tài khoản tiền mặt (cash account) của ngân hàng
pub const DEFAULT_CASH_ACCOUNT_ID: Id = 10000;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:bank.db?mode=rwc";

pub const DATABASE_URL_VAR: &str = "BANK_DATABASE_URL";
pub const CASH_ACCOUNT_ID_VAR: &str = "BANK_CASH_ACCOUNT_ID";

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

impl ConfigError {
    fn invalid(key: &str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BankConfig {
    pub database_url: String,
    /// Counterpart account of every deposit and withdrawal
    pub cash_account_id: Id,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            cash_account_id: DEFAULT_CASH_ACCOUNT_ID,
        }
    }
}

impl BankConfig {
    pub fn new(database_url: &str) -> Self {
        Self {
            database_url: database_url.to_string(),
            ..Self::default()
        }
    }

    pub fn with_cash_account_id(mut self, id: Id) -> Self {
        self.cash_account_id = id;
        self
    }

    /// Load from the process environment after reading `.env` if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup. Unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(DATABASE_URL_VAR) {
            if url.trim().is_empty() {
                return Err(ConfigError::invalid(DATABASE_URL_VAR, "must not be empty"));
            }
            config.database_url = url;
        }

        if let Some(raw) = lookup(CASH_ACCOUNT_ID_VAR) {
            let id: Id = raw
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid(CASH_ACCOUNT_ID_VAR, format!("{}: {}", raw, e)))?;
            if id <= 0 {
                return Err(ConfigError::invalid(
                    CASH_ACCOUNT_ID_VAR,
                    format!("must be a positive id, got {}", id),
                ));
            }
            config.cash_account_id = id;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = BankConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, BankConfig::default());
        assert_eq!(config.cash_account_id, 10000);
    }

    #[test]
    fn test_values_from_lookup() {
        let config = BankConfig::from_lookup(lookup(&[
            (DATABASE_URL_VAR, "sqlite::memory:"),
            (CASH_ACCOUNT_ID_VAR, " 42 "),
        ]))
        .unwrap();

        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.cash_account_id, 42);
    }

    #[test]
    fn test_invalid_cash_account_id() {
        let err = BankConfig::from_lookup(lookup(&[(CASH_ACCOUNT_ID_VAR, "cash")])).unwrap_err();
        assert!(err.to_string().contains(CASH_ACCOUNT_ID_VAR));

        let err = BankConfig::from_lookup(lookup(&[(CASH_ACCOUNT_ID_VAR, "0")])).unwrap_err();
        assert!(err.to_string().contains("positive"));
    }

    #[test]
    fn test_empty_database_url() {
        let err = BankConfig::from_lookup(lookup(&[(DATABASE_URL_VAR, "  ")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::invalid(DATABASE_URL_VAR, "must not be empty")
        );
    }

    #[test]
    fn test_deserialize_partial() {
        let config: BankConfig = serde_json::from_str(r#"{"cash_account_id": 7}"#).unwrap();
        assert_eq!(config.cash_account_id, 7);
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
    }

    #[test]
    fn test_builder() {
        let config = BankConfig::new("sqlite::memory:").with_cash_account_id(500);
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.cash_account_id, 500);
    }
}
