//! # Persistence Errors
//!
//! Error types cho persistence layer, wrapping sqlx errors.
//!
//! A missing row is not an error here: key lookups return `Option` and
//! finders return a possibly empty `Vec`.

use thiserror::Error;

/// Persistence layer errors
#[derive(Debug, Error)]
pub enum PersistenceError {
    // === Database errors ===
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    // === Conversion errors ===
    #[error("Invalid decimal value in {table}.{column}: {value}")]
    InvalidDecimal {
        table: String,
        column: String,
        value: String,
    },

    // === Key assignment errors ===
    #[error("No surrogate key left in {table}")]
    KeySpaceExhausted { table: String },

    // === Other errors ===
    #[error("{0}")]
    Other(String),
}

/// Result type alias cho PersistenceError
pub type PersistenceResult<T> = Result<T, PersistenceError>;

impl PersistenceError {
    /// Tạo InvalidDecimal error
    pub fn invalid_decimal(table: &str, column: &str, value: &str) -> Self {
        Self::InvalidDecimal {
            table: table.to_string(),
            column: column.to_string(),
            value: value.to_string(),
        }
    }

    pub fn key_space_exhausted(table: &str) -> Self {
        Self::KeySpaceExhausted {
            table: table.to_string(),
        }
    }

    /// Kiểm tra có phải lỗi database không
    pub fn is_database_error(&self) -> bool {
        matches!(self, Self::Database(_))
    }
}
