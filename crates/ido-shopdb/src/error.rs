//! Error types for shop database parsing.

use thiserror::Error;

/// Errors that can occur when working with shop databases.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Common library error.
    #[error("{0}")]
    Common(#[from] ido_common::Error),

    /// CSV output error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The data does not start with the shop database magic.
    #[error("not a shop database: expected magic 01 00 01 00, got {actual:02x?}")]
    NotShopDatabase { actual: Vec<u8> },
}

/// Result type for shop database operations.
pub type Result<T> = std::result::Result<T, Error>;
