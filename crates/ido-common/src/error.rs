//! Error types for ido-common.

use thiserror::Error;

/// Common error type for IDO operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Fewer bytes were available than a fixed-size read required.
    #[error("short read: expected {expected} bytes but only {actual} available")]
    ShortRead { expected: usize, actual: usize },

    /// A character outside `[0-9a-fA-F]` in a hex string.
    #[error("invalid hex character {found:?} at position {position}")]
    InvalidHex { position: usize, found: char },

    /// Hex strings encode whole bytes, so their length must be even.
    #[error("hex string has odd length {0}")]
    OddHexLength(usize),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
