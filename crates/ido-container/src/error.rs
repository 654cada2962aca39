//! Error and warning types for container transcoding.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors. Each one ends the current operation.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Common library error (short reads, malformed hex).
    #[error("{0}")]
    Common(#[from] ido_common::Error),

    /// Shop database error.
    #[error("{0}")]
    ShopDb(#[from] ido_shopdb::Error),

    /// The payload is not a valid zlib stream.
    #[error("zlib decompression failed: {0}")]
    Decompression(String),

    /// Compression error.
    #[error("compression failed: {0}")]
    Compression(String),

    /// A text artifact has neither a sidecar nor an embedded header marker.
    #[error("header not found in .meta file or embedded in {}", artifact.display())]
    MissingHeader { artifact: PathBuf },

    /// A binary artifact has no sidecar.
    #[error("compiling a binary file requires a .meta file at {}", sidecar.display())]
    MissingHeaderForBinary { sidecar: PathBuf },

    /// The artifact type can only be produced, not compiled back.
    #[error("{} is a shop database table; compiling tables back to records is not supported", artifact.display())]
    UnsupportedCompile { artifact: PathBuf },

    /// Neither `compile` nor `decompile` was requested.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// The requested legacy text encoding label is not known.
    #[error("unknown text encoding: {0}")]
    UnknownEncoding(String),
}

/// Result type for container operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Transcoding direction of an encoding loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Legacy bytes to UTF-8; undecodable sequences became U+FFFD.
    Decode,
    /// UTF-8 to legacy bytes; `unmappable` characters became `?`.
    Encode { unmappable: usize },
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Decode => f.write_str("some characters could not be decoded"),
            Direction::Encode { unmappable } => {
                write!(f, "{} characters could not be mapped", unmappable)
            }
        }
    }
}

/// Non-fatal conditions. They are reported at warning level and execution
/// continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Warning {
    /// Text was transcoded with replacement characters.
    #[error("{direction} ({encoding}); replacement characters were substituted")]
    EncodingLoss {
        direction: Direction,
        encoding: &'static str,
    },

    /// A shop database size is not a multiple of the record stride.
    #[error("file size {file_size} is not a multiple of the record size ({stride}); ignoring {trailing} trailing bytes")]
    RecordSizeMismatch {
        file_size: usize,
        stride: usize,
        trailing: usize,
    },
}
