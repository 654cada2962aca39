//! Common utilities for IDO tooling.
//!
//! This crate provides the foundational pieces shared by the format crates:
//!
//! - [`BinaryReader`] - Exact-length little-endian reads from byte slices
//! - [`utf16`] - Fixed-size UTF-16LE string buffers
//! - [`hex`] - Header bytes as hexadecimal text
//! - [`LegacyText`] - Transcoding between the legacy double-byte encoding and UTF-8
//! - [`EventSink`] - The injected capability used to report progress and diagnostics

mod error;
mod reader;
mod sink;
mod text;

pub mod hex;
pub mod utf16;

pub use error::{Error, Result};
pub use reader::BinaryReader;
pub use sink::{EventSink, Level, MemorySink, NullSink, TracingSink};
pub use text::{Decoded, Encoded, LegacyText};
