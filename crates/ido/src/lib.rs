//! IDO - game asset container codec library.
//!
//! This crate provides a unified interface to the IDO crates.
//!
//! # Crates
//!
//! - [`ido_common`] - Common utilities (binary reading, hex, legacy text, event sinks)
//! - [`ido_shopdb`] - Shop database record parsing and CSV output
//! - [`ido_container`] - Container detection, decompilation and compilation
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use ido::prelude::*;
//!
//! let report = execute(
//!     "decompile",
//!     Path::new("item.ido"),
//!     Path::new("item.xml"),
//!     &TranscodeOptions::default(),
//!     &TracingSink,
//! )?;
//! println!("Wrote {}", report.output().display());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use ido_common as common;
pub use ido_container as container;
pub use ido_shopdb as shopdb;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use ido_common::{EventSink, Level, LegacyText, MemorySink, NullSink, TracingSink};
    pub use ido_container::{
        classify, classify_payload, compile, decompile, execute, run, Compiled, ContainerKind,
        Decompiled, Operation, PayloadKind, Report, TextureKind, TranscodeOptions,
    };
    pub use ido_shopdb::{ShopDatabase, ShopRecord};
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
