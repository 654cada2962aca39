//! IDO container detection, decompilation and compilation.
//!
//! IDO containers come in three shapes:
//!
//! - **Gamebryo state blocks** - `0x14` at offset 0 and `_gb` at offset 4;
//!   copied verbatim, never compressed
//! - **Shop databases** - starting with `01 00 01 00`; arrays of fixed-size
//!   records, see [`ido_shopdb`]
//! - **Compressed containers** - a 0x5F-byte header followed by a zlib
//!   stream holding a DDS/TGA/BMP/PNG texture or EUC-KR encoded XML
//!
//! Decompiling a compressed container keeps its header so that compiling
//! the artifact again rebuilds the original bytes: textures get a `.meta`
//! hex sidecar, XML gets a trailing `<!-- IDO HEADER: ... -->` comment.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use ido_common::TracingSink;
//! use ido_container::{compile, decompile, TranscodeOptions};
//!
//! let options = TranscodeOptions::default();
//! let sink = TracingSink;
//!
//! let decompiled = decompile(Path::new("item.ido"), Path::new("item.xml"), &options, &sink)?;
//! println!("{}: {}", decompiled.type_label(), decompiled.output().display());
//!
//! let compiled = compile(Path::new("item.xml"), Path::new("item.ido"), &options, &sink)?;
//! println!("{} bytes", compiled.size);
//! # Ok::<(), ido_container::Error>(())
//! ```

mod compile;
mod decompile;
mod error;
mod operation;
mod options;

pub mod compress;
pub mod header;
pub mod sniff;

pub use compile::{compile, is_text_artifact, Compiled, TEXT_EXTENSION};
pub use decompile::{decompile, Decompiled, GAMEBRYO_EXTENSION, TABLE_EXTENSION};
pub use error::{Direction, Error, Result, Warning};
pub use operation::{execute, run, Operation, Report};
pub use options::TranscodeOptions;
pub use sniff::{classify, classify_payload, ContainerKind, PayloadKind, TextureKind};
