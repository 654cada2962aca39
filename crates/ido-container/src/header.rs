//! Container headers and the metadata that preserves them.
//!
//! A compressed container is `header ‖ zlib payload`, where the header is the
//! first 0x5F bytes (or the whole file if it is shorter). Decompiling keeps
//! the header so the container can be rebuilt: as a hex sidecar next to
//! binary artifacts, or as a trailing comment in XML text.

use std::fs;
use std::path::{Path, PathBuf};

use ido_common::hex;
use memchr::memmem;

use crate::Result;

/// Length of the container header in bytes.
pub const HEADER_LEN: usize = 0x5F;

/// Extension of the sidecar metadata file.
pub const SIDECAR_EXTENSION: &str = "meta";

const MARKER_PREFIX: &str = "<!-- IDO HEADER: ";
const MARKER_SUFFIX: &str = " -->";

/// Split a container into header and payload.
///
/// Files shorter than [`HEADER_LEN`] are all header with an empty payload.
pub fn split(data: &[u8]) -> (&[u8], &[u8]) {
    data.split_at(HEADER_LEN.min(data.len()))
}

/// Path of the sidecar for an artifact: same base name, `.meta` extension.
pub fn sidecar_path(artifact: &Path) -> PathBuf {
    artifact.with_extension(SIDECAR_EXTENSION)
}

/// Read a sidecar, if one exists.
///
/// Returns `Ok(None)` when there is no file at `path` or the file holds no
/// hex digits; an empty sidecar counts as absent. An existing sidecar with
/// malformed hex is an error.
pub fn read_sidecar(path: &Path) -> Result<Option<Vec<u8>>> {
    if !path.is_file() {
        return Ok(None);
    }
    let text = fs::read_to_string(path)?;
    let header = hex::decode(&text)?;
    Ok(Some(header).filter(|header| !header.is_empty()))
}

/// Write a header as hex to a sidecar file.
pub fn write_sidecar(path: &Path, header: &[u8]) -> Result<()> {
    fs::write(path, hex::encode(header))?;
    Ok(())
}

/// Append the header marker comment to decoded text.
pub fn append_marker(text: &str, header: &[u8]) -> String {
    format!("{}\n{}{}{}", text, MARKER_PREFIX, hex::encode(header), MARKER_SUFFIX)
}

/// A header marker found in a text artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbeddedMarker<'a> {
    /// Everything before the marker.
    pub content: &'a str,
    /// The hex string inside the marker, not yet validated.
    pub hex: &'a str,
}

impl EmbeddedMarker<'_> {
    /// Decode the marker's hex into header bytes.
    pub fn header(&self) -> Result<Vec<u8>> {
        Ok(hex::decode(self.hex)?)
    }
}

/// Locate the last header marker in `text`.
///
/// The search starts from the final occurrence of the marker prefix, so
/// content that merely contains a similar comment earlier is left alone.
/// A prefix without a closing ` -->` is not a marker.
pub fn find_marker(text: &str) -> Option<EmbeddedMarker<'_>> {
    let start = memmem::rfind(text.as_bytes(), MARKER_PREFIX.as_bytes())?;
    let after = &text[start + MARKER_PREFIX.len()..];
    let end = memmem::find(after.as_bytes(), MARKER_SUFFIX.as_bytes())?;

    Some(EmbeddedMarker {
        content: &text[..start],
        hex: &after[..end],
    })
}
