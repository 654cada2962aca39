//! Artifact to container.

use std::fs;
use std::path::{Path, PathBuf};

use ido_common::EventSink;

use crate::decompile::TABLE_EXTENSION;
use crate::{compress, header, Direction, Error, Result, TranscodeOptions, Warning};

/// Extension of text artifacts.
pub const TEXT_EXTENSION: &str = "xml";

/// What a compile produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compiled {
    /// The container that was written.
    pub output: PathBuf,
    /// Length of the header prepended to the payload.
    pub header_len: usize,
    /// Length of the uncompressed payload.
    pub payload_len: usize,
    /// Total container size in bytes.
    pub size: usize,
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(extension))
}

/// Whether an artifact is compiled as text.
pub fn is_text_artifact(path: &Path) -> bool {
    has_extension(path, TEXT_EXTENSION)
}

/// Compile the artifact at `input` into a container at `output`.
///
/// The header comes from the sidecar next to `input` when it exists. Text
/// artifacts may instead carry it as an embedded marker; binary artifacts
/// must have a sidecar. Nothing is written unless every step succeeds.
pub fn compile(
    input: &Path,
    output: &Path,
    options: &TranscodeOptions,
    sink: &dyn EventSink,
) -> Result<Compiled> {
    sink.info(&format!("Starting compilation: {}", input.display()));

    if has_extension(input, TABLE_EXTENSION) {
        return Err(Error::UnsupportedCompile {
            artifact: input.to_path_buf(),
        });
    }

    let sidecar = header::sidecar_path(input);
    let sidecar_header = header::read_sidecar(&sidecar)?;
    if sidecar_header.is_some() {
        sink.info(&format!("Found .meta file: {}", sidecar.display()));
    }

    let (header_bytes, payload) = if is_text_artifact(input) {
        read_text_artifact(input, sidecar_header, options, sink)?
    } else {
        let header_bytes =
            sidecar_header.ok_or(Error::MissingHeaderForBinary { sidecar })?;
        sink.info(&format!("Reading binary data from {}...", input.display()));
        (header_bytes, fs::read(input)?)
    };

    sink.info(&format!("Header size: {} bytes", header_bytes.len()));
    sink.info(&format!("Compressing {} bytes of data...", payload.len()));
    let compressed = compress::compress(&payload, options.level)?;
    sink.info(&format!("Done ({} bytes)", compressed.len()));

    let mut container = Vec::with_capacity(header_bytes.len() + compressed.len());
    container.extend_from_slice(&header_bytes);
    container.extend_from_slice(&compressed);

    sink.info(&format!("Writing output file {}...", output.display()));
    fs::write(output, &container)?;
    sink.success(&format!(
        "Compiled IDO file ({} bytes) to {}",
        container.len(),
        output.display()
    ));

    Ok(Compiled {
        output: output.to_path_buf(),
        header_len: header_bytes.len(),
        payload_len: payload.len(),
        size: container.len(),
    })
}

/// Resolve the header of a text artifact and encode its content.
///
/// A sidecar wins unconditionally: the embedded marker is then stripped but
/// its hex is never parsed.
fn read_text_artifact(
    input: &Path,
    sidecar_header: Option<Vec<u8>>,
    options: &TranscodeOptions,
    sink: &dyn EventSink,
) -> Result<(Vec<u8>, Vec<u8>)> {
    sink.info(&format!("Reading and encoding XML from {}...", input.display()));
    let text = fs::read_to_string(input)?;

    let marker = header::find_marker(&text);
    let content = marker.map_or(text.as_str(), |m| m.content);

    let header_bytes = match (sidecar_header, marker) {
        (Some(header_bytes), _) => header_bytes,
        (None, Some(marker)) => {
            let header_bytes = marker.header()?;
            sink.info("Extracted embedded header from XML");
            header_bytes
        }
        (None, None) => {
            return Err(Error::MissingHeader {
                artifact: input.to_path_buf(),
            })
        }
    };

    sink.info(&format!("Encoding to {}...", options.text.name()));
    let encoded = options.text.encode(content.trim());
    if encoded.is_lossy() {
        let warning = Warning::EncodingLoss {
            direction: Direction::Encode {
                unmappable: encoded.unmappable,
            },
            encoding: options.text.name(),
        };
        sink.warning(&warning.to_string());
    }

    Ok((header_bytes, encoded.bytes))
}
