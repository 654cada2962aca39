//! Container to artifact.

use std::fs;
use std::path::{Path, PathBuf};

use ido_common::EventSink;
use ido_shopdb::{ShopDatabase, RECORD_SIZE};

use crate::sniff::{classify, classify_payload, ContainerKind, PayloadKind, TextureKind};
use crate::{compress, header, Direction, Result, TranscodeOptions, Warning};

/// Extension given to verbatim Gamebryo copies.
pub const GAMEBRYO_EXTENSION: &str = "gb";

/// Extension given to shop database tables.
pub const TABLE_EXTENSION: &str = "csv";

/// What a decompile produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decompiled {
    /// The container was copied unchanged.
    Gamebryo { output: PathBuf },
    /// Records were dumped to a CSV table.
    ShopDatabase {
        output: PathBuf,
        items: usize,
        trailing_bytes: usize,
    },
    /// Raw texture bytes plus a header sidecar.
    Texture {
        kind: TextureKind,
        output: PathBuf,
        meta: PathBuf,
    },
    /// Decoded XML with the header embedded as a trailing comment.
    Xml { output: PathBuf, lossy: bool },
}

impl Decompiled {
    /// The primary output file.
    pub fn output(&self) -> &Path {
        match self {
            Decompiled::Gamebryo { output }
            | Decompiled::ShopDatabase { output, .. }
            | Decompiled::Texture { output, .. }
            | Decompiled::Xml { output, .. } => output,
        }
    }

    /// The sidecar file, for texture outputs.
    pub fn meta(&self) -> Option<&Path> {
        match self {
            Decompiled::Texture { meta, .. } => Some(meta),
            _ => None,
        }
    }

    /// Human-readable type of the artifact.
    pub fn type_label(&self) -> &'static str {
        match self {
            Decompiled::Gamebryo { .. } => "gamebryo",
            Decompiled::ShopDatabase { .. } => "Shop Database",
            Decompiled::Texture { kind, .. } => kind.label(),
            Decompiled::Xml { .. } => "XML",
        }
    }
}

/// Decompile the container at `input` into an artifact near `output`.
///
/// The actual output path depends on the detected type; see [`Decompiled`].
pub fn decompile(
    input: &Path,
    output: &Path,
    options: &TranscodeOptions,
    sink: &dyn EventSink,
) -> Result<Decompiled> {
    sink.info(&format!("Starting decompilation: {}", input.display()));

    let data = fs::read(input)?;
    let (header_bytes, payload) = header::split(&data);

    match classify(header_bytes) {
        ContainerKind::GamebryoBlock => {
            sink.info("Detected type: Gamebryo state block (binary)");
            decompile_gamebryo(&data, output, sink)
        }
        ContainerKind::ShopDatabase => {
            sink.info("Detected type: shop database (binary records)");
            decompile_shop_database(&data, output, sink)
        }
        ContainerKind::Compressed => {
            sink.info(&format!("Decompressing {} bytes...", payload.len()));
            let decompressed = compress::decompress(payload)?;
            sink.info(&format!("Decompressed to {} bytes", decompressed.len()));

            match classify_payload(&decompressed) {
                PayloadKind::Texture(kind) => {
                    decompile_texture(kind, header_bytes, &decompressed, output, sink)
                }
                PayloadKind::Xml => {
                    decompile_xml(header_bytes, &decompressed, output, options, sink)
                }
            }
        }
    }
}

fn decompile_gamebryo(data: &[u8], output: &Path, sink: &dyn EventSink) -> Result<Decompiled> {
    let output = output.with_extension(GAMEBRYO_EXTENSION);
    fs::write(&output, data)?;
    sink.success(&format!("Saved raw binary to {}", output.display()));

    Ok(Decompiled::Gamebryo { output })
}

fn decompile_shop_database(
    data: &[u8],
    output: &Path,
    sink: &dyn EventSink,
) -> Result<Decompiled> {
    let database = ShopDatabase::parse(data)?;

    if database.is_truncated() {
        let warning = Warning::RecordSizeMismatch {
            file_size: data.len(),
            stride: RECORD_SIZE,
            trailing: database.trailing_bytes(),
        };
        sink.warning(&warning.to_string());
    }
    sink.info(&format!("Found {} items", database.len()));

    let output = output.with_extension(TABLE_EXTENSION);
    let mut table = Vec::new();
    database.write_csv(&mut table)?;
    fs::write(&output, table)?;
    sink.success(&format!("Dumped shop database to {}", output.display()));

    Ok(Decompiled::ShopDatabase {
        output,
        items: database.len(),
        trailing_bytes: database.trailing_bytes(),
    })
}

fn decompile_texture(
    kind: TextureKind,
    header_bytes: &[u8],
    texture: &[u8],
    output: &Path,
    sink: &dyn EventSink,
) -> Result<Decompiled> {
    sink.info(&format!("Detected type: {}", kind));

    let output = if output.extension().is_some() {
        output.to_path_buf()
    } else {
        output.with_extension(kind.extension())
    };
    let meta = header::sidecar_path(&output);

    fs::write(&output, texture)?;
    header::write_sidecar(&meta, header_bytes)?;

    sink.success(&format!("Saved as {}", output.display()));
    sink.info(&format!("Saved header to {}", meta.display()));

    Ok(Decompiled::Texture { kind, output, meta })
}

fn decompile_xml(
    header_bytes: &[u8],
    payload: &[u8],
    output: &Path,
    options: &TranscodeOptions,
    sink: &dyn EventSink,
) -> Result<Decompiled> {
    sink.info(&format!("Decoding as {} encoded XML...", options.text.name()));

    let decoded = options.text.decode(payload);
    if decoded.lossy {
        let warning = Warning::EncodingLoss {
            direction: Direction::Decode,
            encoding: options.text.name(),
        };
        sink.warning(&warning.to_string());
    }

    let text = header::append_marker(&decoded.text, header_bytes);
    fs::write(output, text)?;
    sink.success(&format!("Saved XML to {}", output.display()));

    Ok(Decompiled::Xml {
        output: output.to_path_buf(),
        lossy: decoded.lossy,
    })
}
