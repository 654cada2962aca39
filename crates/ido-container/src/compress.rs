//! Zlib framing for container payloads.

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::{Compression, Decompress, FlushDecompress, Status};

use crate::{Error, Result};

/// Decompress a zlib stream.
///
/// Unlike the `read` adapters, a stream that ends before its final block
/// is reported as an error rather than returned partially. Bytes after the
/// end of the stream are ignored.
///
/// The output buffer grows between calls, so each call must leave the
/// stream resumable: `Finish` is only valid when the whole output fits.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = Decompress::new(true);
    let mut output = Vec::with_capacity(data.len().saturating_mul(4).max(64));

    loop {
        if output.len() == output.capacity() {
            output.reserve(output.capacity().max(64));
        }

        let (before_in, before_out) = (decoder.total_in(), decoder.total_out());
        let status = decoder
            .decompress_vec(&data[before_in as usize..], &mut output, FlushDecompress::None)
            .map_err(|e| Error::Decompression(e.to_string()))?;

        if status == Status::StreamEnd {
            return Ok(output);
        }

        let progressed = decoder.total_in() != before_in || decoder.total_out() != before_out;
        if !progressed && output.len() < output.capacity() {
            return Err(Error::Decompression(format!(
                "unexpected end of stream after {} bytes",
                decoder.total_in()
            )));
        }
    }
}

/// Compress bytes into a zlib stream.
pub fn compress(data: &[u8], level: Compression) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::with_capacity(data.len() / 2 + 64), level);
    encoder
        .write_all(data)
        .map_err(|e| Error::Compression(e.to_string()))?;
    encoder
        .finish()
        .map_err(|e| Error::Compression(e.to_string()))
}
