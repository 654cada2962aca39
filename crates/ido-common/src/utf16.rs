//! Fixed-size UTF-16LE string buffers.
//!
//! Binary records store strings as a fixed number of bytes holding UTF-16LE
//! code units, terminated by the first zero unit or by the end of the buffer.

use byteorder::{ByteOrder, LittleEndian};

/// Decode a null-terminated UTF-16LE string from a fixed-size buffer.
///
/// Decoding stops at the first zero code unit or at the end of the buffer.
/// A trailing odd byte is ignored and unpaired surrogates become U+FFFD.
pub fn decode_in_buffer(bytes: &[u8]) -> String {
    let units = bytes
        .chunks_exact(2)
        .map(LittleEndian::read_u16)
        .take_while(|&unit| unit != 0);

    char::decode_utf16(units)
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

/// Encode a string into a fixed-size UTF-16LE buffer.
///
/// The buffer is zero-filled first, so any unused tail acts as the
/// terminator. Characters that do not fit entirely are dropped; a surrogate
/// pair is never split. Returns the number of code units written.
pub fn encode_in_buffer(value: &str, buffer: &mut [u8]) -> usize {
    buffer.fill(0);

    let capacity = buffer.len() / 2;
    let mut written = 0;
    let mut units = [0u16; 2];

    for c in value.chars() {
        let encoded = c.encode_utf16(&mut units);
        if written + encoded.len() > capacity {
            break;
        }
        for &unit in encoded.iter() {
            LittleEndian::write_u16(&mut buffer[written * 2..written * 2 + 2], unit);
            written += 1;
        }
    }

    written
}
