//! Header bytes as hexadecimal text.
//!
//! Sidecar files and embedded markers carry the container header as a
//! lowercase hex string with no separators.

use crate::{Error, Result};

const DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Encode bytes as a lowercase hex string.
pub fn encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for &byte in bytes {
        out.push(DIGITS[(byte >> 4) as usize] as char);
        out.push(DIGITS[(byte & 0x0F) as usize] as char);
    }
    out
}

/// Decode a hex string into bytes.
///
/// Surrounding whitespace is ignored; either case is accepted.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    let text = text.trim();
    if text.len() % 2 != 0 {
        return Err(Error::OddHexLength(text.len()));
    }

    let parse_nibble = |position: usize, c: u8| -> Result<u8> {
        match c {
            b'0'..=b'9' => Ok(c - b'0'),
            b'a'..=b'f' => Ok(c - b'a' + 10),
            b'A'..=b'F' => Ok(c - b'A' + 10),
            _ => Err(Error::InvalidHex {
                position,
                found: text[position..].chars().next().unwrap_or(c as char),
            }),
        }
    };

    text.as_bytes()
        .chunks_exact(2)
        .enumerate()
        .map(|(i, pair)| {
            let high = parse_nibble(i * 2, pair[0])?;
            let low = parse_nibble(i * 2 + 1, pair[1])?;
            Ok((high << 4) | low)
        })
        .collect()
}
