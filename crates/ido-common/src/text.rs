//! Legacy text transcoding.
//!
//! Text payloads inside containers are stored in a legacy double-byte
//! national encoding (EUC-KR by default). `encoding_rs` implements EUC-KR as
//! windows-949, so the Unified Hangul Code extension syllables round-trip too.
//!
//! Both directions are lossy-tolerant: undecodable bytes become U+FFFD and
//! unmappable characters become `?`. The caller is told that a substitution
//! happened.

use encoding_rs::{Encoding, EncoderResult, EUC_KR};

/// Replacement byte used when a character has no legacy mapping.
const UNMAPPABLE_REPLACEMENT: u8 = b'?';

/// Result of decoding legacy bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// The decoded text.
    pub text: String,
    /// Whether any byte sequence was replaced with U+FFFD.
    pub lossy: bool,
}

/// Result of encoding text to legacy bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    /// The encoded bytes.
    pub bytes: Vec<u8>,
    /// Number of characters replaced because they have no legacy mapping.
    pub unmappable: usize,
}

impl Encoded {
    /// Whether any character was replaced.
    pub fn is_lossy(&self) -> bool {
        self.unmappable > 0
    }
}

/// A legacy text codec.
#[derive(Debug, Clone, Copy)]
pub struct LegacyText {
    encoding: &'static Encoding,
}

impl Default for LegacyText {
    fn default() -> Self {
        Self::new(EUC_KR)
    }
}

impl LegacyText {
    /// Create a codec for a specific encoding.
    pub const fn new(encoding: &'static Encoding) -> Self {
        Self { encoding }
    }

    /// Look up a codec by WHATWG label, e.g. `euc-kr` or `shift_jis`.
    pub fn for_label(label: &str) -> Option<Self> {
        Encoding::for_label(label.trim().as_bytes()).map(Self::new)
    }

    /// The canonical name of the wrapped encoding.
    pub fn name(&self) -> &'static str {
        self.encoding.name()
    }

    /// Decode legacy bytes into UTF-8.
    ///
    /// A byte order mark is not treated specially.
    pub fn decode(&self, bytes: &[u8]) -> Decoded {
        let (text, lossy) = self.encoding.decode_without_bom_handling(bytes);
        Decoded {
            text: text.into_owned(),
            lossy,
        }
    }

    /// Encode UTF-8 text into legacy bytes.
    ///
    /// Characters without a mapping are replaced with `?` rather than with
    /// HTML numeric character references.
    pub fn encode(&self, text: &str) -> Encoded {
        let mut encoder = self.encoding.new_encoder();
        let mut bytes = Vec::with_capacity(
            encoder
                .max_buffer_length_from_utf8_without_replacement(text.len())
                .unwrap_or(text.len() * 2),
        );
        let mut unmappable = 0;
        let mut remaining = text;

        loop {
            let (result, read) =
                encoder.encode_from_utf8_to_vec_without_replacement(remaining, &mut bytes, true);
            remaining = &remaining[read..];

            match result {
                EncoderResult::InputEmpty => break,
                EncoderResult::OutputFull => {
                    let needed = encoder
                        .max_buffer_length_from_utf8_without_replacement(remaining.len())
                        .unwrap_or(remaining.len() * 2);
                    bytes.reserve(needed.max(1));
                }
                EncoderResult::Unmappable(_) => {
                    unmappable += 1;
                    bytes.push(UNMAPPABLE_REPLACEMENT);
                }
            }
        }

        Encoded { bytes, unmappable }
    }
}
