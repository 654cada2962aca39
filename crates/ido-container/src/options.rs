//! Transcoding options.

use flate2::Compression;
use ido_common::LegacyText;

use crate::{Error, Result};

/// Settings shared by decompile and compile.
#[derive(Debug, Clone, Copy)]
pub struct TranscodeOptions {
    /// Zlib level used when compiling.
    pub level: Compression,
    /// Encoding of XML payloads.
    pub text: LegacyText,
}

impl Default for TranscodeOptions {
    fn default() -> Self {
        Self {
            level: Compression::default(),
            text: LegacyText::default(),
        }
    }
}

impl TranscodeOptions {
    /// Set the zlib level (0-9). Values above 9 are clamped.
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = Compression::new(level.min(9));
        self
    }

    /// Set the legacy text encoding by label, e.g. `euc-kr`.
    pub fn with_encoding(mut self, label: &str) -> Result<Self> {
        self.text =
            LegacyText::for_label(label).ok_or_else(|| Error::UnknownEncoding(label.to_string()))?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = TranscodeOptions::default();
        assert_eq!(options.level.level(), 6);
        assert_eq!(options.text.name(), "EUC-KR");
    }

    #[test]
    fn test_builders() {
        let options = TranscodeOptions::default()
            .with_level(12)
            .with_encoding("shift_jis")
            .unwrap();
        assert_eq!(options.level.level(), 9);
        assert_eq!(options.text.name(), "Shift_JIS");

        assert!(matches!(
            TranscodeOptions::default().with_encoding("klingon"),
            Err(Error::UnknownEncoding(_))
        ));
    }
}
