//! Format detection.
//!
//! Classification is two-staged. The raw container prefix decides between the
//! uncompressed variants and a compressed container; the decompressed payload
//! of a compressed container is then matched against texture signatures,
//! falling back to XML text.
//!
//! Both stages are ordered rule tables evaluated by [`first_match`]: the first
//! rule whose checks all pass wins.

use std::fmt;

/// A single byte-range check.
#[derive(Debug, Clone, Copy)]
pub enum Check {
    /// `data[offset..offset + magic.len()] == magic`.
    At(usize, &'static [u8]),
    /// `data` ends with the given bytes.
    EndsWith(&'static [u8]),
}

impl Check {
    fn matches(&self, data: &[u8]) -> bool {
        match *self {
            Check::At(offset, magic) => data
                .get(offset..offset + magic.len())
                .is_some_and(|bytes| bytes == magic),
            Check::EndsWith(suffix) => data.ends_with(suffix),
        }
    }
}

/// A classification rule: every check must pass on data of at least `min_len` bytes.
#[derive(Debug, Clone, Copy)]
pub struct Rule<T> {
    pub min_len: usize,
    pub checks: &'static [Check],
    pub kind: T,
}

impl<T> Rule<T> {
    /// Whether this rule accepts `data`.
    pub fn matches(&self, data: &[u8]) -> bool {
        data.len() >= self.min_len && self.checks.iter().all(|check| check.matches(data))
    }
}

/// Evaluate rules in order and return the kind of the first match.
pub fn first_match<T: Copy>(rules: &[Rule<T>], data: &[u8], default: T) -> T {
    rules
        .iter()
        .find(|rule| rule.matches(data))
        .map_or(default, |rule| rule.kind)
}

/// Classification of a raw container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    /// Uncompressed Gamebryo state block, copied verbatim.
    GamebryoBlock,
    /// Uncompressed shop database records.
    ShopDatabase,
    /// Header followed by a zlib payload.
    Compressed,
}

/// Texture formats recognised inside compressed payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKind {
    Dds,
    Tga,
    Bmp,
    Png,
}

impl TextureKind {
    /// Default file extension for this texture format.
    pub const fn extension(self) -> &'static str {
        match self {
            TextureKind::Dds => "dds",
            TextureKind::Tga => "tga",
            TextureKind::Bmp => "bmp",
            TextureKind::Png => "png",
        }
    }

    /// Human-readable type name.
    pub const fn label(self) -> &'static str {
        match self {
            TextureKind::Dds => "DDS Texture",
            TextureKind::Tga => "TGA Texture",
            TextureKind::Bmp => "BMP Texture",
            TextureKind::Png => "PNG Texture",
        }
    }
}

impl fmt::Display for TextureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classification of a decompressed payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    /// Raw texture bytes, never text-transcoded.
    Texture(TextureKind),
    /// Legacy-encoded XML text. The default for anything unrecognised.
    Xml,
}

/// Gamebryo state blocks start with `0x14` and carry `_gb` at offset 4.
pub const GAMEBRYO_RULE: Rule<ContainerKind> = Rule {
    min_len: 8,
    checks: &[Check::At(0, &[0x14]), Check::At(4, b"_gb")],
    kind: ContainerKind::GamebryoBlock,
};

/// Container rules in priority order.
pub const CONTAINER_RULES: &[Rule<ContainerKind>] = &[
    GAMEBRYO_RULE,
    Rule {
        min_len: 0,
        checks: &[Check::At(0, &ido_shopdb::SHOP_DB_MAGIC)],
        kind: ContainerKind::ShopDatabase,
    },
];

/// Payload rules in priority order.
pub const PAYLOAD_RULES: &[Rule<PayloadKind>] = &[
    Rule {
        min_len: 0,
        checks: &[Check::At(0, b"DDS ")],
        kind: PayloadKind::Texture(TextureKind::Dds),
    },
    Rule {
        min_len: 0,
        checks: &[Check::EndsWith(b"TRUEVISION-XFILE.\0")],
        kind: PayloadKind::Texture(TextureKind::Tga),
    },
    Rule {
        min_len: 0,
        checks: &[Check::At(0, b"BM")],
        kind: PayloadKind::Texture(TextureKind::Bmp),
    },
    Rule {
        min_len: 0,
        checks: &[Check::At(0, b"\x89PNG")],
        kind: PayloadKind::Texture(TextureKind::Png),
    },
];

/// Classify a raw container by its leading bytes.
///
/// Only the first eight bytes are inspected; passing the whole file or just
/// the header gives the same answer.
pub fn classify(prefix: &[u8]) -> ContainerKind {
    first_match(CONTAINER_RULES, prefix, ContainerKind::Compressed)
}

/// Classify a decompressed payload.
pub fn classify_payload(payload: &[u8]) -> PayloadKind {
    first_match(PAYLOAD_RULES, payload, PayloadKind::Xml)
}
