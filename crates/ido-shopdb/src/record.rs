//! Shop record layout.

use ido_common::{utf16, BinaryReader};
use serde::Serialize;
use zerocopy::byteorder::little_endian::{I16, I32, U16};
use zerocopy::{FromBytes, FromZeros, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::Result;

/// Size of a single record in bytes (0x1C8).
pub const RECORD_SIZE: usize = 456;

/// Size of the UTF-16LE name buffer in bytes.
pub const NAME_SIZE: usize = 100;

/// On-disk shop record.
///
/// Every field is byte-aligned, so the struct has no padding and maps
/// one-to-one onto the 456 bytes of a record.
#[derive(Debug, Clone, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
#[repr(C)]
pub struct RawShopRecord {
    /// 0x00
    pub category: U16,
    /// 0x02
    pub item_type_id: U16,
    /// 0x04
    pub variant_id: I16,
    /// 0x06
    pub validity: I16,
    /// 0x08..0x0C, uninterpreted.
    pub reserved0: [u8; 4],
    /// 0x0C
    pub type_flag: u8,
    /// 0x0D..0x38, uninterpreted.
    pub reserved1: [u8; 43],
    /// 0x38
    pub set_item_id: I32,
    /// 0x3C..0x64, uninterpreted.
    pub reserved2: [u8; 40],
    /// 0x64, UTF-16LE name.
    pub name: [u8; NAME_SIZE],
    /// 0xC8..0x1C8, uninterpreted.
    pub reserved3: [u8; 256],
}

const _: () = assert!(std::mem::size_of::<RawShopRecord>() == RECORD_SIZE);

/// A decoded shop record, one row of the output table.
///
/// Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShopRecord {
    pub category: u16,
    pub item_type_id: u16,
    pub variant_id: i16,
    pub validity: i16,
    pub type_flag: u8,
    pub set_item_id: i32,
    pub name: String,
}

impl ShopRecord {
    /// Parse a record from the start of `data`.
    ///
    /// Fails with a short read if fewer than [`RECORD_SIZE`] bytes are available.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut reader = BinaryReader::new(data);
        let raw: RawShopRecord = reader.read_struct()?;
        Ok(Self::from_raw(&raw))
    }

    /// Decode the interpreted fields of a raw record.
    ///
    /// The name is trimmed of surrounding whitespace.
    pub fn from_raw(raw: &RawShopRecord) -> Self {
        Self {
            category: raw.category.get(),
            item_type_id: raw.item_type_id.get(),
            variant_id: raw.variant_id.get(),
            validity: raw.validity.get(),
            type_flag: raw.type_flag,
            set_item_id: raw.set_item_id.get(),
            name: utf16::decode_in_buffer(&raw.name).trim().to_owned(),
        }
    }

    /// Build the on-disk form of this record.
    ///
    /// Uninterpreted bytes are zero. Names longer than the 50 code units the
    /// buffer holds are truncated.
    pub fn to_raw(&self) -> RawShopRecord {
        let mut raw = RawShopRecord::new_zeroed();
        raw.category = U16::new(self.category);
        raw.item_type_id = U16::new(self.item_type_id);
        raw.variant_id = I16::new(self.variant_id);
        raw.validity = I16::new(self.validity);
        raw.type_flag = self.type_flag;
        raw.set_item_id = I32::new(self.set_item_id);
        utf16::encode_in_buffer(&self.name, &mut raw.name);
        raw
    }

    /// Serialize this record to its 456-byte layout.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_raw().as_bytes().to_vec()
    }
}
