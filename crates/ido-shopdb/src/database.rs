//! Shop database table.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::record::{ShopRecord, RECORD_SIZE};
use crate::{Error, Result};

/// Magic bytes at the start of a shop database.
///
/// These are the `category` and `item_type_id` fields of the first record.
pub const SHOP_DB_MAGIC: [u8; 4] = [0x01, 0x00, 0x01, 0x00];

/// CSV column order.
pub const COLUMNS: [&str; 7] = [
    "category",
    "item_type_id",
    "variant_id",
    "validity",
    "type_flag",
    "set_item_id",
    "name",
];

/// A parsed shop database.
///
/// Records are kept in file offset order.
#[derive(Debug, Clone, Default)]
pub struct ShopDatabase {
    records: Vec<ShopRecord>,
    trailing_bytes: usize,
}

impl ShopDatabase {
    /// Create a database from records.
    pub fn new(records: Vec<ShopRecord>) -> Self {
        Self {
            records,
            trailing_bytes: 0,
        }
    }

    /// Check if data is a shop database by checking the magic bytes.
    pub fn is_shop_database(data: &[u8]) -> bool {
        data.starts_with(&SHOP_DB_MAGIC)
    }

    /// Read a shop database from disk.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read(path)?;
        Self::parse(&data)
    }

    /// Parse a shop database from bytes.
    ///
    /// `floor(len / 456)` records are read. Leftover bytes that do not form
    /// a whole record are not an error; their count is available through
    /// [`trailing_bytes`](Self::trailing_bytes).
    pub fn parse(data: &[u8]) -> Result<Self> {
        if !Self::is_shop_database(data) {
            return Err(Error::NotShopDatabase {
                actual: data[..SHOP_DB_MAGIC.len().min(data.len())].to_vec(),
            });
        }

        let chunks = data.chunks_exact(RECORD_SIZE);
        let trailing_bytes = chunks.remainder().len();

        let records = chunks
            .map(ShopRecord::parse)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            records,
            trailing_bytes,
        })
    }

    /// The parsed records.
    pub fn records(&self) -> &[ShopRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the database holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Bytes at the end of the input that did not form a whole record.
    pub fn trailing_bytes(&self) -> usize {
        self.trailing_bytes
    }

    /// Whether the input size was not a multiple of the record size.
    pub fn is_truncated(&self) -> bool {
        self.trailing_bytes != 0
    }

    /// Write the table as CSV: a header row followed by one row per record.
    ///
    /// Rows end with CRLF and fields are quoted only when necessary.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::CRLF)
            .from_writer(writer);

        csv.write_record(COLUMNS)?;
        for record in &self.records {
            csv.serialize(record)?;
        }
        csv.flush()?;

        Ok(())
    }

    /// Serialize all records back to their binary layout.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut output = Vec::with_capacity(self.records.len() * RECORD_SIZE);
        for record in &self.records {
            output.extend_from_slice(&record.to_bytes());
        }
        output
    }
}
