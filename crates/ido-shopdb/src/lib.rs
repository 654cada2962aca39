//! Shop database parser for IDO containers.
//!
//! The shop database is one of the uncompressed container variants. It is a
//! flat array of fixed-size 456-byte records with no file header; the first
//! record always starts with `01 00 01 00`, which doubles as the format magic.
//!
//! # Record Layout
//!
//! | Offset | Size | Field          |
//! |--------|------|----------------|
//! | 0x00   | 2    | `category`     |
//! | 0x02   | 2    | `item_type_id` |
//! | 0x04   | 2    | `variant_id`   |
//! | 0x06   | 2    | `validity`     |
//! | 0x0C   | 1    | `type_flag`    |
//! | 0x38   | 4    | `set_item_id`  |
//! | 0x64   | 100  | `name` (UTF-16LE, null-terminated) |
//!
//! All integers are little-endian. Unlisted bytes are preserved but not
//! interpreted.
//!
//! # Example
//!
//! ```no_run
//! use ido_shopdb::ShopDatabase;
//!
//! let database = ShopDatabase::from_path("shop.ido")?;
//! for record in database.records() {
//!     println!("{}: {}", record.item_type_id, record.name);
//! }
//!
//! let mut csv = Vec::new();
//! database.write_csv(&mut csv)?;
//! # Ok::<(), ido_shopdb::Error>(())
//! ```

mod database;
mod error;
mod record;

pub use database::{ShopDatabase, COLUMNS, SHOP_DB_MAGIC};
pub use error::{Error, Result};
pub use record::{RawShopRecord, ShopRecord, NAME_SIZE, RECORD_SIZE};
