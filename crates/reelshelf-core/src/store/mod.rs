//! Durable key-value slots that hold the serialized collection.

pub mod memory;
pub mod migrations;
pub mod sqlite;

pub use memory::MemorySlot;
pub use sqlite::SqliteSlot;

use crate::error::Result;

/// A durable key-value store where each key holds one text payload.
///
/// Values are replaced whole; there is no partial update.
pub trait Slot {
    /// Read the payload stored under `key`, if any.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the payload stored under `key`.
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
}
