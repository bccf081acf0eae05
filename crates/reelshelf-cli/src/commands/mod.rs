pub mod config;
pub mod entries;
pub mod list;
pub mod status;
pub mod transfer;

pub use entries::{add_entry, delete_entry, edit_entry, rate_entry, show_entry, EntryFields};
pub use list::list_entries;
pub use status::show_status;
pub use transfer::{export_entries, import_entries};

use anyhow::{Context, Result};
use reelshelf_core::store::SqliteSlot;
use reelshelf_core::{Collection, LoadStatus};
use std::path::Path;

/// Open the catalog at `db_path`, warning (but carrying on) if the stored
/// payload could not be read.
pub fn open_collection(db_path: &Path) -> Result<Collection<SqliteSlot>> {
    let slot = SqliteSlot::open(db_path)
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;
    let (collection, status) = Collection::load(slot).context("Failed to load catalog")?;

    if let LoadStatus::Corrupt { reason } = status {
        eprintln!("⚠ The stored catalog could not be read ({reason}).");
        eprintln!("  Starting with an empty catalog; the next change will overwrite it.");
    }

    Ok(collection)
}
