use anyhow::Result;
use reelshelf_core::{MediaKind, COLLECTION_KEY};
use std::path::Path;

use super::open_collection;

pub fn show_status(db_path: &Path) -> Result<()> {
    let collection = open_collection(db_path)?;
    let records = collection.list();

    let movies = records.iter().filter(|r| r.kind == MediaKind::Movie).count();
    let series = records.len() - movies;
    let rated: Vec<u8> = records
        .iter()
        .map(|r| r.rating)
        .filter(|rating| *rating > 0)
        .collect();

    println!("\n🎬 Reelshelf Status\n");
    println!("  Database: {}", db_path.display());
    println!("  Schema: v{}", collection.slot().schema_version()?);
    println!("  Entries: {} ({} movies, {} series)", records.len(), movies, series);

    if rated.is_empty() {
        println!("  Rated: none");
    } else {
        let total: u32 = rated.iter().map(|r| u32::from(*r)).sum();
        #[allow(clippy::cast_precision_loss)]
        let average = f64::from(total) / rated.len() as f64;
        println!("  Rated: {} (average {:.1} stars)", rated.len(), average);
    }

    if let Some(updated_at) = collection.slot().updated_at(COLLECTION_KEY)? {
        println!("  Last change: {}", updated_at);
    }

    if records.is_empty() {
        println!("\n  Run `reelshelf add` or `reelshelf tui` to start your shelf");
    }

    Ok(())
}
