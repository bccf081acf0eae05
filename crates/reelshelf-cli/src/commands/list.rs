use anyhow::Result;
use reelshelf_core::model::stars;
use reelshelf_core::{MediaKind, MediaRecord};
use std::path::Path;

use super::open_collection;

/// Print every entry as a card, optionally only those of one kind.
pub fn list_entries(db_path: &Path, kind: Option<MediaKind>) -> Result<()> {
    let collection = open_collection(db_path)?;

    if collection.is_empty() {
        println!("Your shelf is empty.");
        println!("\n  Run `reelshelf add --title ... --year ... --genre ...` to add an entry");
        return Ok(());
    }

    let mut shown = 0;
    for (index, record) in collection.list().iter().enumerate() {
        if kind.is_some_and(|k| k != record.kind) {
            continue;
        }
        println!("{}", render_card(index, record));
        shown += 1;
    }

    if shown == 0 {
        println!("No entries of that kind.");
    }

    Ok(())
}

/// Second line of a card: year, genre and the kind-specific detail.
pub fn summary_line(record: &MediaRecord) -> String {
    let mut parts = vec![record.year.as_str(), record.genre.as_str()];
    let detail = record.detail();
    if !detail.is_empty() {
        parts.push(detail);
    }
    parts.join(" - ")
}

/// A plain-text card for one entry.
pub fn render_card(index: usize, record: &MediaRecord) -> String {
    let mut lines = vec![
        format!("#{:<3} {:<7} {}", index, record.kind.label(), record.title),
        format!("     {}", summary_line(record)),
    ];
    lines.extend(record.description.lines().map(|line| format!("     {}", line)));
    lines.push(format!("     {}", stars(record.rating)));
    lines.join("\n")
}
