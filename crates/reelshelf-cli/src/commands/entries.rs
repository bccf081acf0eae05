use anyhow::Result;
use reelshelf_core::model::stars;
use reelshelf_core::{EntryRef, Field, FormController, MediaKind};
use std::path::Path;

use super::list::render_card;
use super::open_collection;

/// Form fields given on the command line. Anything left out keeps the
/// draft's current value.
#[derive(Debug, Default, clap::Args)]
pub struct EntryFields {
    /// movie or series
    #[arg(long)]
    pub kind: Option<MediaKind>,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Release year (free text)
    #[arg(long)]
    pub year: Option<String>,

    #[arg(long)]
    pub genre: Option<String>,

    /// Runtime, shown for movies
    #[arg(long)]
    pub runtime: Option<String>,

    /// Number of seasons, shown for series
    #[arg(long)]
    pub seasons: Option<String>,
}

impl EntryFields {
    /// Feed the given values into the form, the way typing into it would.
    pub fn apply(&self, form: &mut FormController) {
        if let Some(kind) = self.kind {
            form.set_kind(kind);
        }

        let values = [
            (Field::Title, &self.title),
            (Field::Description, &self.description),
            (Field::Year, &self.year),
            (Field::Genre, &self.genre),
            (Field::Runtime, &self.runtime),
            (Field::SeasonCount, &self.seasons),
        ];
        for (field, value) in values {
            if let Some(value) = value {
                form.set_field(field, value.as_str());
            }
        }
    }
}

pub fn add_entry(db_path: &Path, fields: &EntryFields) -> Result<()> {
    let mut collection = open_collection(db_path)?;
    let mut form = FormController::new();
    fields.apply(&mut form);

    let index = form.submit(&mut collection)?.index();

    println!("✓ Added entry #{}\n", index);
    println!("{}", render_card(index, &collection.list()[index]));
    Ok(())
}

pub fn edit_entry(db_path: &Path, target: EntryRef, fields: &EntryFields) -> Result<()> {
    let mut collection = open_collection(db_path)?;
    let index = collection.resolve(target)?;

    let mut form = FormController::new();
    if !form.begin_edit(&collection, index) {
        anyhow::bail!("No entry at #{}", index);
    }
    fields.apply(&mut form);

    let index = form.submit(&mut collection)?.index();

    println!("✓ Updated entry #{}\n", index);
    println!("{}", render_card(index, &collection.list()[index]));
    Ok(())
}

pub fn delete_entry(db_path: &Path, target: EntryRef) -> Result<()> {
    let mut collection = open_collection(db_path)?;
    let index = collection.resolve(target)?;
    let removed = collection.delete(index)?;

    println!("✓ Deleted #{} {}", index, removed.title);
    if index < collection.len() {
        println!("  Entries after it moved up one position.");
    }
    Ok(())
}

pub fn rate_entry(db_path: &Path, target: EntryRef, rating: u8) -> Result<()> {
    let mut collection = open_collection(db_path)?;
    let index = collection.resolve(target)?;
    collection.rate(index, rating)?;

    let record = &collection.list()[index];
    println!("✓ Rated {} {}", record.title, stars(record.rating));
    Ok(())
}

pub fn show_entry(db_path: &Path, target: EntryRef) -> Result<()> {
    let collection = open_collection(db_path)?;
    let index = collection.resolve(target)?;
    let record = &collection.list()[index];

    println!("{}", render_card(index, record));
    println!("\n  id: {}", record.id);

    let stale = record.get(record.kind.other().detail_field());
    if !stale.is_empty() {
        println!(
            "  (kept from when this was a {}: {} = {})",
            record.kind.other(),
            record.kind.other().detail_field(),
            stale
        );
    }
    Ok(())
}
