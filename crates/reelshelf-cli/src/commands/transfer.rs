use anyhow::{Context, Result};
use reelshelf_core::{EntryId, MediaRecord};
use std::path::Path;

use super::open_collection;

/// Write the catalog as JSON to `output`, or to stdout.
pub fn export_entries(db_path: &Path, output: Option<&Path>) -> Result<()> {
    let collection = open_collection(db_path)?;
    let json = collection.to_json_pretty()?;

    match output {
        Some(path) => {
            std::fs::write(path, format!("{json}\n"))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!(
                "✓ Exported {} entries to {}",
                collection.len(),
                path.display()
            );
        }
        None => println!("{json}"),
    }

    Ok(())
}

/// Load entries from a JSON file previously written by `export`.
///
/// The file replaces the catalog unless `append` is set, in which case its
/// entries are added after the existing ones under fresh ids.
pub fn import_entries(db_path: &Path, input: &Path, append: bool) -> Result<()> {
    let contents = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let incoming = parse_entries(&contents)
        .with_context(|| format!("{} is not a reelshelf export", input.display()))?;

    let mut collection = open_collection(db_path)?;
    let count = incoming.len();

    let records = if append {
        let mut records = collection.list().to_vec();
        records.extend(incoming.into_iter().map(|record| MediaRecord {
            id: EntryId::new(),
            ..record
        }));
        records
    } else {
        incoming
    };
    collection.replace_all(records)?;

    log::info!("Imported {} entries from {}", count, input.display());
    println!(
        "✓ Imported {} entries ({} total)",
        count,
        collection.len()
    );
    Ok(())
}

/// Parse and check an export file. Every entry must pass the same checks
/// as a form submission.
fn parse_entries(contents: &str) -> Result<Vec<MediaRecord>> {
    let records: Vec<MediaRecord> = serde_json::from_str(contents)?;
    for (index, record) in records.iter().enumerate() {
        record
            .validate()
            .with_context(|| format!("entry #{} ({:?})", index, record.title))?;
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_export(dir: &TempDir, records: &[MediaRecord]) -> std::path::PathBuf {
        let path = dir.path().join("export.json");
        std::fs::write(&path, serde_json::to_string(records).unwrap()).unwrap();
        path
    }

    fn heat() -> MediaRecord {
        MediaRecord::movie("Heat")
            .with_year("1995")
            .with_genre("Crime")
            .with_rating(5)
    }

    #[test]
    fn test_parse_entries_rejects_missing_year() {
        let json = r#"[{"kind":"movie","title":"Heat","year":"","genre":"Crime"}]"#;
        let err = parse_entries(json).unwrap_err();
        assert!(format!("{err:#}").contains("year is required"));
    }

    #[test]
    fn test_export_then_import_replaces() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("source.db");
        let target = dir.path().join("target.db");
        let export = dir.path().join("out.json");

        let mut collection = open_collection(&source).unwrap();
        collection.create(heat(), 5).unwrap();
        drop(collection);

        export_entries(&source, Some(&export)).unwrap();
        import_entries(&target, &export, false).unwrap();

        let imported = open_collection(&target).unwrap();
        let original = open_collection(&source).unwrap();
        assert_eq!(imported.list(), original.list());
    }

    #[test]
    fn test_import_append_assigns_new_ids() {
        let dir = TempDir::new().unwrap();
        let db = dir.path().join("shelf.db");
        let mut collection = open_collection(&db).unwrap();
        collection.create(heat(), 2).unwrap();
        let existing = collection.list()[0].clone();
        drop(collection);

        let path = write_export(&dir, &[existing.clone()]);
        import_entries(&db, &path, true).unwrap();

        let collection = open_collection(&db).unwrap();
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.list()[0], existing);
        assert_eq!(collection.list()[1].title, "Heat");
        assert_ne!(collection.list()[1].id, existing.id);
    }

    #[test]
    fn test_import_rejects_bad_file_without_touching_catalog() {
        let dir = TempDir::new().unwrap();
        let db = dir.path().join("shelf.db");
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{\"nope\": true}").unwrap();

        assert!(import_entries(&db, &path, false).is_err());
        assert!(open_collection(&db).unwrap().is_empty());
    }
}
