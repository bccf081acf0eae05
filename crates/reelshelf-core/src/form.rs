//! The entry form: a draft record plus an optional edit target.
//!
//! The controller is owned by one editing session and is handed the
//! collection explicitly whenever it needs to read or commit.

use crate::collection::Collection;
use crate::error::{Error, Result};
use crate::model::{EntryId, Field, MediaKind, MediaRecord};
use crate::store::Slot;

/// Whether submitting the form adds a new entry or replaces an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// Outcome of a successful [`FormController::submit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Created { index: usize },
    Updated { index: usize },
}

impl Submission {
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Created { index } | Self::Updated { index } => index,
        }
    }
}

/// Maps form input onto a draft and commits it to a [`Collection`].
///
/// The edit target is held by id rather than by position, so deleting an
/// earlier entry while the form is open does not redirect the commit.
#[derive(Debug, Clone, Default)]
pub struct FormController {
    draft: MediaRecord,
    editing: Option<EntryId>,
}

impl FormController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn draft(&self) -> &MediaRecord {
        &self.draft
    }

    /// Id of the entry that will be replaced on submit, if editing.
    #[must_use]
    pub const fn editing_id(&self) -> Option<EntryId> {
        self.editing
    }

    #[must_use]
    pub const fn mode(&self) -> FormMode {
        if self.editing.is_some() {
            FormMode::Edit
        } else {
            FormMode::Create
        }
    }

    /// Label for the submit action in the current mode.
    #[must_use]
    pub const fn submit_label(&self) -> &'static str {
        match self.mode() {
            FormMode::Create => "Save",
            FormMode::Edit => "Update",
        }
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.draft.set(field, value);
    }

    /// Mutable access to one field of the draft, for keystroke-level editing.
    pub fn field_mut(&mut self, field: Field) -> &mut String {
        self.draft.get_mut(field)
    }

    /// Switch the draft's kind. The detail field of the other kind keeps
    /// its value so switching back restores it.
    pub fn set_kind(&mut self, kind: MediaKind) {
        self.draft.kind = kind;
    }

    /// Load the entry at `index` into the draft and enter edit mode.
    ///
    /// Returns `false`, leaving the form untouched, when `index` is out of
    /// range.
    pub fn begin_edit<S: Slot>(&mut self, collection: &Collection<S>, index: usize) -> bool {
        let Some(record) = collection.get(index) else {
            log::debug!("Ignoring edit of missing entry #{}", index);
            return false;
        };
        self.draft = record.clone();
        self.editing = Some(record.id);
        true
    }

    /// Leave edit mode. The draft keeps whatever it holds.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Leave edit mode and clear the draft.
    pub fn reset(&mut self) {
        self.editing = None;
        self.draft = MediaRecord::default();
    }

    /// Validate the draft and commit it.
    ///
    /// In create mode the draft is appended with no rating. In edit mode it
    /// replaces the target, which keeps its rating. On success the form
    /// returns to an empty create-mode draft. A validation failure changes
    /// nothing. If the edit target has been deleted the form leaves edit
    /// mode, keeps the draft, and returns [`Error::NotFound`].
    pub fn submit<S: Slot>(&mut self, collection: &mut Collection<S>) -> Result<Submission> {
        self.draft.validate()?;

        let submission = match self.editing {
            None => {
                let index = collection.create(self.draft.clone(), 0)?;
                Submission::Created { index }
            }
            Some(id) => {
                let Some(index) = collection.position(id) else {
                    self.editing = None;
                    return Err(Error::NotFound {
                        entity: "entry",
                        id: id.to_string(),
                    });
                };
                collection.update(index, self.draft.clone(), true)?;
                self.editing = None;
                Submission::Updated { index }
            }
        };

        self.draft = MediaRecord::new(MediaKind::Movie);
        Ok(submission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::store::MemorySlot;

    fn empty() -> Collection<MemorySlot> {
        Collection::load(MemorySlot::new()).unwrap().0
    }

    fn fill_dune(form: &mut FormController) {
        form.set_field(Field::Title, "Dune");
        form.set_field(Field::Year, "2021");
        form.set_field(Field::Genre, "Sci-Fi");
        form.set_field(Field::Runtime, "155");
    }

    #[test]
    fn test_new_form_is_blank_create() {
        let form = FormController::new();
        assert_eq!(form.mode(), FormMode::Create);
        assert_eq!(form.submit_label(), "Save");
        assert_eq!(form.draft().kind, MediaKind::Movie);
        assert!(form.draft().title.is_empty());
    }

    #[test]
    fn test_submit_creates_entry_and_resets() {
        let mut collection = empty();
        let mut form = FormController::new();
        fill_dune(&mut form);
        form.set_field(Field::Description, "Spice");

        let submission = form.submit(&mut collection).unwrap();

        assert_eq!(submission, Submission::Created { index: 0 });
        let entry = &collection.list()[0];
        assert_eq!(entry.title, "Dune");
        assert_eq!(entry.description, "Spice");
        assert_eq!(entry.runtime.as_deref(), Some("155"));
        assert_eq!(entry.rating, 0);
        assert!(form.draft().title.is_empty());
        assert_eq!(form.draft().kind, MediaKind::Movie);
    }

    #[test]
    fn test_submit_with_empty_title_fails_without_mutation() {
        let mut collection = empty();
        let mut form = FormController::new();
        fill_dune(&mut form);
        form.set_field(Field::Title, "");

        let err = form.submit(&mut collection).unwrap_err();

        assert!(matches!(
            err,
            Error::Validation(ValidationError::MissingField(Field::Title))
        ));
        assert!(collection.list().is_empty());
        // The draft stays so the user can fix it.
        assert_eq!(form.draft().year, "2021");
    }

    #[test]
    fn test_set_kind_keeps_other_detail() {
        let mut form = FormController::new();
        form.set_field(Field::Runtime, "120");
        form.set_kind(MediaKind::Series);
        form.set_field(Field::SeasonCount, "2");
        assert_eq!(form.draft().detail(), "2");

        form.set_kind(MediaKind::Movie);
        assert_eq!(form.draft().detail(), "120");
    }

    #[test]
    fn test_begin_edit_out_of_range_is_silent() {
        let collection = empty();
        let mut form = FormController::new();
        form.set_field(Field::Title, "Draft");

        assert!(!form.begin_edit(&collection, 0));
        assert_eq!(form.mode(), FormMode::Create);
        assert_eq!(form.draft().title, "Draft");
    }

    #[test]
    fn test_edit_preserves_rating_and_length() {
        let mut collection = empty();
        let mut form = FormController::new();
        fill_dune(&mut form);
        form.submit(&mut collection).unwrap();
        form.set_field(Field::Title, "Heat");
        form.set_field(Field::Year, "1995");
        form.set_field(Field::Genre, "Crime");
        form.submit(&mut collection).unwrap();
        collection.rate(0, 4).unwrap();

        assert!(form.begin_edit(&collection, 0));
        assert_eq!(form.mode(), FormMode::Edit);
        assert_eq!(form.submit_label(), "Update");
        assert_eq!(form.draft().title, "Dune");

        form.set_field(Field::Title, "Dune: Part One");
        form.set_field(Field::Genre, "Science Fiction");
        let submission = form.submit(&mut collection).unwrap();

        assert_eq!(submission, Submission::Updated { index: 0 });
        assert_eq!(collection.len(), 2);
        let entry = &collection.list()[0];
        assert_eq!(entry.title, "Dune: Part One");
        assert_eq!(entry.genre, "Science Fiction");
        assert_eq!(entry.rating, 4);
        assert_eq!(form.mode(), FormMode::Create);
        assert!(form.draft().title.is_empty());
    }

    #[test]
    fn test_cancel_edit_keeps_draft() {
        let mut collection = empty();
        let mut form = FormController::new();
        fill_dune(&mut form);
        form.submit(&mut collection).unwrap();

        form.begin_edit(&collection, 0);
        form.cancel_edit();

        assert_eq!(form.mode(), FormMode::Create);
        assert_eq!(form.draft().title, "Dune");

        // Submitting now adds a copy instead of replacing the original.
        form.submit(&mut collection).unwrap();
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn test_reset_clears_draft_and_target() {
        let mut collection = empty();
        let mut form = FormController::new();
        fill_dune(&mut form);
        form.submit(&mut collection).unwrap();

        form.begin_edit(&collection, 0);
        form.reset();

        assert_eq!(form.mode(), FormMode::Create);
        assert!(form.draft().title.is_empty());
    }

    #[test]
    fn test_edit_target_survives_earlier_deletion() {
        let mut collection = empty();
        let mut form = FormController::new();
        for title in ["Alien", "Brazil", "Casablanca"] {
            fill_dune(&mut form);
            form.set_field(Field::Title, title);
            form.submit(&mut collection).unwrap();
        }

        form.begin_edit(&collection, 2);
        collection.delete(0).unwrap();
        form.set_field(Field::Genre, "Romance");
        let submission = form.submit(&mut collection).unwrap();

        assert_eq!(submission, Submission::Updated { index: 1 });
        assert_eq!(collection.list()[0].title, "Brazil");
        assert_eq!(collection.list()[0].genre, "Sci-Fi");
        assert_eq!(collection.list()[1].title, "Casablanca");
        assert_eq!(collection.list()[1].genre, "Romance");
    }

    #[test]
    fn test_deleted_edit_target_is_reported() {
        let mut collection = empty();
        let mut form = FormController::new();
        fill_dune(&mut form);
        form.submit(&mut collection).unwrap();

        form.begin_edit(&collection, 0);
        collection.delete(0).unwrap();

        let err = form.submit(&mut collection).unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
        assert!(err.is_recoverable());
        assert!(collection.is_empty());
        assert_eq!(form.mode(), FormMode::Create);
        assert_eq!(form.draft().title, "Dune");
    }

    #[test]
    fn test_edit_of_entry_sharing_a_stored_id_replaces_that_entry() {
        let alien = MediaRecord::movie("Alien")
            .with_year("1979")
            .with_genre("Horror");
        let brazil = MediaRecord {
            id: alien.id,
            ..MediaRecord::movie("Brazil")
                .with_year("1985")
                .with_genre("Satire")
        };
        let payload = serde_json::to_string(&vec![alien, brazil]).unwrap();
        let slot = MemorySlot::new().with_value(crate::COLLECTION_KEY, payload);
        let (mut collection, _) = Collection::load(slot).unwrap();

        let mut form = FormController::new();
        assert!(form.begin_edit(&collection, 1));
        form.set_field(Field::Title, "Brazil (Final Cut)");
        let submission = form.submit(&mut collection).unwrap();

        assert_eq!(submission, Submission::Updated { index: 1 });
        let titles: Vec<_> = collection.list().iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Alien", "Brazil (Final Cut)"]);
    }

    #[test]
    fn test_edit_keeps_stored_rating_above_five() {
        let payload = serde_json::to_string(&vec![MediaRecord::movie("Dune")
            .with_year("2021")
            .with_genre("Sci-Fi")
            .with_rating(7)])
        .unwrap();
        let slot = MemorySlot::new().with_value(crate::COLLECTION_KEY, payload);
        let (mut collection, _) = Collection::load(slot).unwrap();

        let mut form = FormController::new();
        form.begin_edit(&collection, 0);
        form.set_field(Field::Genre, "Adventure");

        assert_eq!(
            form.submit(&mut collection).unwrap(),
            Submission::Updated { index: 0 }
        );
        assert_eq!(collection.list()[0].genre, "Adventure");
        assert_eq!(collection.list()[0].rating, 7);
    }

    #[test]
    fn test_field_mut_edits_in_place() {
        let mut form = FormController::new();
        form.field_mut(Field::Title).push_str("Du");
        form.field_mut(Field::Title).push_str("ne");
        assert_eq!(form.draft().title, "Dune");
    }
}
