//! The ordered catalog and its synchronization with a durable slot.
//!
//! Every mutation builds the next sequence, writes the whole of it to the
//! slot, and only then adopts it in memory. A failed write therefore leaves
//! the collection exactly as it was.

use std::collections::HashSet;

use crate::error::{Error, Result, ValidationError};
use crate::model::{EntryId, EntryRef, MediaRecord, MAX_RATING};
use crate::store::Slot;

/// Key under which the serialized collection is stored.
pub const COLLECTION_KEY: &str = "collection";

/// What `Collection::load` found in the slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// Nothing stored yet.
    Fresh,
    Loaded { count: usize },
    /// The stored payload could not be read; the collection starts empty
    /// and the payload is replaced on the next mutation.
    Corrupt { reason: String },
}

impl LoadStatus {
    #[must_use]
    pub const fn is_corrupt(&self) -> bool {
        matches!(self, Self::Corrupt { .. })
    }
}

/// The canonical, position-addressed list of catalog entries.
#[derive(Debug)]
pub struct Collection<S: Slot> {
    slot: S,
    records: Vec<MediaRecord>,
}

impl<S: Slot> Collection<S> {
    /// Read the collection from `slot`.
    ///
    /// Only failures of the slot itself are errors. A payload that is not a
    /// JSON array of records yields an empty collection and
    /// [`LoadStatus::Corrupt`].
    pub fn load(slot: S) -> Result<(Self, LoadStatus)> {
        let Some(payload) = slot.read(COLLECTION_KEY)? else {
            log::info!("No stored collection, starting empty");
            return Ok((
                Self {
                    slot,
                    records: Vec::new(),
                },
                LoadStatus::Fresh,
            ));
        };

        match serde_json::from_str::<Vec<MediaRecord>>(&payload) {
            Ok(mut records) => {
                log::info!("Loaded {} entries", records.len());
                let reassigned = ensure_unique_ids(&mut records);
                if reassigned > 0 {
                    log::warn!("Gave {} entries with repeated ids fresh ones", reassigned);
                }
                let status = LoadStatus::Loaded {
                    count: records.len(),
                };
                Ok((Self { slot, records }, status))
            }
            Err(e) => {
                log::warn!("Stored collection is unreadable, starting empty: {}", e);
                Ok((
                    Self {
                        slot,
                        records: Vec::new(),
                    },
                    LoadStatus::Corrupt {
                        reason: e.to_string(),
                    },
                ))
            }
        }
    }

    /// Read-only view of the current entries, in order.
    #[must_use]
    pub fn list(&self) -> &[MediaRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&MediaRecord> {
        self.records.get(index)
    }

    /// Current position of the entry with the given id.
    #[must_use]
    pub fn position(&self, id: EntryId) -> Option<usize> {
        self.records.iter().position(|record| record.id == id)
    }

    /// Turn a position or id into a position that is currently valid.
    pub fn resolve(&self, entry: EntryRef) -> Result<usize> {
        match entry {
            EntryRef::Position(index) => {
                self.check_index(index)?;
                Ok(index)
            }
            EntryRef::Id(id) => self.position(id).ok_or_else(|| Error::NotFound {
                entity: "entry",
                id: id.to_string(),
            }),
        }
    }

    #[must_use]
    pub const fn slot(&self) -> &S {
        &self.slot
    }

    pub fn into_slot(self) -> S {
        self.slot
    }

    /// Append `record` with the given rating and a fresh id.
    ///
    /// Returns the position of the new entry.
    pub fn create(&mut self, record: MediaRecord, rating: u8) -> Result<usize> {
        if rating > MAX_RATING {
            return Err(ValidationError::RatingAboveMax(rating).into());
        }

        let mut next = self.records.clone();
        next.push(MediaRecord {
            id: EntryId::new(),
            rating,
            ..record
        });
        self.commit(next)?;

        let index = self.records.len() - 1;
        log::debug!("Created entry {} at #{}", self.records[index].id, index);
        Ok(index)
    }

    /// Replace the entry at `index` with `record`.
    ///
    /// The entry keeps its id. Its rating is kept as stored when
    /// `preserve_rating` is set, otherwise it is taken from `record` and must
    /// be at most five.
    pub fn update(
        &mut self,
        index: usize,
        record: MediaRecord,
        preserve_rating: bool,
    ) -> Result<()> {
        self.check_index(index)?;
        let id = self.records[index].id;
        let rating = if preserve_rating {
            self.records[index].rating
        } else if record.rating > MAX_RATING {
            return Err(ValidationError::RatingAboveMax(record.rating).into());
        } else {
            record.rating
        };

        let mut next = self.records.clone();
        next[index] = MediaRecord {
            id,
            rating,
            ..record
        };
        self.commit(next)?;

        log::debug!("Updated entry #{}", index);
        Ok(())
    }

    /// Remove the entry at `index`. Later entries move down one position.
    pub fn delete(&mut self, index: usize) -> Result<MediaRecord> {
        self.check_index(index)?;

        let mut next = self.records.clone();
        let removed = next.remove(index);
        self.commit(next)?;

        log::debug!("Deleted entry {} from #{}", removed.id, index);
        Ok(removed)
    }

    /// Give the entry at `index` between one and five stars.
    pub fn rate(&mut self, index: usize, stars: u8) -> Result<()> {
        self.check_index(index)?;
        if !(1..=MAX_RATING).contains(&stars) {
            return Err(ValidationError::RatingOutOfRange(stars).into());
        }

        let mut next = self.records.clone();
        next[index].rating = stars;
        self.commit(next)?;

        log::debug!("Rated entry #{} with {} stars", index, stars);
        Ok(())
    }

    pub fn update_by_id(
        &mut self,
        id: EntryId,
        record: MediaRecord,
        preserve_rating: bool,
    ) -> Result<usize> {
        let index = self.resolve(EntryRef::Id(id))?;
        self.update(index, record, preserve_rating)?;
        Ok(index)
    }

    pub fn delete_by_id(&mut self, id: EntryId) -> Result<MediaRecord> {
        let index = self.resolve(EntryRef::Id(id))?;
        self.delete(index)
    }

    pub fn rate_by_id(&mut self, id: EntryId, stars: u8) -> Result<usize> {
        let index = self.resolve(EntryRef::Id(id))?;
        self.rate(index, stars)?;
        Ok(index)
    }

    /// Replace every entry at once, as an import does.
    ///
    /// Entries keep the ids they arrive with, except that a repeated id is
    /// replaced by a fresh one. Ratings above five are refused.
    pub fn replace_all(&mut self, mut records: Vec<MediaRecord>) -> Result<()> {
        if let Some(record) = records.iter().find(|r| r.rating > MAX_RATING) {
            return Err(ValidationError::RatingAboveMax(record.rating).into());
        }
        ensure_unique_ids(&mut records);
        self.commit(records)?;
        log::info!("Replaced collection with {} entries", self.records.len());
        Ok(())
    }

    /// The collection as indented JSON, in the same shape as the slot payload.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.records)?)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.records.len() {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange {
                index,
                len: self.records.len(),
            })
        }
    }

    fn commit(&mut self, next: Vec<MediaRecord>) -> Result<()> {
        let payload = serde_json::to_string(&next)?;
        self.slot.write(COLLECTION_KEY, &payload)?;
        self.records = next;
        Ok(())
    }
}

/// Give every entry whose id was already used earlier in `records` a fresh
/// id. Returns how many were changed.
fn ensure_unique_ids(records: &mut [MediaRecord]) -> usize {
    let mut seen = HashSet::with_capacity(records.len());
    let mut reassigned = 0;
    for record in records.iter_mut() {
        if !seen.insert(record.id) {
            record.id = EntryId::new();
            seen.insert(record.id);
            reassigned += 1;
        }
    }
    reassigned
}
