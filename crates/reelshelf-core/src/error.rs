use thiserror::Error;

use crate::model::Field;

#[derive(Debug, Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A position that is no longer (or never was) in the collection.
    #[error("no entry at position {index} (collection has {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl Error {
    /// Returns `true` for errors that only invalidate the single operation
    /// that raised them: stale positions, unknown ids and rejected input.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::IndexOutOfRange { .. } | Self::NotFound { .. } | Self::Validation(_)
        )
    }
}

/// Input rejected before any mutation took place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(Field),

    /// Stars given to `rate`, which only accepts 1 through 5.
    #[error("rating must be between 1 and 5, got {0}")]
    RatingOutOfRange(u8),

    /// A record carrying a rating above 5. Zero means unrated and is allowed.
    #[error("rating must be at most 5, got {0}")]
    RatingAboveMax(u8),
}

pub type Result<T> = std::result::Result<T, Error>;
