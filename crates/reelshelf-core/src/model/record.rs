use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, ValidationError};
use crate::model::field::Field;
use crate::model::ids::EntryId;

/// Highest number of stars an entry can be given.
pub const MAX_RATING: u8 = 5;

/// Whether an entry is a film or an episodic series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Movie,
    Series,
}

impl MediaKind {
    /// The field that carries the kind-specific detail.
    #[must_use]
    pub const fn detail_field(self) -> Field {
        match self {
            Self::Movie => Field::Runtime,
            Self::Series => Field::SeasonCount,
        }
    }

    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Movie => Self::Series,
            Self::Series => Self::Movie,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Movie => "Movie",
            Self::Series => "Series",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Movie => f.write_str("movie"),
            Self::Series => f.write_str("series"),
        }
    }
}

impl FromStr for MediaKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "movie" | "film" => Ok(Self::Movie),
            "series" | "show" | "tv" => Ok(Self::Series),
            _ => Err(Error::InvalidData(format!("unknown media kind: {s}"))),
        }
    }
}

/// A movie or series in the catalog.
///
/// `runtime` and `season_count` are both kept on every record. Only the one
/// selected by `kind` is shown; the other may hold a stale value from before
/// the kind was switched and is deliberately left in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRecord {
    /// Payloads written before ids existed get a fresh one when read.
    #[serde(default)]
    pub id: EntryId,
    pub kind: MediaKind,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub year: String,
    pub genre: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season_count: Option<String>,
    #[serde(default)]
    pub rating: u8,
}

impl Default for MediaRecord {
    fn default() -> Self {
        Self::new(MediaKind::Movie)
    }
}

impl MediaRecord {
    /// An empty record of the given kind, as a blank form would produce.
    #[must_use]
    pub fn new(kind: MediaKind) -> Self {
        Self {
            id: EntryId::new(),
            kind,
            title: String::new(),
            description: String::new(),
            year: String::new(),
            genre: String::new(),
            runtime: None,
            season_count: None,
            rating: 0,
        }
    }

    #[must_use]
    pub fn movie(title: impl Into<String>) -> Self {
        Self::new(MediaKind::Movie).with_title(title)
    }

    #[must_use]
    pub fn series(title: impl Into<String>) -> Self {
        Self::new(MediaKind::Series).with_title(title)
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = year.into();
        self
    }

    #[must_use]
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = genre.into();
        self
    }

    #[must_use]
    pub fn with_runtime(mut self, runtime: impl Into<String>) -> Self {
        self.runtime = Some(runtime.into());
        self
    }

    #[must_use]
    pub fn with_season_count(mut self, seasons: impl Into<String>) -> Self {
        self.season_count = Some(seasons.into());
        self
    }

    #[must_use]
    pub fn with_rating(mut self, rating: u8) -> Self {
        self.rating = rating;
        self
    }

    /// Current text of a field. Absent optional fields read as empty.
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Description => &self.description,
            Field::Year => &self.year,
            Field::Genre => &self.genre,
            Field::Runtime => self.runtime.as_deref().unwrap_or_default(),
            Field::SeasonCount => self.season_count.as_deref().unwrap_or_default(),
        }
    }

    /// Overwrite a field. No validation happens here.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Title => self.title = value,
            Field::Description => self.description = value,
            Field::Year => self.year = value,
            Field::Genre => self.genre = value,
            Field::Runtime => self.runtime = Some(value),
            Field::SeasonCount => self.season_count = Some(value),
        }
    }

    /// Mutable access to a field's text, materializing absent optional fields.
    pub fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Title => &mut self.title,
            Field::Description => &mut self.description,
            Field::Year => &mut self.year,
            Field::Genre => &mut self.genre,
            Field::Runtime => self.runtime.get_or_insert_with(String::new),
            Field::SeasonCount => self.season_count.get_or_insert_with(String::new),
        }
    }

    /// Runtime for movies, season count for series. The other field is ignored.
    #[must_use]
    pub fn detail(&self) -> &str {
        self.get(self.kind.detail_field())
    }

    /// Check that every required field is filled in.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match Field::REQUIRED
            .into_iter()
            .find(|field| self.get(*field).is_empty())
        {
            Some(field) => Err(ValidationError::MissingField(field)),
            None => Ok(()),
        }
    }
}

/// Render a rating as five stars, filled up to `rating`.
#[must_use]
pub fn stars(rating: u8) -> String {
    (1..=MAX_RATING)
        .map(|n| if n <= rating { '\u{2605}' } else { '\u{2606}' })
        .collect()
}
