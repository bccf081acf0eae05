use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A free-text field of a [`MediaRecord`](super::MediaRecord) that a form can edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Description,
    Year,
    Genre,
    /// Only meaningful for movies.
    Runtime,
    /// Only meaningful for series.
    SeasonCount,
}

impl Field {
    pub const ALL: [Self; 6] = [
        Self::Title,
        Self::Description,
        Self::Year,
        Self::Genre,
        Self::Runtime,
        Self::SeasonCount,
    ];

    /// Fields that must be non-empty before a draft can be submitted.
    pub const REQUIRED: [Self; 3] = [Self::Title, Self::Year, Self::Genre];

    /// The key used for this field in the stored JSON.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Year => "year",
            Self::Genre => "genre",
            Self::Runtime => "runtime",
            Self::SeasonCount => "seasonCount",
        }
    }

    /// Human-readable label, as shown next to an input.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Description => "Description",
            Self::Year => "Year",
            Self::Genre => "Genre",
            Self::Runtime => "Runtime",
            Self::SeasonCount => "Seasons",
        }
    }

    #[must_use]
    pub fn is_required(self) -> bool {
        Self::REQUIRED.contains(&self)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SeasonCount => f.write_str("season count"),
            other => f.write_str(other.key()),
        }
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "description" => Ok(Self::Description),
            "year" => Ok(Self::Year),
            "genre" => Ok(Self::Genre),
            "runtime" => Ok(Self::Runtime),
            "seasoncount" | "season_count" | "seasons" => Ok(Self::SeasonCount),
            _ => Err(Error::InvalidData(format!("unknown field: {s}"))),
        }
    }
}
