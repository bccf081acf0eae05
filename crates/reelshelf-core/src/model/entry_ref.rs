use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::model::ids::EntryId;

/// How a caller points at an entry: by its current position or by its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryRef {
    Position(usize),
    Id(EntryId),
}

impl From<usize> for EntryRef {
    fn from(index: usize) -> Self {
        Self::Position(index)
    }
}

impl From<EntryId> for EntryRef {
    fn from(id: EntryId) -> Self {
        Self::Id(id)
    }
}

impl fmt::Display for EntryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Position(index) => write!(f, "#{index}"),
            Self::Id(id) => write!(f, "{id}"),
        }
    }
}

impl FromStr for EntryRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().trim_start_matches('#');
        if let Ok(index) = s.parse::<usize>() {
            return Ok(Self::Position(index));
        }
        s.parse::<EntryId>().map(Self::Id)
    }
}
