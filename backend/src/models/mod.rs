//! Domain models for the movie awards service.
//!
//! - [`NewMovie`] - a validated candidate row, not yet stored
//! - [`MovieRecord`] - a stored movie with its store-assigned id
//! - [`MoviePatch`] - field-level edit of a stored movie
//! - [`MovieFilter`] - equality filter accepted by `find_all`
//! - [`IntervalRecord`] / [`AwardsResult`] - output of the interval query

use serde::{Deserialize, Deserializer, Serialize};

/// Store-assigned movie identifier.
pub type MovieId = i64;

/// Value of `winner` that marks a winning record.
pub const WINNER_YES: &str = "yes";

// =============================================================================
// Movies
// =============================================================================

/// A movie that passed row validation and is waiting for the bulk insert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewMovie {
    pub year: i64,
    pub title: String,
    pub studios: String,
    pub producers: String,
    pub winner: Option<String>,
}

/// A stored movie.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieRecord {
    pub id: MovieId,
    pub year: i64,
    pub title: String,
    pub studios: String,
    pub producers: String,
    pub winner: Option<String>,
}

impl MovieRecord {
    /// Attach a store-assigned id to a candidate.
    pub fn from_new(id: MovieId, movie: NewMovie) -> Self {
        Self {
            id,
            year: movie.year,
            title: movie.title,
            studios: movie.studios,
            producers: movie.producers,
            winner: movie.winner,
        }
    }

    /// True when `winner` is exactly `"yes"`.
    pub fn is_winner(&self) -> bool {
        self.winner.as_deref() == Some(WINNER_YES)
    }

    /// Merge the fields present in `patch`, leaving the others unchanged.
    pub fn apply(&mut self, patch: MoviePatch) {
        if let Some(year) = patch.year {
            self.year = year;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(studios) = patch.studios {
            self.studios = studios;
        }
        if let Some(producers) = patch.producers {
            self.producers = producers;
        }
        if let Some(winner) = patch.winner {
            self.winner = winner;
        }
    }
}

/// Partial update body. Absent fields are left untouched.
///
/// `winner` has three states: absent keeps the value, `null` clears it and a
/// string replaces it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoviePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub studios: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub producers: Option<String>,
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub winner: Option<Option<String>>,
}

impl MoviePatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A present field, `null` included, becomes `Some`.
fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Filter for [`MovieStore::find_all`](crate::store::MovieStore::find_all).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieFilter {
    /// Keep only records whose `winner` equals this value.
    pub winner: Option<String>,
}

impl MovieFilter {
    /// No filtering.
    pub fn all() -> Self {
        Self::default()
    }

    /// Winning records only (`winner == "yes"`).
    pub fn winners() -> Self {
        Self {
            winner: Some(WINNER_YES.to_string()),
        }
    }

    pub fn matches(&self, movie: &MovieRecord) -> bool {
        match &self.winner {
            Some(winner) => movie.winner.as_deref() == Some(winner.as_str()),
            None => true,
        }
    }
}

// =============================================================================
// Award intervals
// =============================================================================

/// Gap between two consecutive wins of one producer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IntervalRecord {
    pub producer: String,
    /// Years between the two wins; never negative.
    pub interval: u64,
    pub previous_win: i64,
    pub following_win: i64,
}

/// Every interval record achieving the global minimum and maximum.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AwardsResult {
    pub min: Vec<IntervalRecord>,
    pub max: Vec<IntervalRecord>,
}
