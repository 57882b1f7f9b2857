//! Row validation for the movie list.
//!
//! A raw row (JSON object of string cells, as produced by the
//! [`parser`](crate::parser)) is checked against the embedded JSON Schema
//! `schemas/movie-row.json` (draft 7):
//!
//! - `year` - required, an integer literal (surrounding whitespace allowed)
//! - `title`, `studios`, `producers` - required, 1 to 255 characters
//! - `winner` - optional, at most 3 characters, may be empty
//! - no other keys
//!
//! The outcome is a [`RowVerdict`], never an error: a rejected row is a normal
//! result the ingestion pipeline drops.
//!
//! # Example
//!
//! ```rust,ignore
//! use serde_json::json;
//! use movie_awards::validation::{validate_row, RowVerdict};
//!
//! let row = json!({
//!     "year": "1980",
//!     "title": "Can't Stop the Music",
//!     "studios": "Associated Film Distribution",
//!     "producers": "Allan Carr",
//!     "winner": "yes"
//! });
//! assert!(matches!(validate_row(&row), RowVerdict::Accepted(_)));
//! ```

use jsonschema::Validator;
use once_cell::sync::Lazy;
use serde_json::Value;

use crate::models::NewMovie;

static MOVIE_ROW_SCHEMA: Lazy<Validator> = Lazy::new(|| {
    let schema: Value = serde_json::from_str(include_str!("../../schemas/movie-row.json"))
        .expect("Invalid embedded schema");
    jsonschema::draft7::new(&schema).expect("Invalid embedded schema")
});

/// Outcome of validating one raw row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowVerdict {
    /// The row is usable; carries the typed candidate.
    Accepted(NewMovie),
    /// The row violates the schema; carries the reasons.
    Rejected(Vec<String>),
}

impl RowVerdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, RowVerdict::Accepted(_))
    }

    /// The candidate, if accepted.
    pub fn accepted(self) -> Option<NewMovie> {
        match self {
            RowVerdict::Accepted(movie) => Some(movie),
            RowVerdict::Rejected(_) => None,
        }
    }
}

/// Validate a raw row and convert it into a [`NewMovie`].
pub fn validate_row(row: &Value) -> RowVerdict {
    let errors: Vec<String> = MOVIE_ROW_SCHEMA
        .iter_errors(row)
        .map(|e| e.to_string())
        .collect();

    if !errors.is_empty() {
        return RowVerdict::Rejected(errors);
    }

    let cell = |name: &str| row.get(name).and_then(Value::as_str);

    // The pattern admits integers too large for i64.
    let year = match cell("year").map(str::trim).map(str::parse::<i64>) {
        Some(Ok(year)) => year,
        _ => return RowVerdict::Rejected(vec!["year is not a valid integer".to_string()]),
    };

    RowVerdict::Accepted(NewMovie {
        year,
        title: cell("title").unwrap_or_default().to_string(),
        studios: cell("studios").unwrap_or_default().to_string(),
        producers: cell("producers").unwrap_or_default().to_string(),
        winner: cell("winner").map(str::to_string),
    })
}

/// Quick check without building the candidate.
pub fn is_valid_row(row: &Value) -> bool {
    validate_row(row).is_accepted()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row() -> Value {
        json!({
            "year": "2020",
            "title": "Test Movie 1",
            "studios": "Test Studio 1",
            "producers": "Test Producer 1",
            "winner": "yes"
        })
    }

    #[test]
    fn test_valid_row() {
        let movie = validate_row(&row()).accepted().unwrap();
        assert_eq!(movie.year, 2020);
        assert_eq!(movie.title, "Test Movie 1");
        assert_eq!(movie.winner.as_deref(), Some("yes"));
    }

    #[test]
    fn test_winner_optional_and_may_be_empty() {
        let mut r = row();
        r["winner"] = json!("");
        let movie = validate_row(&r).accepted().unwrap();
        assert_eq!(movie.winner.as_deref(), Some(""));

        r.as_object_mut().unwrap().remove("winner");
        let movie = validate_row(&r).accepted().unwrap();
        assert_eq!(movie.winner, None);
    }

    #[test]
    fn test_missing_title_rejected() {
        let mut r = row();
        r.as_object_mut().unwrap().remove("title");
        assert!(!is_valid_row(&r));
    }

    #[test]
    fn test_empty_required_field_rejected() {
        for field in ["title", "studios", "producers"] {
            let mut r = row();
            r[field] = json!("");
            assert!(!is_valid_row(&r), "empty {field} should be rejected");
        }
    }

    #[test]
    fn test_non_numeric_year_rejected() {
        for year in ["abc", "", "2020.5", "20x0"] {
            let mut r = row();
            r["year"] = json!(year);
            assert!(!is_valid_row(&r), "year {year:?} should be rejected");
        }
    }

    #[test]
    fn test_year_whitespace_tolerated() {
        let mut r = row();
        r["year"] = json!(" 1999 ");
        assert_eq!(validate_row(&r).accepted().unwrap().year, 1999);
    }

    #[test]
    fn test_year_overflow_rejected() {
        let mut r = row();
        r["year"] = json!("99999999999999999999999");
        assert!(matches!(validate_row(&r), RowVerdict::Rejected(_)));
    }

    #[test]
    fn test_long_winner_rejected() {
        let mut r = row();
        r["winner"] = json!("true");
        assert!(!is_valid_row(&r));
    }

    #[test]
    fn test_field_length_limit() {
        for field in ["title", "studios", "producers"] {
            let mut r = row();
            r[field] = json!("x".repeat(255));
            assert!(is_valid_row(&r), "255-char {field} should be accepted");
            r[field] = json!("x".repeat(256));
            assert!(!is_valid_row(&r), "256-char {field} should be rejected");
        }
    }

    #[test]
    fn test_extreme_years_accepted() {
        for year in [i64::MIN, i64::MAX] {
            let mut r = row();
            r["year"] = json!(year.to_string());
            assert_eq!(validate_row(&r).accepted().unwrap().year, year);
        }
    }

    #[test]
    fn test_unknown_field_rejected() {
        let mut r = row();
        r["_5"] = json!("extra");
        let verdict = validate_row(&r);
        let RowVerdict::Rejected(errors) = verdict else {
            panic!("expected rejection");
        };
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_wrong_format_rejected() {
        let r = json!({ "This is not a CSV file": "anything" });
        assert!(!is_valid_row(&r));
    }
}
