//! Movie records - the single entity kept by the catalog
//!
//! - `Movie`: a stored record, `id` assigned by the database
//! - `NewMovie`: a record waiting to be inserted (also the import document element)
//! - `MovieChanges`: optional per-field replacements for an update
//! - `Filter`: which records a search or export selects

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest rating the store accepts
pub const MIN_RATING: f64 = 1.0;
/// Highest rating the store accepts
pub const MAX_RATING: f64 = 10.0;

/// A movie as stored in the catalog.
///
/// Field order matches the export document layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub director: String,
    pub genre: String,
    pub year: i64,
    /// `None` for rows stored without a rating (the column is nullable)
    pub rating: Option<f64>,
}

impl Movie {
    /// Drop the id, keeping the user-editable fields
    pub fn to_new(&self) -> NewMovie {
        NewMovie {
            title: self.title.clone(),
            director: self.director.clone(),
            genre: self.genre.clone(),
            year: self.year,
            rating: self.rating,
        }
    }
}

/// A movie that has not been assigned an id yet.
///
/// In an import document `rating` must be present but may be `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMovie {
    pub title: String,
    pub director: String,
    pub genre: String,
    pub year: i64,
    #[serde(deserialize_with = "Option::deserialize")]
    pub rating: Option<f64>,
}

impl NewMovie {
    pub fn new(
        title: impl Into<String>,
        director: impl Into<String>,
        genre: impl Into<String>,
        year: i64,
        rating: f64,
    ) -> Self {
        Self {
            title: title.into(),
            director: director.into(),
            genre: genre.into(),
            year,
            rating: Some(rating),
        }
    }

    /// Build a record from raw terminal input.
    ///
    /// Text fields are taken as typed. `year` and `rating` must parse as
    /// numbers, otherwise the whole record is rejected with `Error::Format`.
    /// The rating range is left to the store's CHECK constraint.
    pub fn from_input(
        title: &str,
        director: &str,
        genre: &str,
        year: &str,
        rating: &str,
    ) -> Result<Self> {
        Ok(Self {
            title: title.to_string(),
            director: director.to_string(),
            genre: genre.to_string(),
            year: parse_year(year)?,
            rating: Some(parse_rating(rating)?),
        })
    }
}

/// Replacement values for an update. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieChanges {
    pub title: Option<String>,
    pub director: Option<String>,
    pub genre: Option<String>,
    pub year: Option<i64>,
    pub rating: Option<f64>,
}

impl MovieChanges {
    /// Build changes from raw terminal input, where an empty line means
    /// "keep the current value".
    pub fn from_input(
        title: &str,
        director: &str,
        genre: &str,
        year: &str,
        rating: &str,
    ) -> Result<Self> {
        Ok(Self {
            title: non_empty(title).map(str::to_string),
            director: non_empty(director).map(str::to_string),
            genre: non_empty(genre).map(str::to_string),
            year: non_empty(year).map(parse_year).transpose()?,
            rating: non_empty(rating).map(parse_rating).transpose()?,
        })
    }

    /// True when no field would be replaced
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Resolve the full set of values to write over `current`
    pub fn apply(&self, current: &Movie) -> NewMovie {
        NewMovie {
            title: self.title.clone().unwrap_or_else(|| current.title.clone()),
            director: self.director.clone().unwrap_or_else(|| current.director.clone()),
            genre: self.genre.clone().unwrap_or_else(|| current.genre.clone()),
            year: self.year.unwrap_or(current.year),
            rating: self.rating.or(current.rating),
        }
    }
}

/// Which movies a search or export selects
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Every record
    All,
    /// Records whose title contains the given text (SQL `LIKE` semantics)
    TitleContains(String),
}

impl Filter {
    /// `LIKE` pattern for a title filter, `None` for `All`
    pub fn like_pattern(&self) -> Option<String> {
        match self {
            Filter::All => None,
            Filter::TitleContains(text) => Some(format!("%{}%", text)),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::All => write!(f, "all movies"),
            Filter::TitleContains(text) => write!(f, "title containing {:?}", text),
        }
    }
}

/// Parse a release year typed at the terminal
pub fn parse_year(input: &str) -> Result<i64> {
    input.trim().parse().map_err(|_| Error::Format {
        field: "year",
        input: input.to_string(),
    })
}

/// Parse a rating typed at the terminal.
///
/// Non-finite values are format errors: SQLite stores NaN as NULL, which
/// would slip past the range check.
pub fn parse_rating(input: &str) -> Result<f64> {
    match input.trim().parse::<f64>() {
        Ok(rating) if rating.is_finite() => Ok(rating),
        _ => Err(Error::Format {
            field: "rating",
            input: input.to_string(),
        }),
    }
}

fn non_empty(input: &str) -> Option<&str> {
    if input.is_empty() { None } else { Some(input) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inception() -> Movie {
        Movie {
            id: 1,
            title: "Inception".to_string(),
            director: "Nolan".to_string(),
            genre: "Sci-Fi".to_string(),
            year: 2010,
            rating: Some(8.8),
        }
    }

    #[test]
    fn test_from_input_parses_numbers() {
        let movie = NewMovie::from_input("Inception", "Nolan", "Sci-Fi", " 2010 ", "8.8").unwrap();
        assert_eq!(movie, NewMovie::new("Inception", "Nolan", "Sci-Fi", 2010, 8.8));
    }

    #[test]
    fn test_from_input_rejects_bad_year() {
        let err = NewMovie::from_input("Inception", "Nolan", "Sci-Fi", "twenty-ten", "8.8").unwrap_err();
        assert!(matches!(err, Error::Format { field: "year", .. }));
    }

    #[test]
    fn test_from_input_rejects_nan_rating() {
        let err = NewMovie::from_input("Inception", "Nolan", "Sci-Fi", "2010", "NaN").unwrap_err();
        assert!(matches!(err, Error::Format { field: "rating", .. }));
    }

    #[test]
    fn test_blank_changes_keep_everything() {
        let changes = MovieChanges::from_input("", "", "", "", "").unwrap();
        assert!(changes.is_empty());
        assert_eq!(changes.apply(&inception()), inception().to_new());
    }

    #[test]
    fn test_partial_changes() {
        let changes = MovieChanges::from_input("", "", "Thriller", "", "9.1").unwrap();
        let applied = changes.apply(&inception());
        assert_eq!(applied.title, "Inception");
        assert_eq!(applied.genre, "Thriller");
        assert_eq!(applied.rating, Some(9.1));
    }

    #[test]
    fn test_changes_keep_missing_rating() {
        let unrated = Movie { rating: None, ..inception() };
        let kept = MovieChanges::from_input("", "", "", "", "").unwrap().apply(&unrated);
        assert_eq!(kept.rating, None);

        let rated = MovieChanges::from_input("", "", "", "", "7.5").unwrap().apply(&unrated);
        assert_eq!(rated.rating, Some(7.5));
    }

    #[test]
    fn test_changes_reject_bad_rating() {
        let err = MovieChanges::from_input("", "", "", "", "great").unwrap_err();
        assert!(matches!(err, Error::Format { field: "rating", .. }));
    }

    #[test]
    fn test_filter_pattern() {
        assert_eq!(Filter::All.like_pattern(), None);
        assert_eq!(
            Filter::TitleContains("Incep".to_string()).like_pattern().as_deref(),
            Some("%Incep%")
        );
    }
}
