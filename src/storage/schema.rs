//! Database schema definitions

/// SQL to create the movies table.
///
/// The rating range is enforced by the CHECK constraint; writes outside it
/// fail with a constraint violation.
pub const CREATE_MOVIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS movies (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    director TEXT NOT NULL,
    genre TEXT NOT NULL,
    year INTEGER NOT NULL,
    rating REAL CHECK(rating >= 1.0 AND rating <= 10.0)
)
"#;

/// Columns every movie row is read back with
pub const MOVIE_COLUMNS: &[&str] = &["id", "title", "director", "genre", "year", "rating"];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    vec![CREATE_MOVIES_TABLE]
}
