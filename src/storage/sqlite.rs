//! SQLite storage implementation

use std::path::Path;
use rusqlite::{Connection, ErrorCode, OptionalExtension, params};
use crate::{Result, Error};
use crate::movie::{Filter, Movie, MovieChanges, NewMovie};
use super::schema;

const SELECT_MOVIES: &str = "SELECT id, title, director, genre, year, rating FROM movies";

const INSERT_MOVIE: &str = r#"
    INSERT INTO movies (title, director, genre, year, rating)
    VALUES (?1, ?2, ?3, ?4, ?5)
"#;

/// SQLite-backed storage for the movie catalog.
///
/// Owns its connection; dropping the store closes it, so a store opened for
/// one operation is released on every return path.
pub struct MovieStore {
    conn: Connection,
}

impl MovieStore {
    /// Open a database file (creates if doesn't exist).
    ///
    /// The file is read right away so an unreadable or non-database file
    /// surfaces as `StorageUnavailable` here rather than on the first query.
    pub fn open(path: &Path) -> Result<Self> {
        let unavailable = |source: rusqlite::Error| Error::StorageUnavailable {
            path: path.display().to_string(),
            source,
        };

        let conn = Connection::open(path).map_err(unavailable)?;
        conn.query_row("SELECT COUNT(*) FROM sqlite_master", [], |row| row.get::<_, i64>(0))
            .map_err(unavailable)?;

        tracing::debug!("Opened database {}", path.display());
        Ok(Self { conn })
    }

    /// Open an in-memory database with the schema in place (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Create the movies table if missing and check an existing one has the
    /// columns the catalog reads.
    pub fn ensure_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }

        let mut stmt = self.conn.prepare("SELECT name FROM pragma_table_info('movies')")?;
        let columns = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let missing: Vec<&str> = schema::MOVIE_COLUMNS
            .iter()
            .copied()
            .filter(|expected| !columns.iter().any(|c| c == expected))
            .collect();

        if !missing.is_empty() {
            return Err(Error::Schema(format!(
                "movies table is missing column(s): {}",
                missing.join(", ")
            )));
        }
        Ok(())
    }

    // ========== Write Operations ==========

    /// Insert a movie, returning its new id
    pub fn insert(&self, movie: &NewMovie) -> Result<i64> {
        self.conn
            .execute(
                INSERT_MOVIE,
                params![movie.title, movie.director, movie.genre, movie.year, movie.rating],
            )
            .map_err(classify)?;

        let id = self.conn.last_insert_rowid();
        tracing::info!("Inserted movie {} ({:?})", id, movie.title);
        Ok(id)
    }

    /// Insert a batch of movies in one transaction.
    ///
    /// Either every movie is committed or none is: the first failing row
    /// returns early and the dropped transaction rolls back.
    pub fn insert_batch(&mut self, movies: &[NewMovie]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(INSERT_MOVIE)?;
            for movie in movies {
                stmt.execute(params![
                    movie.title,
                    movie.director,
                    movie.genre,
                    movie.year,
                    movie.rating,
                ])
                .map_err(classify)?;
            }
        }
        tx.commit()?;

        tracing::info!("Inserted batch of {} movies", movies.len());
        Ok(movies.len())
    }

    /// Rewrite every editable field of a movie.
    ///
    /// Fields without a replacement keep their stored value, but the row is
    /// written regardless. Returns the record as stored afterwards.
    pub fn update(&self, id: i64, changes: &MovieChanges) -> Result<Movie> {
        let current = self
            .get(id)?
            .ok_or_else(|| Error::NotFound(format!("movie with id {}", id)))?;
        let next = changes.apply(&current);

        self.conn
            .execute(
                r#"
                UPDATE movies
                SET title = ?1, director = ?2, genre = ?3, year = ?4, rating = ?5
                WHERE id = ?6
                "#,
                params![next.title, next.director, next.genre, next.year, next.rating, id],
            )
            .map_err(classify)?;

        tracing::info!("Updated movie {}", id);
        Ok(Movie {
            id,
            title: next.title,
            director: next.director,
            genre: next.genre,
            year: next.year,
            rating: next.rating,
        })
    }

    /// Delete a movie by id, returning the number of rows removed.
    ///
    /// An unknown id removes nothing and is not an error.
    pub fn delete(&self, id: i64) -> Result<usize> {
        let removed = self.conn.execute("DELETE FROM movies WHERE id = ?1", [id])?;
        tracing::info!("Deleted {} movie(s) with id {}", removed, id);
        Ok(removed)
    }

    /// Delete every movie, returning the number of rows removed
    pub fn delete_all(&self) -> Result<usize> {
        let removed = self.conn.execute("DELETE FROM movies", [])?;
        tracing::info!("Deleted all {} movies", removed);
        Ok(removed)
    }

    // ========== Read Operations ==========

    /// Get a movie by id
    pub fn get(&self, id: i64) -> Result<Option<Movie>> {
        self.conn
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_MOVIES),
                [id],
                row_to_movie,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Find movies matching a filter, in insertion order
    pub fn query(&self, filter: &Filter) -> Result<Vec<Movie>> {
        tracing::debug!("Querying {}", filter);
        match filter.like_pattern() {
            None => self.select(&format!("{} ORDER BY id", SELECT_MOVIES), params![]),
            Some(pattern) => self.select(
                &format!("{} WHERE title LIKE ?1 ORDER BY id", SELECT_MOVIES),
                [pattern],
            ),
        }
    }

    /// First movie matching a filter, if any
    pub fn find_first(&self, filter: &Filter) -> Result<Option<Movie>> {
        let found = match filter.like_pattern() {
            None => self.conn.query_row(
                &format!("{} ORDER BY id LIMIT 1", SELECT_MOVIES),
                [],
                row_to_movie,
            ),
            Some(pattern) => self.conn.query_row(
                &format!("{} WHERE title LIKE ?1 ORDER BY id LIMIT 1", SELECT_MOVIES),
                [pattern],
                row_to_movie,
            ),
        };
        found.optional().map_err(Into::into)
    }

    /// Count all movies
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM movies", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Run a movie query, skipping rows whose values don't fit a `Movie`
    /// (e.g. a `year` stored as text) instead of failing the whole result
    fn select<P: rusqlite::Params>(&self, sql: &str, params: P) -> Result<Vec<Movie>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut movies = Vec::new();
        for row in stmt.query_map(params, row_to_movie)? {
            match row {
                Ok(movie) => movies.push(movie),
                Err(e @ (rusqlite::Error::InvalidColumnType(..)
                | rusqlite::Error::FromSqlConversionFailure(..)
                | rusqlite::Error::IntegralValueOutOfRange(..))) => {
                    tracing::warn!("Skipping unreadable movie row: {}", e);
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(movies)
    }
}

/// Helper to convert a row to a Movie, by column name
fn row_to_movie(row: &rusqlite::Row) -> rusqlite::Result<Movie> {
    Ok(Movie {
        id: row.get("id")?,
        title: row.get("title")?,
        director: row.get("director")?,
        genre: row.get("genre")?,
        year: row.get("year")?,
        rating: row.get("rating")?,
    })
}

/// Map SQLite constraint failures (CHECK, NOT NULL) to `ConstraintViolation`
fn classify(err: rusqlite::Error) -> Error {
    match &err {
        rusqlite::Error::SqliteFailure(code, message) if code.code == ErrorCode::ConstraintViolation => {
            Error::ConstraintViolation(message.clone().unwrap_or_else(|| code.to_string()))
        }
        _ => Error::Storage(err),
    }
}
