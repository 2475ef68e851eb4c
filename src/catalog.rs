//! Path-based catalog operations.
//!
//! Each function opens the database, runs one logical operation and drops the
//! connection before returning.

use std::path::Path;
use crate::document;
use crate::movie::{Filter, Movie, MovieChanges, NewMovie};
use crate::storage::MovieStore;
use crate::{Error, Result};

/// Create the movies table if it does not exist yet
pub fn ensure_schema(db_path: &Path) -> Result<()> {
    MovieStore::open(db_path)?.ensure_schema()
}

/// Import every movie in the document at `document_path`, all or nothing.
///
/// Returns the number of movies inserted.
pub fn bulk_import(db_path: &Path, document_path: &Path) -> Result<usize> {
    let movies = document::read_import(document_path)?;
    tracing::debug!("Read {} movies from {}", movies.len(), document_path.display());

    let mut store = MovieStore::open(db_path)?;
    store.insert_batch(&movies)
}

/// Movies matching `filter`, in insertion order
pub fn query(db_path: &Path, filter: &Filter) -> Result<Vec<Movie>> {
    MovieStore::open(db_path)?.query(filter)
}

/// First movie matching `filter`
pub fn find_first(db_path: &Path, filter: &Filter) -> Result<Option<Movie>> {
    MovieStore::open(db_path)?.find_first(filter)
}

/// Movie with the given id
pub fn get(db_path: &Path, id: i64) -> Result<Option<Movie>> {
    MovieStore::open(db_path)?.get(id)
}

/// Number of stored movies
pub fn count(db_path: &Path) -> Result<usize> {
    MovieStore::open(db_path)?.count()
}

/// Insert a movie, returning its id
pub fn insert(db_path: &Path, movie: &NewMovie) -> Result<i64> {
    MovieStore::open(db_path)?.insert(movie)
}

/// Rewrite a movie, keeping stored values where `changes` has none
pub fn update(db_path: &Path, id: i64, changes: &MovieChanges) -> Result<Movie> {
    MovieStore::open(db_path)?.update(id, changes)
}

/// Delete one movie; an unknown id removes nothing
pub fn delete_one(db_path: &Path, id: i64) -> Result<usize> {
    MovieStore::open(db_path)?.delete(id)
}

/// Delete every movie
pub fn delete_all(db_path: &Path) -> Result<usize> {
    MovieStore::open(db_path)?.delete_all()
}

/// Export movies matching `filter` to `document_path`.
///
/// Nothing is written when no movie matches. Returns the number exported.
pub fn bulk_export(db_path: &Path, document_path: &Path, filter: &Filter) -> Result<usize> {
    let movies = query(db_path, filter)?;
    if movies.is_empty() {
        return Err(Error::NotFound(format!("no movies match {}", filter)));
    }

    document::write_export(document_path, &movies)?;
    tracing::info!("Exported {} movies to {}", movies.len(), document_path.display());
    Ok(movies.len())
}
