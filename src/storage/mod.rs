//! Storage Layer - SQLite-backed persistence
//!
//! System of record is a single SQLite file with one table:
//! - movies(id, title, director, genre, year, rating)

pub mod schema;
pub mod sqlite;

pub use sqlite::MovieStore;
