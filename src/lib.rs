//! # movie-catalog - Interactive movie catalog
//!
//! A single-user catalog of movies kept in a local SQLite file.
//!
//! movie-catalog provides:
//! - A typed `Movie` record with search filters
//! - SQLite-backed storage with a per-operation scoped connection
//! - JSON document import (atomic) and export
//! - A numbered, menu-driven terminal controller

pub mod movie;
pub mod storage;
pub mod document;
pub mod catalog;
pub mod config;
pub mod controller;
pub mod ui;


// Re-exports for convenient access
pub use movie::{Filter, Movie, MovieChanges, NewMovie};
pub use storage::MovieStore;
pub use config::CatalogConfig;
pub use controller::Controller;

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for catalog operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Database unavailable at {path}: {source}")]
    StorageUnavailable {
        path: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Malformed document: {0}")]
    DocumentMalformed(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Invalid number for {field}: {input:?}")]
    Format { field: &'static str, input: String },

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
