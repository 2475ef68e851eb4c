//! JSON interchange documents
//!
//! Import documents are arrays of movies without ids; export documents carry
//! the stored id as well. Exports are pretty-printed with four-space indents
//! and keep non-ASCII text as-is.

use std::io::{ErrorKind, Write};
use std::path::Path;
use serde::Serialize;
use crate::movie::{Movie, NewMovie};
use crate::{Error, Result};

/// Read an import document.
///
/// Every element needs `title`, `director`, `genre`, `year` and `rating`;
/// other keys are ignored.
pub fn read_import(path: &Path) -> Result<Vec<NewMovie>> {
    let contents = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::DocumentNotFound(path.display().to_string()),
        _ => Error::Io(e),
    })?;

    parse_import(&contents)
}

/// Parse the text of an import document
pub fn parse_import(contents: &str) -> Result<Vec<NewMovie>> {
    serde_json::from_str(contents).map_err(|e| Error::DocumentMalformed(e.to_string()))
}

/// Write an export document, replacing any existing file
pub fn write_export(path: &Path, movies: &[Movie]) -> Result<()> {
    let rendered = render_export(movies)?;
    let mut file = std::fs::File::create(path)?;
    file.write_all(rendered.as_bytes())?;
    Ok(())
}

/// Render movies as an export document
pub fn render_export(movies: &[Movie]) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    movies
        .serialize(&mut ser)
        .map_err(|e| Error::Io(std::io::Error::other(e)))?;

    // serde_json only emits valid UTF-8
    String::from_utf8(buf).map_err(|e| Error::Io(std::io::Error::other(e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_import() {
        let movies = parse_import(
            r#"[
                {"title": "Inception", "director": "Nolan", "genre": "Sci-Fi", "year": 2010, "rating": 8.8},
                {"id": 7, "title": "千と千尋の神隠し", "director": "宮崎駿", "genre": "Animation", "year": 2001, "rating": 9}
            ]"#,
        )
        .unwrap();

        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].title, "Inception");
        assert_eq!(movies[1].director, "宮崎駿");
        assert_eq!(movies[1].rating, Some(9.0));
    }

    #[test]
    fn test_parse_import_missing_field() {
        let err = parse_import(r#"[{"title": "Inception", "director": "Nolan", "year": 2010, "rating": 8.8}]"#)
            .unwrap_err();
        assert!(matches!(err, Error::DocumentMalformed(_)));
    }

    #[test]
    fn test_parse_import_null_rating() {
        let movies = parse_import(
            r#"[{"title": "Metropolis", "director": "Lang", "genre": "Sci-Fi", "year": 1927, "rating": null}]"#,
        )
        .unwrap();
        assert_eq!(movies[0].rating, None);
    }

    #[test]
    fn test_parse_import_rating_key_required() {
        let err = parse_import(r#"[{"title": "Metropolis", "director": "Lang", "genre": "Sci-Fi", "year": 1927}]"#)
            .unwrap_err();
        assert!(matches!(err, Error::DocumentMalformed(_)));
    }

    #[test]
    fn test_parse_import_not_json() {
        let err = parse_import("title,director\nInception,Nolan").unwrap_err();
        assert!(matches!(err, Error::DocumentMalformed(_)));
    }

    #[test]
    fn test_read_import_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_import(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, Error::DocumentNotFound(_)));
    }

    #[test]
    fn test_render_export_layout() {
        let movies = vec![Movie {
            id: 3,
            title: "千と千尋の神隠し".to_string(),
            director: "宮崎駿".to_string(),
            genre: "Animation".to_string(),
            year: 2001,
            rating: Some(9.3),
        }];

        let rendered = render_export(&movies).unwrap();
        assert!(rendered.contains("\n        \"title\": \"千と千尋の神隠し\""));
        assert!(!rendered.contains("\\u"));

        let id_at = rendered.find("\"id\"").unwrap();
        let rating_at = rendered.find("\"rating\"").unwrap();
        assert!(id_at < rating_at);
    }
}
