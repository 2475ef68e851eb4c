use crate::movie::Movie;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
pub struct MovieRow {
    #[tabled(rename = "ID")]
    pub id: i64,
    #[tabled(rename = "Title")]
    pub title: String,
    #[tabled(rename = "Director")]
    pub director: String,
    #[tabled(rename = "Genre")]
    pub genre: String,
    #[tabled(rename = "Year")]
    pub year: i64,
    #[tabled(rename = "Rating")]
    pub rating: String,
}

impl From<&Movie> for MovieRow {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            director: movie.director.clone(),
            genre: movie.genre.clone(),
            year: movie.year,
            rating: movie
                .rating
                .map(|rating| format!("{:.1}", rating))
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Render movies as a rounded table, empty string for no movies
pub fn movie_table(movies: &[Movie]) -> String {
    if movies.is_empty() {
        return String::new();
    }

    let rows: Vec<MovieRow> = movies.iter().map(MovieRow::from).collect();
    Table::new(&rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_table() {
        let movies = vec![Movie {
            id: 1,
            title: "Inception".to_string(),
            director: "Nolan".to_string(),
            genre: "Sci-Fi".to_string(),
            year: 2010,
            rating: Some(9.0),
        }];

        let table = movie_table(&movies);
        assert!(table.contains("Title"));
        assert!(table.contains("Inception"));
        assert!(table.contains("9.0"));
        assert!(movie_table(&[]).is_empty());

        let unrated = vec![Movie { rating: None, ..movies[0].clone() }];
        assert!(movie_table(&unrated).contains(" - "));
    }
}
