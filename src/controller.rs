//! Interactive Controller - the numbered menu loop
//!
//! Reads a choice, runs the matching catalog operation and prints the result.
//! Errors from an operation are reported and the menu comes back; only a
//! failure to talk to the terminal ends the loop early.

use std::io::{BufRead, Write};
use crate::catalog;
use crate::config::CatalogConfig;
use crate::movie::{Filter, MovieChanges, NewMovie, MAX_RATING, MIN_RATING};
use crate::storage::MovieStore;
use crate::{ui, Error, Result};

/// Menu entries, keyed `1` to `7`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Import,
    Search,
    Add,
    Modify,
    Delete,
    Export,
    Exit,
}

impl MenuChoice {
    pub fn all() -> &'static [MenuChoice] {
        &[
            MenuChoice::Import,
            MenuChoice::Search,
            MenuChoice::Add,
            MenuChoice::Modify,
            MenuChoice::Delete,
            MenuChoice::Export,
            MenuChoice::Exit,
        ]
    }

    pub fn key(&self) -> &'static str {
        match self {
            MenuChoice::Import => "1",
            MenuChoice::Search => "2",
            MenuChoice::Add => "3",
            MenuChoice::Modify => "4",
            MenuChoice::Delete => "5",
            MenuChoice::Export => "6",
            MenuChoice::Exit => "7",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::Import => "Import movies",
            MenuChoice::Search => "Search movies",
            MenuChoice::Add => "Add a movie",
            MenuChoice::Modify => "Modify a movie",
            MenuChoice::Delete => "Delete movies",
            MenuChoice::Export => "Export movies",
            MenuChoice::Exit => "Exit",
        }
    }

    /// Parse a menu answer; anything but `1`..`7` is `None`
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        Self::all().iter().copied().find(|choice| choice.key() == input)
    }
}

/// Prepare the database and run the menu.
///
/// A schema problem is reported and the menu still starts; a database that
/// cannot be opened is returned as an error before any menu is shown.
/// Returns the output stream once the user leaves.
pub fn start<R: BufRead, W: Write>(config: CatalogConfig, input: R, mut out: W) -> Result<W> {
    if !config.database_path.exists() {
        tracing::info!("Creating catalog at {}", config.database_path.display());
        config.prepare_database_dir()?;
    }

    let store = MovieStore::open(&config.database_path)?;
    if let Err(err) = store.ensure_schema() {
        tracing::debug!("Schema check failed: {}", err);
        ui::error(&mut out, &describe(&err))?;
    }
    drop(store);

    let mut controller = Controller::new(config, input, out);
    controller.run()?;
    Ok(controller.into_output())
}

/// Menu loop over an input and output stream
pub struct Controller<R, W> {
    config: CatalogConfig,
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Controller<R, W> {
    pub fn new(config: CatalogConfig, input: R, out: W) -> Self {
        Self { config, input, out }
    }

    /// Give back the output stream (used to inspect a scripted session)
    pub fn into_output(self) -> W {
        self.out
    }

    /// Run until the user picks Exit or input ends
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.show_menu()?;
            let Some(line) = self.read_line()? else {
                tracing::debug!("Input closed, leaving menu");
                return Ok(());
            };

            let Some(choice) = MenuChoice::parse(&line) else {
                ui::warn(&mut self.out, "Please enter a valid option (1-7)")?;
                continue;
            };

            if choice == MenuChoice::Exit {
                ui::info(&mut self.out, "Goodbye.")?;
                return Ok(());
            }

            if let Err(err) = self.dispatch(choice) {
                tracing::debug!("{:?} failed: {}", choice, err);
                ui::error(&mut self.out, &describe(&err))?;
            }
        }
    }

    fn show_menu(&mut self) -> Result<()> {
        ui::header(&mut self.out, "Movie Catalog")?;
        ui::rule(&mut self.out)?;
        for choice in MenuChoice::all() {
            ui::menu_item(&mut self.out, choice.key(), choice.label())?;
        }
        ui::rule(&mut self.out)?;
        ui::prompt(&mut self.out, "Choose an option (1-7): ")?;
        Ok(())
    }

    fn dispatch(&mut self, choice: MenuChoice) -> Result<()> {
        match choice {
            MenuChoice::Import => self.import(),
            MenuChoice::Search => self.search(),
            MenuChoice::Add => self.add(),
            MenuChoice::Modify => self.modify(),
            MenuChoice::Delete => self.delete(),
            MenuChoice::Export => self.export(),
            MenuChoice::Exit => Ok(()),
        }
    }

    // ========== Menu Branches ==========

    fn import(&mut self) -> Result<()> {
        let imported = catalog::bulk_import(&self.config.database_path, &self.config.import_path)?;
        ui::success(
            &mut self.out,
            &format!("Imported {} movies from {}", imported, self.config.import_path.display()),
        )?;
        Ok(())
    }

    fn search(&mut self) -> Result<()> {
        let filter = self.ask_filter("Search all movies? (y/n): ", "Movie title: ")?;
        let movies = catalog::query(&self.config.database_path, &filter)?;

        if movies.is_empty() {
            ui::info(&mut self.out, "No movies found")?;
        } else {
            writeln!(self.out, "{}", ui::movie_table(&movies))?;
        }
        Ok(())
    }

    fn add(&mut self) -> Result<()> {
        let title = self.prompt("Title: ")?;
        let director = self.prompt("Director: ")?;
        let genre = self.prompt("Genre: ")?;
        let year = self.prompt("Year: ")?;
        let rating = self.prompt("Rating (1.0 - 10.0): ")?;

        let movie = NewMovie::from_input(&title, &director, &genre, &year, &rating)?;
        let id = catalog::insert(&self.config.database_path, &movie)?;
        ui::success(&mut self.out, &format!("Movie added (id {})", id))?;
        Ok(())
    }

    fn modify(&mut self) -> Result<()> {
        let title = self.prompt("Title of the movie to modify: ")?;

        // One connection for lookup, edit and write
        let store = MovieStore::open(&self.config.database_path)?;
        let current = store
            .find_first(&Filter::TitleContains(title.clone()))?
            .ok_or_else(|| Error::NotFound(format!("title containing {:?}", title)))?;
        writeln!(self.out, "{}", ui::movie_table(std::slice::from_ref(&current)))?;

        let keep = "(Enter to keep)";
        let title = self.prompt(&format!("New title {}: ", keep))?;
        let director = self.prompt(&format!("New director {}: ", keep))?;
        let genre = self.prompt(&format!("New genre {}: ", keep))?;
        let year = self.prompt(&format!("New year {}: ", keep))?;
        let rating = self.prompt(&format!("New rating (1.0 - 10.0) {}: ", keep))?;

        let changes = MovieChanges::from_input(&title, &director, &genre, &year, &rating)?;
        store.update(current.id, &changes)?;
        ui::success(&mut self.out, "Movie updated")?;
        Ok(())
    }

    fn delete(&mut self) -> Result<()> {
        if self.confirm("Delete all movies? (y/n): ")? {
            let removed = catalog::delete_all(&self.config.database_path)?;
            ui::success(&mut self.out, &format!("Deleted {} movies", removed))?;
            return Ok(());
        }

        let title = self.prompt("Title of the movie to delete: ")?;
        let store = MovieStore::open(&self.config.database_path)?;
        let target = store
            .find_first(&Filter::TitleContains(title.clone()))?
            .ok_or_else(|| Error::NotFound(format!("title containing {:?}", title)))?;
        writeln!(self.out, "{}", ui::movie_table(std::slice::from_ref(&target)))?;

        if self.confirm("Delete this movie? (y/n): ")? {
            store.delete(target.id)?;
            ui::success(&mut self.out, "Movie deleted")?;
        } else {
            ui::info(&mut self.out, "Deletion cancelled")?;
        }
        Ok(())
    }

    fn export(&mut self) -> Result<()> {
        let filter = self.ask_filter("Export all movies? (y/n): ", "Movie title to export: ")?;
        let exported = catalog::bulk_export(
            &self.config.database_path,
            &self.config.export_path,
            &filter,
        )?;
        ui::success(
            &mut self.out,
            &format!("Exported {} movies to {}", exported, self.config.export_path.display()),
        )?;
        Ok(())
    }

    // ========== Input Helpers ==========

    /// Read one line without its line terminator; `None` at end of input
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Ask for a line of text; end of input reads as an empty answer
    fn prompt(&mut self, label: &str) -> Result<String> {
        ui::prompt(&mut self.out, label)?;
        Ok(self.read_line()?.unwrap_or_default())
    }

    /// Ask a yes/no question; only `y` (any case) counts as yes
    fn confirm(&mut self, label: &str) -> Result<bool> {
        let answer = self.prompt(label)?;
        Ok(answer.trim().eq_ignore_ascii_case("y"))
    }

    fn ask_filter(&mut self, all_label: &str, title_label: &str) -> Result<Filter> {
        if self.confirm(all_label)? {
            return Ok(Filter::All);
        }
        Ok(Filter::TitleContains(self.prompt(title_label)?))
    }
}

/// Short message shown to the user for a failed operation
pub fn describe(err: &Error) -> String {
    match err {
        Error::DocumentNotFound(path) => format!("Movie data file not found: {}", path),
        Error::DocumentMalformed(reason) => format!("Could not read movie data file: {}", reason),
        Error::Format { field, input } => format!("Invalid {}: {:?} is not a number", field, input),
        Error::ConstraintViolation(reason) => {
            format!(
                "Rejected by the database ({}); rating must be between {:.1} and {:.1}",
                reason, MIN_RATING, MAX_RATING
            )
        }
        Error::NotFound(what) => format!("No matching movie: {}", what),
        Error::Schema(reason) => format!("Database schema problem: {}", reason),
        other => format!("Database operation failed: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_menu_choice() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::Import));
        assert_eq!(MenuChoice::parse(" 7\n"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("8"), None);
        assert_eq!(MenuChoice::parse(""), None);
        assert_eq!(MenuChoice::parse("search"), None);
    }

    #[test]
    fn test_describe_format_error() {
        let err = Error::Format { field: "year", input: "abc".to_string() };
        assert_eq!(describe(&err), "Invalid year: \"abc\" is not a number");
    }

    fn config_in(dir: &tempfile::TempDir) -> CatalogConfig {
        CatalogConfig {
            database_path: dir.path().join("movies.db"),
            import_path: dir.path().join("movies.json"),
            export_path: dir.path().join("exported.json"),
        }
    }

    #[test]
    fn test_end_of_input_leaves_menu() {
        let dir = tempfile::tempdir().unwrap();
        let input = std::io::Cursor::new("3
X
");
        let mut controller = Controller::new(config_in(&dir), input, Vec::new());
        controller.run().unwrap();

        let output = String::from_utf8(controller.into_output()).unwrap();
        assert_eq!(output.matches("Choose an option").count(), 2);
        assert!(output.contains("Invalid year"));
        assert!(!output.contains("Goodbye."));
    }

    #[test]
    fn test_start_creates_schema_on_first_run() {
        let dir = tempfile::tempdir().unwrap();
        let config = CatalogConfig {
            database_path: dir.path().join("data").join("movies.db"),
            ..config_in(&dir)
        };

        let out = start(config.clone(), std::io::Cursor::new("7
"), Vec::new()).unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Goodbye."));
        assert!(!output.contains("schema problem"));
        assert_eq!(catalog::count(&config.database_path).unwrap(), 0);
    }

    #[test]
    fn test_start_reports_foreign_table_and_keeps_going() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        let conn = rusqlite::Connection::open(&config.database_path).unwrap();
        conn.execute("CREATE TABLE movies (id INTEGER PRIMARY KEY, name TEXT)", []).unwrap();
        drop(conn);

        let out = start(config, std::io::Cursor::new("7
"), Vec::new()).unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Database schema problem"));
        assert!(output.contains("Choose an option"));
        assert!(output.contains("Goodbye."));
    }

    #[test]
    fn test_start_fails_on_non_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        std::fs::write(&config.database_path, "plain text, not a catalog database").unwrap();

        let err = start(config, std::io::Cursor::new("7
"), Vec::new()).unwrap_err();
        assert!(matches!(err, Error::StorageUnavailable { .. }));
    }

    #[test]
    fn test_unknown_option_reprompts() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);

        let input = std::io::Cursor::new("9\nhello\n7\n");
        let mut controller = Controller::new(config, input, Vec::new());
        controller.run().unwrap();

        let output = String::from_utf8(controller.into_output()).unwrap();
        assert_eq!(output.matches("Please enter a valid option").count(), 2);
        assert_eq!(output.matches("Choose an option").count(), 3);
        assert!(output.contains("Goodbye."));
    }
}
