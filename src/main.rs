//! movie-catalog CLI - interactive menu over a local movie database

use clap::Parser;
use movie_catalog::config::{CatalogConfig, CONFIG_FILE};
use movie_catalog::controller;
use std::path::Path;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "movie-catalog")]
#[command(version)]
#[command(about = "Interactive movie catalog backed by SQLite")]
#[command(long_about = r#"
movie-catalog keeps a list of movies in a local SQLite file and offers a
numbered menu to:
  • Import movies from movies.json
  • Search, add, modify and delete movies
  • Export movies to exported.json

File locations can be changed in movie-catalog.toml:
  database_path = "movies.db"
  import_path = "movies.json"
  export_path = "exported.json"
"#)]
struct Cli {}

fn main() -> anyhow::Result<()> {
    let _cli = Cli::parse();

    // Initialize logging; stderr keeps the menu on stdout readable
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = CatalogConfig::load(Path::new(CONFIG_FILE))?;

    // Failing to open the database is the one fatal error
    let stdin = std::io::stdin();
    controller::start(config, stdin.lock(), std::io::stdout())?;
    Ok(())
}
