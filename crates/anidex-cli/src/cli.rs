//! Command-line arguments

use anidex::catalog::genre_by_name;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "anidex")]
#[command(about = "Browse the anime catalog from the terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file path (TOML)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Print raw JSON instead of a table
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Top rated by score
    Top(ListingArgs),
    /// Most popular by members
    Popular(ListingArgs),
    /// Currently airing, by popularity
    Trending(ListingArgs),
    /// Currently airing, by score
    Airing(ListingArgs),
    /// Recently finished airing
    Completed(ListingArgs),
    /// Not yet aired
    Upcoming(ListingArgs),
    /// Movies by score
    Movies(ListingArgs),
    /// Daily releases
    Schedule {
        /// Weekday (defaults to today in JST)
        #[arg(long, short = 'd')]
        day: Option<String>,

        #[arg(long, short = 'p', default_value_t = 1)]
        page: u32,
    },
    /// Search by title
    Search {
        query: String,

        #[arg(long, short = 'p', default_value_t = 1)]
        page: u32,

        /// Only show the best match
        #[arg(long)]
        first: bool,
    },
    /// Titles recommended alongside an anime
    Recommend {
        /// Catalog id of the anime
        mal_id: u64,
    },
    /// List genre filters
    Genres,
}

#[derive(Debug, Args)]
pub struct ListingArgs {
    #[arg(long, short = 'p', default_value_t = 1)]
    pub page: u32,

    /// Genre filter by name or id (repeatable)
    #[arg(long = "genre", short = 'g', value_parser = parse_genre)]
    pub genres: Vec<u32>,
}

fn parse_genre(value: &str) -> Result<u32, String> {
    if let Ok(id) = value.parse::<u32>() {
        return Ok(id);
    }
    genre_by_name(value)
        .map(|genre| genre.id)
        .ok_or_else(|| format!("unknown genre '{}' (see `anidex genres`)", value))
}
