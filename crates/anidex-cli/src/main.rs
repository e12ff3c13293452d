//! anidex command-line front-end

mod cli;
mod logging;
mod output;

use anidex::catalog::{current_jst_day, Anime, CatalogClient, Listing, GENRE_OPTIONS, WEEKDAYS};
use anidex::config::AnidexConfig;
use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{debug, info};

use cli::{Cli, Command, ListingArgs};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = AnidexConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    debug!(?config, "configuration loaded");

    run(cli, &config).await
}

async fn run(cli: Cli, config: &AnidexConfig) -> Result<()> {
    if let Command::Genres = cli.command {
        return print_genres(cli.json);
    }

    let client = CatalogClient::from_config(config).context("Failed to create HTTP client")?;

    let anime = match &cli.command {
        Command::Top(args) => fetch_listing(&client, Listing::Top, args).await?,
        Command::Popular(args) => fetch_listing(&client, Listing::Popular, args).await?,
        Command::Trending(args) => fetch_listing(&client, Listing::Trending, args).await?,
        Command::Airing(args) => fetch_listing(&client, Listing::TopAiring, args).await?,
        Command::Completed(args) => fetch_listing(&client, Listing::LatestCompleted, args).await?,
        Command::Upcoming(args) => fetch_listing(&client, Listing::TopUpcoming, args).await?,
        Command::Movies(args) => fetch_listing(&client, Listing::Movies, args).await?,
        Command::Schedule { day, page } => {
            let day = resolve_day(day.as_deref())?;
            info!(%day, "fetching schedule");
            client
                .schedule(&day, *page)
                .await
                .with_context(|| format!("Failed to fetch schedule for {}", day))?
        }
        Command::Search {
            query, first: true, ..
        } => {
            let found = client
                .search(query)
                .await
                .with_context(|| format!("Search for '{}' failed", query))?;
            let Some(anime) = found else {
                bail!("no anime matches '{}'", query);
            };
            if cli.json {
                return print_json(&anime);
            }
            print!("{}", output::anime_detail(&anime));
            return Ok(());
        }
        Command::Search { query, page, .. } => client
            .search_list(query, *page)
            .await
            .with_context(|| format!("Search for '{}' failed", query))?,
        Command::Recommend { mal_id } => client
            .recommendations(*mal_id)
            .await
            .with_context(|| format!("Failed to fetch recommendations for {}", mal_id))?,
        Command::Genres => Vec::new(),
    };

    print_list(&anime, cli.json)
}

async fn fetch_listing(
    client: &CatalogClient,
    listing: Listing,
    args: &ListingArgs,
) -> Result<Vec<Anime>> {
    info!(%listing, page = args.page, "fetching listing");
    client
        .listing(listing, args.page, &args.genres)
        .await
        .with_context(|| format!("Failed to fetch {}", listing))
}

/// Lowercase weekday, defaulting to today in JST
fn resolve_day(day: Option<&str>) -> Result<String> {
    let Some(day) = day else {
        return Ok(current_jst_day().to_string());
    };
    let day = day.to_lowercase();
    if !WEEKDAYS.contains(&day.as_str()) {
        bail!("unknown weekday '{}'", day);
    }
    Ok(day)
}

fn print_list(anime: &[Anime], json: bool) -> Result<()> {
    if json {
        return print_json(&anime);
    }
    print!("{}", output::anime_table(anime));
    Ok(())
}

fn print_genres(json: bool) -> Result<()> {
    if json {
        return print_json(&GENRE_OPTIONS);
    }
    print!("{}", output::genre_table(&GENRE_OPTIONS));
    Ok(())
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
