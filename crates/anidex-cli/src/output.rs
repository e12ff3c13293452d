//! Output rendering

use anidex::catalog::{Anime, Genre};
use std::fmt::Write;

const TITLE_WIDTH: usize = 48;

/// Plain-text table, one anime per line
pub fn anime_table(anime: &[Anime]) -> String {
    if anime.is_empty() {
        return "No results. Try another page or filter.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>7}  {:<width$}  {:>6}  {:>4}  {:>5}  {}",
        "ID",
        "TITLE",
        "SCORE",
        "EPS",
        "YEAR",
        "GENRES",
        width = TITLE_WIDTH
    );
    for item in anime {
        let _ = writeln!(
            out,
            "{:>7}  {:<width$}  {:>6}  {:>4}  {:>5}  {}",
            item.mal_id,
            truncate(&item.title, TITLE_WIDTH),
            item.rating.to_string(),
            optional(item.episodes),
            optional(item.year),
            item.genres.join(", "),
            width = TITLE_WIDTH
        );
    }
    out
}

/// Detailed view of a single anime
pub fn anime_detail(anime: &Anime) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} (#{})", anime.title, anime.mal_id);
    let _ = writeln!(out, "Score:    {}", anime.rating);
    if let Some(status) = &anime.status {
        let _ = writeln!(out, "Status:   {}", status);
    }
    if let Some(aired) = &anime.aired_string {
        let _ = writeln!(out, "Aired:    {}", aired);
    }
    if let Some(time) = &anime.broadcast_time {
        let _ = writeln!(out, "Airs at:  {} (JST)", time);
    }
    if !anime.genres.is_empty() {
        let _ = writeln!(out, "Genres:   {}", anime.genres.join(", "));
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", anime.description);
    out
}

pub fn genre_table(genres: &[Genre]) -> String {
    let mut out = String::new();
    for genre in genres {
        let _ = writeln!(out, "{:>3}  {}", genre.id, genre.name);
    }
    out
}

fn optional(value: Option<u32>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
