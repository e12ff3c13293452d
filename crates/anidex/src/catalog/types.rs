//! Catalog record types

use serde::{Deserialize, Serialize};

/// Score shown for an anime: a number, or a placeholder such as `N/A`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rating {
    Score(f64),
    Label(String),
}

impl Rating {
    pub fn not_available() -> Self {
        Self::Label("N/A".to_string())
    }

    pub fn score(&self) -> Option<f64> {
        match self {
            Self::Score(score) => Some(*score),
            Self::Label(_) => None,
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Score(score) => write!(f, "{:.2}", score),
            Self::Label(label) => f.write_str(label),
        }
    }
}

/// Anime record mapped from a catalog payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Anime {
    pub id: String,
    pub mal_id: u64,
    pub title: String,
    pub rating: Rating,
    pub genres: Vec<String>,
    pub description: String,
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episodes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<u64>,
    /// e.g. "23:00" (JST)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub broadcast_time: Option<String>,
    /// e.g. "Oct 4, 2024 to ?"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aired_string: Option<String>,
    /// ISO-8601 start date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aired_from: Option<String>,
}

/// Catalog genre filter option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Genre {
    pub id: u32,
    pub name: &'static str,
}

pub const GENRE_OPTIONS: [Genre; 17] = [
    Genre { id: 1, name: "Action" },
    Genre { id: 2, name: "Adventure" },
    Genre { id: 4, name: "Comedy" },
    Genre { id: 8, name: "Drama" },
    Genre { id: 10, name: "Fantasy" },
    Genre { id: 14, name: "Horror" },
    Genre { id: 7, name: "Mystery" },
    Genre { id: 22, name: "Romance" },
    Genre { id: 24, name: "Sci-Fi" },
    Genre { id: 36, name: "Slice of Life" },
    Genre { id: 30, name: "Sports" },
    Genre { id: 37, name: "Supernatural" },
    Genre { id: 18, name: "Mecha" },
    Genre { id: 40, name: "Psychological" },
    Genre { id: 27, name: "Shounen" },
    Genre { id: 42, name: "Seinen" },
    Genre { id: 25, name: "Shoujo" },
];

/// Case-insensitive lookup; spaces, dashes and underscores are interchangeable
pub fn genre_by_name(name: &str) -> Option<Genre> {
    let wanted = normalize_genre(name);
    GENRE_OPTIONS
        .iter()
        .find(|genre| normalize_genre(genre.name) == wanted)
        .copied()
}

fn normalize_genre(name: &str) -> String {
    name.trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}
