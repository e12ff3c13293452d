//! Endpoint descriptors for the catalog listings
//!
//! Listings switch from the `/top/anime` endpoints to the `/anime` search
//! endpoint when a genre filter is present; only search accepts `genres`.

use serde::{Deserialize, Serialize};

/// Search results per page
pub const SEARCH_PAGE_SIZE: u32 = 12;
/// Items per page for the completed listing
pub const COMPLETED_PAGE_SIZE: u32 = 24;

/// Catalog listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Listing {
    /// Top rated by score, all time
    Top,
    /// All-time popularity by member count
    Popular,
    /// Currently airing TV, by popularity
    Trending,
    /// Currently airing, by score
    TopAiring,
    /// Recently finished airing
    LatestCompleted,
    /// Not yet aired
    TopUpcoming,
    /// Movies by score
    Movies,
}

impl Listing {
    pub const ALL: [Listing; 7] = [
        Listing::Top,
        Listing::Popular,
        Listing::Trending,
        Listing::TopAiring,
        Listing::LatestCompleted,
        Listing::TopUpcoming,
        Listing::Movies,
    ];

    /// Endpoint for one page of this listing
    pub fn endpoint(&self, page: u32, genres: &[u32]) -> String {
        if genres.is_empty() {
            if let Some(query) = self.top_query(page) {
                return format!("/top/anime?{}", query);
            }
        }

        let limit = match self {
            Listing::LatestCompleted => format!("&limit={}", COMPLETED_PAGE_SIZE),
            _ => String::new(),
        };
        format!(
            "/anime?{}&page={}{}{}",
            self.search_filter(),
            page,
            limit,
            genre_query(genres)
        )
    }

    /// Query for the `/top/anime` endpoint; `None` when the listing has no top variant
    fn top_query(&self, page: u32) -> Option<String> {
        let query = match self {
            Listing::Top => format!("page={}", page),
            Listing::Popular => format!("filter=bypopularity&page={}", page),
            Listing::Trending => format!(
                "filter=airing&type=tv&order_by=popularity&sort=asc&page={}",
                page
            ),
            Listing::TopAiring => format!("filter=airing&order_by=score&sort=desc&page={}", page),
            Listing::TopUpcoming => format!("filter=upcoming&page={}", page),
            Listing::Movies => format!("type=movie&page={}", page),
            Listing::LatestCompleted => return None,
        };
        Some(query)
    }

    fn search_filter(&self) -> &'static str {
        match self {
            Listing::Top => "order_by=score&sort=desc",
            Listing::Popular => "order_by=members&sort=desc",
            Listing::Trending => "status=airing&order_by=members&sort=desc",
            Listing::TopAiring => "status=airing&order_by=score&sort=desc",
            Listing::LatestCompleted => "status=complete&order_by=end_date&sort=desc&min_score=6.5",
            Listing::TopUpcoming => "status=upcoming&order_by=members&sort=desc",
            Listing::Movies => "type=movie&order_by=score&sort=desc",
        }
    }
}

impl std::fmt::Display for Listing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Listing::Top => "Most Favorite",
            Listing::Popular => "Most Popular",
            Listing::Trending => "Trending",
            Listing::TopAiring => "Top Airing",
            Listing::LatestCompleted => "Latest Completed",
            Listing::TopUpcoming => "Top Upcoming",
            Listing::Movies => "Movies",
        };
        f.write_str(name)
    }
}

/// `&genres=1,2,3`, or empty when no genre is selected
pub fn genre_query(genres: &[u32]) -> String {
    if genres.is_empty() {
        return String::new();
    }
    let ids: Vec<String> = genres.iter().map(|id| id.to_string()).collect();
    format!("&genres={}", ids.join(","))
}

/// Daily release schedule for a lowercase weekday name
pub fn schedule_endpoint(day: &str, page: u32) -> String {
    format!("/schedules?filter={}&page={}", urlencoding::encode(day), page)
}

/// Title search; `page` is omitted for single-result lookups
pub fn search_endpoint(query: &str, limit: u32, page: Option<u32>) -> String {
    let mut endpoint = format!("/anime?q={}&limit={}", urlencoding::encode(query), limit);
    if let Some(page) = page {
        endpoint.push_str(&format!("&page={}", page));
    }
    endpoint
}

pub fn recommendations_endpoint(mal_id: u64) -> String {
    format!("/anime/{}/recommendations", mal_id)
}
