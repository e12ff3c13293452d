//! Catalog client
//!
//! Typed operations over the anime catalog API. Endpoint strings are
//! composed in [`endpoints`], sent through the shared
//! [`RateLimitedFetchQueue`](crate::fetch_queue::RateLimitedFetchQueue),
//! and the raw payloads are mapped to [`Anime`] records.

mod client;
mod endpoints;
mod error;
mod mapping;
mod schedule;
mod types;

pub use client::CatalogClient;
pub use endpoints::{
    genre_query, recommendations_endpoint, schedule_endpoint, search_endpoint, Listing,
};
pub use error::CatalogError;
pub use mapping::{anime_from_item, anime_from_recommendation, data_items};
pub use schedule::{current_jst_day, jst_day_for, WEEKDAYS};
pub use types::{genre_by_name, Anime, Genre, Rating, GENRE_OPTIONS};
