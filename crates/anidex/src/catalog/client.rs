//! Catalog client
//!
//! Every call goes through the shared fetch queue, so concurrent callers
//! never exceed the catalog's request budget.

use serde_json::Value;
use std::sync::Arc;

use super::endpoints::{
    recommendations_endpoint, schedule_endpoint, search_endpoint, Listing, SEARCH_PAGE_SIZE,
};
use super::error::CatalogError;
use super::mapping::{anime_from_item, anime_from_recommendation, data_items};
use super::types::Anime;
use crate::config::AnidexConfig;
use crate::fetch_queue::{RateLimitedFetchQueue, ReqwestTransport, TransportFailure};

/// Recommendations returned per title
pub const MAX_RECOMMENDATIONS: usize = 10;

/// Typed client for the anime catalog API
#[derive(Debug, Clone)]
pub struct CatalogClient {
    queue: RateLimitedFetchQueue,
}

impl CatalogClient {
    /// Create a client over an existing queue
    pub fn new(queue: RateLimitedFetchQueue) -> Self {
        Self { queue }
    }

    /// Create a client talking HTTP to the configured catalog
    pub fn from_config(config: &AnidexConfig) -> Result<Self, TransportFailure> {
        let transport = ReqwestTransport::new(
            config.catalog.base_url.clone(),
            &config.catalog.user_agent,
            config.queue.connect_timeout(),
        )?;
        let queue = RateLimitedFetchQueue::new(config.queue.clone(), Arc::new(transport));
        Ok(Self::new(queue))
    }

    /// The underlying queue
    pub fn queue(&self) -> &RateLimitedFetchQueue {
        &self.queue
    }

    /// One page of a listing, optionally filtered by genre ids
    pub async fn listing(
        &self,
        listing: Listing,
        page: u32,
        genres: &[u32],
    ) -> Result<Vec<Anime>, CatalogError> {
        self.fetch_list(listing.endpoint(page, genres)).await
    }

    pub async fn top_anime(&self, page: u32, genres: &[u32]) -> Result<Vec<Anime>, CatalogError> {
        self.listing(Listing::Top, page, genres).await
    }

    pub async fn popular_anime(
        &self,
        page: u32,
        genres: &[u32],
    ) -> Result<Vec<Anime>, CatalogError> {
        self.listing(Listing::Popular, page, genres).await
    }

    pub async fn trending_anime(
        &self,
        page: u32,
        genres: &[u32],
    ) -> Result<Vec<Anime>, CatalogError> {
        self.listing(Listing::Trending, page, genres).await
    }

    pub async fn top_airing(&self, page: u32, genres: &[u32]) -> Result<Vec<Anime>, CatalogError> {
        self.listing(Listing::TopAiring, page, genres).await
    }

    pub async fn latest_completed(
        &self,
        page: u32,
        genres: &[u32],
    ) -> Result<Vec<Anime>, CatalogError> {
        self.listing(Listing::LatestCompleted, page, genres).await
    }

    pub async fn top_upcoming(
        &self,
        page: u32,
        genres: &[u32],
    ) -> Result<Vec<Anime>, CatalogError> {
        self.listing(Listing::TopUpcoming, page, genres).await
    }

    pub async fn movies(&self, page: u32, genres: &[u32]) -> Result<Vec<Anime>, CatalogError> {
        self.listing(Listing::Movies, page, genres).await
    }

    /// Daily releases for a lowercase weekday name (see [`current_jst_day`](super::current_jst_day))
    pub async fn schedule(&self, day: &str, page: u32) -> Result<Vec<Anime>, CatalogError> {
        self.fetch_list(schedule_endpoint(day, page)).await
    }

    /// Best single match for a title query
    pub async fn search(&self, query: &str) -> Result<Option<Anime>, CatalogError> {
        let payload = self.queue.fetch(search_endpoint(query, 1, None)).await?;
        // a payload without `data` counts as no match
        payload
            .get("data")
            .and_then(Value::as_array)
            .and_then(|items| items.first())
            .map(anime_from_item)
            .transpose()
    }

    /// One page of title search results
    pub async fn search_list(&self, query: &str, page: u32) -> Result<Vec<Anime>, CatalogError> {
        self.fetch_list(search_endpoint(query, SEARCH_PAGE_SIZE, Some(page)))
            .await
    }

    /// Titles recommended alongside `mal_id`, at most [`MAX_RECOMMENDATIONS`]
    pub async fn recommendations(&self, mal_id: u64) -> Result<Vec<Anime>, CatalogError> {
        let payload = self.queue.fetch(recommendations_endpoint(mal_id)).await?;
        data_items(&payload)?
            .iter()
            .take(MAX_RECOMMENDATIONS)
            .map(anime_from_recommendation)
            .collect()
    }

    async fn fetch_list(&self, endpoint: String) -> Result<Vec<Anime>, CatalogError> {
        let payload = self.queue.fetch(endpoint).await?;
        data_items(&payload)?.iter().map(anime_from_item).collect()
    }
}
