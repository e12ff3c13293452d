//! Anidex - anime catalog client
//!
//! This crate provides a rate-limited request queue for the anime catalog
//! API and a typed catalog client built on top of it.

pub mod catalog;
pub mod config;
pub mod fetch_queue;

pub use catalog::{Anime, CatalogClient, CatalogError, Listing};
pub use config::{AnidexConfig, ConfigError};
pub use fetch_queue::{FetchError, FetchHandle, RateLimitedFetchQueue};
