//! Map raw catalog payloads to [`Anime`] records
//!
//! Empty strings, zero scores and nulls are all treated as "absent" and
//! replaced by the same fallbacks.

use serde_json::Value;

use super::error::CatalogError;
use super::types::{Anime, Rating};

const NO_DESCRIPTION: &str = "No description available.";
const RECOMMENDED_DESCRIPTION: &str = "Recommended based on your selection.";

/// Borrow the `data` array of a listing payload
pub fn data_items(payload: &Value) -> Result<&[Value], CatalogError> {
    payload
        .get("data")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .ok_or_else(|| CatalogError::unexpected_shape("missing 'data' array"))
}

/// Map a single catalog anime item
pub fn anime_from_item(item: &Value) -> Result<Anime, CatalogError> {
    let mal_id = mal_id(item)?;

    let title = text(item.get("title_english"))
        .or_else(|| text(item.get("title")))
        .unwrap_or_default();

    let rating = item
        .get("score")
        .and_then(Value::as_f64)
        .filter(|score| *score != 0.0)
        .map_or_else(Rating::not_available, Rating::Score);

    let genres = item
        .get("genres")
        .and_then(Value::as_array)
        .map(|genres| {
            genres
                .iter()
                .filter_map(|genre| text(genre.get("name")))
                .collect()
        })
        .unwrap_or_default();

    Ok(Anime {
        id: mal_id.to_string(),
        mal_id,
        title,
        rating,
        genres,
        description: text(item.get("synopsis")).unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        image_url: image_url(item),
        year: small_number(item.get("year")),
        episodes: small_number(item.get("episodes")),
        rank: small_number(item.get("rank")),
        status: text(item.get("status")),
        members: item.get("members").and_then(Value::as_u64),
        broadcast_time: text(item.pointer("/broadcast/time")),
        aired_string: text(item.pointer("/aired/string")),
        aired_from: text(item.pointer("/aired/from")),
    })
}

/// Map a recommendation item (`{ "entry": { ... } }`)
pub fn anime_from_recommendation(item: &Value) -> Result<Anime, CatalogError> {
    let entry = item
        .get("entry")
        .ok_or_else(|| CatalogError::unexpected_shape("recommendation without 'entry'"))?;
    let mal_id = mal_id(entry)?;

    Ok(Anime {
        id: mal_id.to_string(),
        mal_id,
        title: text(entry.get("title")).unwrap_or_default(),
        rating: Rating::Label("?".to_string()),
        genres: Vec::new(),
        description: RECOMMENDED_DESCRIPTION.to_string(),
        image_url: image_url(entry),
        year: None,
        episodes: None,
        rank: None,
        status: Some("Unknown".to_string()),
        members: None,
        broadcast_time: None,
        aired_string: None,
        aired_from: None,
    })
}

fn mal_id(item: &Value) -> Result<u64, CatalogError> {
    item.get("mal_id")
        .and_then(Value::as_u64)
        .ok_or_else(|| CatalogError::unexpected_shape("item without integer 'mal_id'"))
}

fn image_url(item: &Value) -> Option<String> {
    text(item.pointer("/images/jpg/large_image_url"))
        .or_else(|| text(item.pointer("/images/jpg/image_url")))
}

fn text(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn small_number(value: Option<&Value>) -> Option<u32> {
    value
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
}
