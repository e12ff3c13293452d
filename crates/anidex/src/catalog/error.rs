use thiserror::Error;

use crate::fetch_queue::FetchError;

/// Catalog operation errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// The request itself failed
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The payload parsed as JSON but not in the expected shape
    #[error("Unexpected payload shape: {0}")]
    UnexpectedShape(String),
}

impl CatalogError {
    pub fn unexpected_shape(reason: impl Into<String>) -> Self {
        Self::UnexpectedShape(reason.into())
    }
}
