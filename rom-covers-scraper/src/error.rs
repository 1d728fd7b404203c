/// Errors from a catalog lookup.
///
/// `NotFound` (zero candidates) is distinct from transport/decode failures,
/// though both end up recorded the same way on the item.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed catalog response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("game not found in catalog")]
    NotFound,

    #[error("catalog error: {0}")]
    Api(String),
}

/// Errors fetching the remote cover image itself.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Other(String),
}

/// A per-item pipeline error. Recorded on the item, surfaced only in the
/// final report; never interrupts sibling items.
#[derive(Debug, thiserror::Error)]
pub enum ItemError {
    #[error("{0}")]
    Lookup(#[from] LookupError),

    #[error("could not create output file: {0}")]
    OutputCreate(#[source] std::io::Error),

    #[error("cover fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("cover transfer failed: {0}")]
    Copy(#[source] std::io::Error),

    #[error("cancelled before processing")]
    Cancelled,

    #[error("timed out after {0}s")]
    Timeout(u64),
}

impl ItemError {
    /// Whether this is the not-found lookup outcome (vs. a transport error).
    pub fn is_not_found(&self) -> bool {
        matches!(self, ItemError::Lookup(LookupError::NotFound))
    }
}
