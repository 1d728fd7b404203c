use async_trait::async_trait;
use tokio::time::Duration;

use rom_covers_core::Platform;

use crate::error::{FetchError, LookupError};
use crate::types::SearchResponse;

const BASE_URL: &str = "http://retrogaming.cloud/api/v1";

/// Default per-request deadline. A hung catalog or CDN call fails the item
/// instead of stalling the whole batch.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The remote collaborators the pipeline talks to: a catalog that resolves
/// (platform, name) to a cover-art URL, and whatever host serves the image.
///
/// Behavioral contract only — tests substitute fakes.
#[async_trait]
pub trait CoverSource: Send + Sync {
    /// Resolve a game name to its cover-art URL.
    ///
    /// Zero candidates is `LookupError::NotFound`; transport and decode
    /// failures are their own variants.
    async fn lookup_cover(&self, platform: Platform, name: &str) -> Result<String, LookupError>;

    /// Fetch the raw bytes of a cover image. No format validation.
    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// HTTP client for the retrogaming.cloud catalog API.
pub struct RetroCatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl RetroCatalogClient {
    /// Create a client with the given per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: BASE_URL.to_string(),
        })
    }

    /// Query the game search endpoint for a platform and free-text name.
    async fn search_game(
        &self,
        platform: Platform,
        name: &str,
    ) -> Result<SearchResponse, LookupError> {
        let url = format!(
            "{}/platform/{}/game",
            self.base_url,
            platform.catalog_name()
        );

        let resp = self
            .http
            .get(&url)
            .query(&[("name", name)])
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(LookupError::Api(format!(
                "search returned HTTP {}: {}",
                status.as_u16(),
                truncate_for_log(&text, 200)
            )));
        }

        let search: SearchResponse = serde_json::from_str(&text)?;
        Ok(search)
    }
}

/// Cap `text` at `max` bytes without splitting a UTF-8 character.
fn truncate_for_log(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[async_trait]
impl CoverSource for RetroCatalogClient {
    async fn lookup_cover(&self, platform: Platform, name: &str) -> Result<String, LookupError> {
        log::debug!("looking up '{}' on {}", name, platform.catalog_name());
        let search = self.search_game(platform, name).await?;
        search
            .best_cover_url()
            .map(str::to_string)
            .ok_or(LookupError::NotFound)
    }

    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let resp = self.http.get(url).send().await?.error_for_status()?;
        let bytes = resp.bytes().await?;
        Ok(bytes.to_vec())
    }
}
