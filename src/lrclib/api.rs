use std::time::Duration;

use reqwest::Client;

use crate::constants::{timing, urls};
use crate::error::{Error, Result};
use crate::lrclib::types::LrclibTrack;

/// Client for the LRCLIB lyrics API
#[derive(Clone)]
pub struct LrclibClient {
    search_url: String,
    client: Client,
}

impl Default for LrclibClient {
    fn default() -> Self {
        Self::new(urls::LRCLIB_SEARCH)
    }
}

impl LrclibClient {
    /// Create a client against the given search endpoint
    pub fn new(search_url: impl Into<String>) -> Self {
        Self {
            search_url: search_url.into(),
            client: http_client(timing::LYRICS_TIMEOUT),
        }
    }

    /// Search LRCLIB for `query` (`"<artist> <title>"`)
    pub async fn search(&self, query: &str) -> Result<Vec<LrclibTrack>> {
        let resp = self.client
            .get(&self.search_url)
            .query(&[("q", query)])
            .send()
            .await
            .map_err(|e| Error::Network(format!("Search for {query:?} failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::api_status(
                format!("Search for {query:?} returned {status}"),
                status.as_u16(),
            ));
        }

        resp.json().await
            .map_err(|e| Error::parse(format!("Invalid JSON from LRCLIB search: {e}"), None))
    }

    /// Lyrics of the first search hit, as LRC
    pub async fn find_lyrics(&self, query: &str) -> Result<Option<String>> {
        let tracks = self.search(query).await?;
        tracing::debug!("LRCLIB returned {} tracks for {query:?}", tracks.len());
        Ok(tracks.first().and_then(LrclibTrack::lrc))
    }
}

/// GET `url` and return the body on success
pub async fn fetch_text(url: &str) -> Result<Option<String>> {
    let resp = http_client(timing::LYRICS_TIMEOUT)
        .get(url)
        .send()
        .await
        .map_err(|e| Error::Network(format!("Request to {url} failed: {e}")))?;

    if !resp.status().is_success() {
        tracing::warn!("{url} returned {}", resp.status());
        return Ok(None);
    }

    Ok(Some(resp.text().await?))
}

/// Shared client settings: identifying user agent and a request timeout
pub(crate) fn http_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_default()
}
