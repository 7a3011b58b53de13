//! Lyrics sources.
//!
//! A [`LyricsService`] asks each provider in turn and returns the first
//! lyrics found. Provider failures are logged and treated as "not found" so
//! a dead custom URL still falls through to the public API.

use async_trait::async_trait;

use crate::error::Result;
use crate::lrclib::{fetch_text, LrclibClient};

/// A place lyrics can come from.
#[async_trait]
pub trait LyricsProvider: Send + Sync {
    /// Look up LRC content for a song.
    ///
    /// `Ok(None)` means the provider answered but had nothing.
    async fn lookup(&self, title: &str, artist: &str) -> Result<Option<String>>;

    /// Get the name of this provider (for debugging/logging).
    fn name(&self) -> &'static str;
}

/// Lyrics served verbatim from a user-supplied URL.
pub struct UrlProvider {
    url: String,
}

impl UrlProvider {
    /// Create a provider for `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[async_trait]
impl LyricsProvider for UrlProvider {
    async fn lookup(&self, _title: &str, _artist: &str) -> Result<Option<String>> {
        fetch_text(&self.url).await
    }

    fn name(&self) -> &'static str {
        "UrlProvider"
    }
}

#[async_trait]
impl LyricsProvider for LrclibClient {
    async fn lookup(&self, title: &str, artist: &str) -> Result<Option<String>> {
        let query = format!("{artist} {title}");
        self.find_lyrics(query.trim()).await
    }

    fn name(&self) -> &'static str {
        "LRCLIB"
    }
}

/// Provider chain tried in order.
pub struct LyricsService {
    providers: Vec<Box<dyn LyricsProvider>>,
}

impl LyricsService {
    /// Create a service over the given providers.
    pub fn new(providers: Vec<Box<dyn LyricsProvider>>) -> Self {
        Self { providers }
    }

    /// Custom URL first (when given), then LRCLIB.
    pub fn with_defaults(custom_url: Option<&str>) -> Self {
        let mut providers: Vec<Box<dyn LyricsProvider>> = Vec::new();
        if let Some(url) = custom_url {
            providers.push(Box::new(UrlProvider::new(url)));
        }
        providers.push(Box::new(LrclibClient::default()));
        Self::new(providers)
    }

    /// First non-empty lyrics any provider returns.
    pub async fn fetch(&self, title: &str, artist: &str) -> Option<String> {
        for provider in &self.providers {
            match provider.lookup(title, artist).await {
                Ok(Some(lyrics)) if !lyrics.trim().is_empty() => {
                    tracing::info!("{} found lyrics for {title:?}", provider.name());
                    return Some(lyrics);
                }
                Ok(_) => tracing::info!("{} has no lyrics for {title:?}", provider.name()),
                Err(e) => tracing::warn!("{} failed for {title:?}: {e}", provider.name()),
            }
        }
        None
    }
}
