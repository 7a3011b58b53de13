//! Lyrics handling: LRC parsing, the on-disk cache and lyrics providers.

pub mod cache;
pub mod lrc;
pub mod provider;

pub use cache::LyricsCache;
pub use lrc::{format_clock, parse_lrc, plain_to_lrc, LyricLine};
pub use provider::{LyricsProvider, LyricsService, UrlProvider};
