//! Core type definitions for compile-time safety.
//!
//! Enumerations for the user-facing settings plus newtype wrappers that keep
//! a raw search query apart from the file-safe song title derived from it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::paths;
use crate::error::Error;

/// Streaming platform searched by the downloader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// SoundCloud (`scsearch1:`).
    Soundcloud,
    /// Spotify (`spsearch1:`).
    Spotify,
    /// YouTube (`ytsearch1:`). Unknown platform names fall back to it.
    #[default]
    #[serde(other)]
    Youtube,
}

impl Platform {
    /// Returns all platforms in menu order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Youtube, Self::Soundcloud, Self::Spotify]
    }

    /// Returns the configuration name of this platform.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Youtube => "youtube",
            Self::Soundcloud => "soundcloud",
            Self::Spotify => "spotify",
        }
    }

    /// yt-dlp search prefix returning the first hit.
    #[must_use]
    pub const fn search_prefix(self) -> &'static str {
        match self {
            Self::Youtube => "ytsearch1:",
            Self::Soundcloud => "scsearch1:",
            Self::Spotify => "spsearch1:",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::config(format!("unknown platform `{s}`"), "Use youtube, soundcloud or spotify"))
    }
}

/// How lyrics are laid out while the song plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Only the current line, centered.
    Centered,
    /// The whole song with the current line marked.
    List,
    /// A window of context lines around the current one. Unknown mode names
    /// fall back to it.
    #[default]
    #[serde(other)]
    Scrolling,
}

impl DisplayMode {
    /// Returns all display modes in menu order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Scrolling, Self::Centered, Self::List]
    }

    /// Returns the configuration name of this mode.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Scrolling => "scrolling",
            Self::Centered => "centered",
            Self::List => "list",
        }
    }

    /// Cycle to next mode (for 'm' key during playback).
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Scrolling => Self::Centered,
            Self::Centered => Self::List,
            Self::List => Self::Scrolling,
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DisplayMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|m| m.name() == s.trim())
            .ok_or_else(|| Error::config(format!("unknown display mode `{s}`"), "Use scrolling, centered or list"))
    }
}

/// Which of the two caches an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheKind {
    /// Downloaded audio in the music directory.
    Music,
    /// Fetched `.lrc` files in the lyrics directory.
    Lyrics,
}

impl CacheKind {
    /// File extension (without dot) of entries in this cache.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Music => paths::MUSIC_EXT,
            Self::Lyrics => paths::LYRICS_EXT,
        }
    }

    /// Human-readable name used in prompts.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Music => "music",
            Self::Lyrics => "lyrics",
        }
    }
}

/// Search query exactly as the user typed it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query(pub String);

impl Query {
    /// Join command-line words into a query.
    pub fn from_words<S: AsRef<str>>(words: &[S]) -> Self {
        Self(words.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(" "))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derive the cache-safe song title.
    #[must_use]
    pub fn song_title(&self) -> SongTitle {
        SongTitle::new(&self.0)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Query {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Song title usable as a cache file stem: path separators become `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SongTitle(String);

impl SongTitle {
    /// Sanitize a raw title.
    pub fn new(raw: &str) -> Self {
        Self(raw.replace(['/', '\\'], "-"))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SongTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SongTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
