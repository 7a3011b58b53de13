//! Application error types.
//!
//! Provides unified error handling with actionable context for debugging.

use std::path::PathBuf;

use thiserror::Error;

/// Application result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types with specific context for actionable debugging
#[derive(Debug, Error)]
pub enum Error {
    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<PathBuf>,
    },

    /// Network error (connection, timeout, DNS)
    #[error("Network error: {0}")]
    Network(String),

    /// Lyrics API error with status context
    #[error("Lyrics API error: {message}")]
    LyricsApi {
        /// Human-readable error description.
        message: String,
        /// HTTP status code, if from an HTTP response.
        status: Option<u16>,
        /// Actionable suggestion for resolving the error.
        hint: Option<&'static str>,
    },

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },

    /// Parsing error (settings file, API payload)
    #[error("Parse error in {file:?}: {message}")]
    Parse {
        /// File that failed to parse, if known.
        file: Option<PathBuf>,
        /// Description of the parse failure.
        message: String,
    },

    /// Music download failed after every attempt
    #[error("Download failed: {message}")]
    Download {
        /// Last failure reported by the downloader.
        message: String,
        /// What the user can do about it.
        hint: &'static str,
    },

    /// External media player could not be started or waited on
    #[error("Media player `{player}` failed: {message}")]
    Player {
        /// Player binary name.
        player: String,
        /// Description of the failure.
        message: String,
    },

    /// A required external tool is missing from `PATH`
    #[error("`{0}` was not found in PATH")]
    MissingTool(String),

    /// Generic message error (escape hatch)
    #[error("{0}")]
    Msg(String),
}

impl Error {
    /// Create an IO error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<PathBuf>>) -> Self {
        Self::Io { source, path: path.into() }
    }

    /// Create a lyrics API error with HTTP status
    pub fn api_status(message: impl Into<String>, status: u16) -> Self {
        let hint = match status {
            404 => Some("No lyrics are published for this query"),
            429 => Some("Rate limited - wait a moment and try again"),
            500..=599 => Some("Lyrics server error - try again later"),
            _ => None,
        };
        Self::LyricsApi {
            message: message.into(),
            status: Some(status),
            hint,
        }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }

    /// Create a parse error with file context
    pub fn parse(message: impl Into<String>, file: impl Into<Option<PathBuf>>) -> Self {
        Self::Parse { file: file.into(), message: message.into() }
    }

    /// Create a player error
    pub fn player(player: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Player { player: player.into(), message: message.into() }
    }
}

// Convenience conversions
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io { source: e, path: None }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Self::Msg(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Self::Msg(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn api_status_provides_hints() {
        let err = Error::api_status("Too many requests", 429);
        match err {
            Error::LyricsApi { hint: Some(h), status: Some(429), .. } => {
                assert!(h.contains("Rate limited"));
            }
            _ => panic!("Expected LyricsApi error with hint"),
        }
    }

    #[test]
    fn io_error_keeps_path() {
        let err = Error::io(
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
            PathBuf::from("/tmp/song.lrc"),
        );
        assert!(err.to_string().contains("song.lrc"));
    }
}
