//! Service modules wrapping the external collaborators.
//!
//! Downloading, playback and the on-disk caches live here so the app layer
//! only sequences them.

pub mod download;
pub mod library;
pub mod player;
pub mod search;

pub use download::Downloader;
pub use library::{CachedFile, Library};
pub use player::{play_blocking, player_command, PlayerProcess};
pub use search::{CompositeSearch, FuzzySearch, SearchStrategy, TitleSearch};
