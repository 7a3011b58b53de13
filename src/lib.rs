//! `lyrics-shower` - synced lyrics in the terminal while a song plays.
//!
//! Songs are downloaded with `yt-dlp`, lyrics come from LRCLIB (or a custom
//! URL) and an external player plays the audio while the lyric display follows
//! the playback clock.

// Re-export public modules for use in integration tests and as a library
pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod deps;
pub mod error;
pub mod input;
pub mod install;
pub mod interactive;
pub mod lrclib;
pub mod lyrics;
pub mod menu;
pub mod prompt;
pub mod services;
pub mod sync;
pub mod types;
pub mod ui;
pub mod version;
