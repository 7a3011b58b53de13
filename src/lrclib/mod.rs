//! LRCLIB integration.
//!
//! Searches the public LRCLIB database for synchronized lyrics.

/// API client for LRCLIB requests
pub mod api;
/// Data types representing LRCLIB records
pub mod types;

// Re-export key components
pub use api::{fetch_text, LrclibClient};
pub use types::LrclibTrack;
