//! On-disk lyrics cache: one `<title>.lrc` per song.

use std::path::{Path, PathBuf};

use crate::constants::paths;
use crate::error::Result;
use crate::types::SongTitle;

/// Lyrics cache rooted at a directory.
#[derive(Debug, Clone)]
pub struct LyricsCache {
    dir: PathBuf,
}

impl LyricsCache {
    /// Create a cache backed by `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the cached files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Cache file for a title.
    pub fn path_for(&self, title: &SongTitle) -> PathBuf {
        self.dir.join(format!("{}.{}", title.as_str(), paths::LYRICS_EXT))
    }

    /// Cached lyrics, if any.
    pub fn load(&self, title: &SongTitle) -> Result<Option<String>> {
        let path = self.path_for(title);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs_err::read_to_string(&path)?))
    }

    /// Store lyrics, replacing any previous copy.
    pub fn save(&self, title: &SongTitle, content: &str) -> Result<PathBuf> {
        fs_err::create_dir_all(&self.dir)?;
        let path = self.path_for(title);
        fs_err::write(&path, content)?;
        tracing::info!("Cached lyrics at {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let cache = LyricsCache::new(dir.path().join("lyrics"));
        let title = SongTitle::new("Shape of You");

        assert!(cache.load(&title).unwrap().is_none());
        let path = cache.save(&title, "[00:01.00] hi").unwrap();
        assert!(path.ends_with("Shape of You.lrc"));
        assert_eq!(cache.load(&title).unwrap().as_deref(), Some("[00:01.00] hi"));
    }
}
