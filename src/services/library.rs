//! Cached music and lyrics on disk.
//!
//! Both caches are flat directories; an entry is a file with the cache's
//! extension and its stem is the song title.

use std::ffi::OsStr;
use std::fmt::Write as _;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::constants::render::RULE_WIDTH;
use crate::constants::search::MAX_DELETE_CANDIDATES;
use crate::error::{Error, Result};
use crate::prompt::Prompt;
use crate::services::search::{CompositeSearch, SearchStrategy, TitleSearch};
use crate::types::{CacheKind, SongTitle};

/// A directory walk failure, keeping the path that failed.
fn walk_error(e: walkdir::Error, dir: &Path) -> Error {
    let path = e.path().map_or_else(|| dir.to_path_buf(), Path::to_path_buf);
    Error::io(e.into(), path)
}

/// A cached file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedFile {
    /// File name without extension.
    pub stem: String,
    /// Absolute path on disk.
    pub path: PathBuf,
    /// Size in bytes.
    pub size: u64,
}

impl CachedFile {
    /// Size in MiB, as shown in listings.
    #[allow(clippy::cast_precision_loss)]
    pub fn size_mb(&self) -> f64 {
        self.size as f64 / (1024.0 * 1024.0)
    }
}

/// The music and lyrics caches.
#[derive(Debug, Clone)]
pub struct Library {
    music_dir: PathBuf,
    lyrics_dir: PathBuf,
}

impl Library {
    /// Create a library over the two cache directories.
    pub fn new(music_dir: impl Into<PathBuf>, lyrics_dir: impl Into<PathBuf>) -> Self {
        Self { music_dir: music_dir.into(), lyrics_dir: lyrics_dir.into() }
    }

    /// Directory backing `kind`.
    pub fn dir(&self, kind: CacheKind) -> &Path {
        match kind {
            CacheKind::Music => &self.music_dir,
            CacheKind::Lyrics => &self.lyrics_dir,
        }
    }

    /// Files in the cache, sorted by name. A missing directory is empty.
    pub fn entries(&self, kind: CacheKind) -> Result<Vec<CachedFile>> {
        let dir = self.dir(kind);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| walk_error(e, dir))?;
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension() != Some(OsStr::new(kind.extension())) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            entries.push(CachedFile { stem: stem.to_string(), path: path.to_path_buf(), size });
        }
        Ok(entries)
    }

    /// Human-readable listing of both caches.
    pub fn listing(&self) -> Result<String> {
        let rule = "=".repeat(RULE_WIDTH);
        let mut out = String::new();

        let _ = writeln!(out, "\n📁 CACHED MUSIC:\n{rule}");
        let music = self.entries(CacheKind::Music)?;
        if music.is_empty() {
            out.push_str("  No cached music found\n");
        }
        for (i, file) in music.iter().enumerate() {
            let _ = writeln!(out, "  {}. {} ({:.2} MB)", i + 1, file.stem, file.size_mb());
        }

        let _ = writeln!(out, "\n📝 CACHED LYRICS:\n{rule}");
        let lyrics = self.entries(CacheKind::Lyrics)?;
        if lyrics.is_empty() {
            out.push_str("  No cached lyrics found\n");
        }
        for (i, file) in lyrics.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, file.stem);
        }
        Ok(out)
    }

    /// Cached music for a title: a file whose name contains it, else the best title match.
    pub fn find_music(&self, title: &SongTitle) -> Result<Option<PathBuf>> {
        let entries = self.entries(CacheKind::Music)?;

        if let Some(hit) = entries.iter().find(|e| e.stem.contains(title.as_str())) {
            return Ok(Some(hit.path.clone()));
        }

        let stems: Vec<String> = entries.iter().map(|e| e.stem.clone()).collect();
        let best = TitleSearch::default()
            .find_matches(title.as_str(), &stems, 1)
            .first()
            .and_then(|m| entries.iter().find(|e| e.stem == m.name))
            .map(|e| e.path.clone());
        Ok(best)
    }

    /// Interactive deletion. Returns the number of files removed.
    ///
    /// Without a query every file of `kind` is removed after confirmation.
    /// With a query the best matches are offered and one is removed.
    pub fn clear<R: BufRead, W: Write>(
        &self,
        kind: CacheKind,
        query: Option<&str>,
        prompt: &mut Prompt<R, W>,
    ) -> Result<usize> {
        let files = self.entries(kind)?;
        let label = kind.label();

        if files.is_empty() {
            prompt.say(format!("No cached {label} found"))?;
            return Ok(0);
        }

        let Some(query) = query.filter(|q| !q.trim().is_empty()) else {
            if !prompt.confirm(&format!("Delete ALL cached {label}? (y/N): "), "y")? {
                prompt.say("Cancelled")?;
                return Ok(0);
            }
            for file in &files {
                fs_err::remove_file(&file.path)?;
            }
            tracing::info!("Removed {} cached {label} files", files.len());
            prompt.say(format!("✅ Deleted {} {label} file(s)", files.len()))?;
            return Ok(files.len());
        };

        let stems: Vec<String> = files.iter().map(|f| f.stem.clone()).collect();
        let matches = CompositeSearch::with_defaults().find_matches(query, &stems, MAX_DELETE_CANDIDATES);
        if matches.is_empty() {
            prompt.say(format!("No matches found for '{query}'"))?;
            return Ok(0);
        }

        prompt.say(format!("\n🔍 Found matches for '{query}':"))?;
        for (i, m) in matches.iter().enumerate() {
            prompt.say(format!("  {}. {} (match: {:.0}%)", i + 1, m.name, m.score * 100.0))?;
        }

        let choice = prompt
            .ask("\nSelect number to delete (or 'q' to cancel): ")?
            .unwrap_or_else(|| "q".to_string());
        if choice.eq_ignore_ascii_case("q") {
            prompt.say("Cancelled")?;
            return Ok(0);
        }

        let Some(chosen) = choice
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| matches.get(i))
        else {
            prompt.say("Invalid selection")?;
            return Ok(0);
        };

        if !prompt.confirm(&format!("Delete '{}'? (y/N): ", chosen.name), "y")? {
            prompt.say("Cancelled")?;
            return Ok(0);
        }

        let path = self.dir(kind).join(format!("{}.{}", chosen.name, kind.extension()));
        fs_err::remove_file(&path)?;
        tracing::info!("Removed {}", path.display());
        prompt.say(format!("✅ Deleted: {}", chosen.name))?;
        Ok(1)
    }
}
