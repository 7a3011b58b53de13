//! Application configuration.
//!
//! Settings live in `~/.config/lyrics-shower/config.json` and are merged over
//! the defaults, so keys missing from the file keep their default value.
//! Directory locations can be overridden through environment variables or a
//! `.env` file.

use std::env;
use std::path::{Path, PathBuf};

use dotenv::dotenv;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::paths;
use crate::error::{Error, Result};
use crate::types::{DisplayMode, Platform};

/// Visual effects applied to the current lyric line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Effects {
    /// Sprinkle combining marks over the current line.
    pub glitch: bool,
    /// Highlight in bright white instead of cyan.
    pub flash: bool,
    /// Reserved for the audio graph.
    pub bass_threshold: f64,
    /// Reserved for the audio graph.
    pub high_threshold: f64,
}

impl Default for Effects {
    fn default() -> Self {
        Self {
            glitch: false,
            flash: false,
            bass_threshold: 0.7,
            high_threshold: 0.8,
        }
    }
}

/// Persistent user settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Platform searched when no URL is given.
    pub platform: Platform,
    /// Player binary used for playback.
    pub media_player: String,
    /// Lyric layout.
    pub display_mode: DisplayMode,
    /// Reserved for the audio graph.
    pub use_graph: bool,
    /// Current-line effects.
    pub effects: Effects,
    /// Install missing tools automatically.
    pub auto_install: bool,
    /// Compare against the published version on start.
    pub check_updates: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            platform: Platform::Youtube,
            media_player: "ffplay".to_string(),
            display_mode: DisplayMode::Scrolling,
            use_graph: false,
            effects: Effects::default(),
            auto_install: true,
            check_updates: true,
        }
    }
}

impl Settings {
    /// Load settings from `path`, falling back to defaults when the file is absent.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs_err::read_to_string(path)?;
        Self::from_json(&raw).map_err(|e| Error::parse(e.to_string(), path.to_path_buf()))
    }

    /// Parse a settings document, filling missing top-level keys from the defaults.
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        let user: Value = serde_json::from_str(raw)?;
        let mut merged = serde_json::to_value(Self::default())?;
        if let (Value::Object(base), Value::Object(overrides)) = (&mut merged, user) {
            for (key, value) in overrides {
                base.insert(key, value);
            }
        }
        serde_json::from_value(merged)
    }

    /// Write settings as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs_err::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::parse(e.to_string(), path.to_path_buf()))?;
        fs_err::write(path, json)?;
        tracing::info!("Saved settings to {}", path.display());
        Ok(())
    }
}

/// Resolved directory layout.
#[derive(Debug, Clone)]
pub struct Paths {
    /// User home (or the `LYRICS_SHOWER_HOME` override).
    pub home: PathBuf,
    /// `~/.config/lyrics-shower`
    pub config_dir: PathBuf,
    /// `~/Music`
    pub music_dir: PathBuf,
    /// `~/.lyrics_cache`
    pub lyrics_dir: PathBuf,
}

impl Paths {
    /// Layout rooted at the given home directory.
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        let home = home.into();
        Self {
            config_dir: home.join(".config").join(paths::CONFIG_DIR_NAME),
            music_dir: home.join(paths::MUSIC_DIR_NAME),
            lyrics_dir: home.join(paths::LYRICS_DIR_NAME),
            home,
        }
    }

    /// Resolve from the environment.
    pub fn from_env() -> Result<Self> {
        let home = match env::var("LYRICS_SHOWER_HOME") {
            Ok(h) => expand(&h),
            Err(_) => dirs::home_dir().ok_or_else(|| {
                Error::config("cannot determine home directory", "Set HOME or LYRICS_SHOWER_HOME")
            })?,
        };

        let mut layout = Self::with_home(home);
        if let Ok(dir) = env::var("LYRICS_SHOWER_MUSIC_DIR") {
            layout.music_dir = expand(&dir);
        }
        if let Ok(dir) = env::var("LYRICS_SHOWER_LYRICS_DIR") {
            layout.lyrics_dir = expand(&dir);
        }
        Ok(layout)
    }

    /// Create every directory in the layout.
    pub fn ensure(&self) -> Result<()> {
        for dir in [&self.config_dir, &self.music_dir, &self.lyrics_dir] {
            fs_err::create_dir_all(dir)?;
        }
        Ok(())
    }

    /// Settings file location.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(paths::CONFIG_FILE)
    }

    /// `~/bin`, where the command is installed.
    pub fn bin_dir(&self) -> PathBuf {
        self.home.join("bin")
    }

    /// Installed command path.
    pub fn command_path(&self) -> PathBuf {
        self.bin_dir().join(paths::COMMAND_NAME)
    }
}

fn expand(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).to_string())
}

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory layout.
    pub paths: Paths,
    /// User settings loaded from disk.
    pub settings: Settings,
}

impl Config {
    /// Load configuration from environment variables and the settings file
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let paths = Paths::from_env()?;
        paths.ensure()?;
        let settings = Settings::load(&paths.config_file())?;
        Ok(Self { paths, settings })
    }

    /// Persist the current settings.
    pub fn save(&self) -> Result<()> {
        self.settings.save(&self.paths.config_file())
    }
}
