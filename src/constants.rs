//! Application constants.
//!
//! Centralizes magic numbers, URLs and file locations.

/// Build and release information for this binary.
pub mod version {
    /// Full version string.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    /// Major version component.
    pub const MAJOR: u32 = 1;
    /// Minor version component.
    pub const MINOR: u32 = 0;
    /// Patch version component.
    pub const PATCH: u32 = 0;
    /// Release status label.
    pub const STATUS: &str = "alpha";
    /// Build number within the version.
    pub const BUILD: u32 = 1;
    /// Release date, `YYYY-MM-DD`.
    pub const LAST_UPDATED: &str = "2026-01-30";
}

/// Remote endpoints.
pub mod urls {
    /// Published `version.json` describing the latest release.
    pub const VERSION_CHECK: &str =
        "https://raw.githubusercontent.com/sparxmathsalternative/termux-lyrics-shower/refs/heads/main/version.json";
    /// Updater script fetched by `--update`.
    pub const UPDATE_SCRIPT: &str =
        "https://raw.githubusercontent.com/sparxmathsalternative/termux-lyrics-shower/refs/heads/main/update.sh";
    /// LRCLIB search endpoint.
    pub const LRCLIB_SEARCH: &str = "https://lrclib.net/api/search";
}

/// Timeouts and polling intervals.
pub mod timing {
    use std::time::Duration;

    /// Redraw period of the lyric sync loop.
    pub const REFRESH_INTERVAL: Duration = Duration::from_millis(100);
    /// Timeout for lyrics requests.
    pub const LYRICS_TIMEOUT: Duration = Duration::from_secs(10);
    /// Timeout for the version check.
    pub const VERSION_TIMEOUT: Duration = Duration::from_secs(5);
    /// Timeout for downloading the updater script.
    pub const UPDATE_TIMEOUT: Duration = Duration::from_secs(10);
}

/// File system layout.
pub mod paths {
    /// Directory name under `~/.config`.
    pub const CONFIG_DIR_NAME: &str = "lyrics-shower";
    /// Settings file name.
    pub const CONFIG_FILE: &str = "config.json";
    /// Music cache directory under `$HOME`.
    pub const MUSIC_DIR_NAME: &str = "Music";
    /// Lyrics cache directory under `$HOME`.
    pub const LYRICS_DIR_NAME: &str = ".lyrics_cache";
    /// Log file prefix inside the config directory.
    pub const LOG_FILE: &str = "lyrics-shower.log";
    /// Installed command name in `~/bin`.
    pub const COMMAND_NAME: &str = "lyrics";
    /// Temporary updater script under `$HOME`.
    pub const UPDATE_SCRIPT_NAME: &str = ".lyrics_update.sh";
    /// Extension of cached music.
    pub const MUSIC_EXT: &str = "mp3";
    /// Extension of cached lyrics.
    pub const LYRICS_EXT: &str = "lrc";
}

/// Cache search constants.
pub mod search {
    /// Word-overlap score below which a candidate is dropped.
    pub const WORD_MATCH_THRESHOLD: f64 = 0.6;
    /// Maximum number of matches offered for deletion.
    pub const MAX_DELETE_CANDIDATES: usize = 5;
    /// Minimum skim score accepted by the fallback fuzzy strategy.
    pub const MIN_SKIM_SCORE: i64 = 50;
}

/// Renderer constants.
pub mod render {
    /// Lines shown before the current line in scrolling mode.
    pub const CONTEXT_BEFORE: usize = 1;
    /// Lines shown after the current line in scrolling mode.
    pub const CONTEXT_AFTER: usize = 3;
    /// Probability of decorating a character in glitch mode.
    pub const GLITCH_PROBABILITY: f64 = 0.3;
    /// Width of the banner rules.
    pub const RULE_WIDTH: usize = 60;
}
