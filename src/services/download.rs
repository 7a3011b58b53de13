//! Music download through `yt-dlp`.
//!
//! The downloader is a child process. It extracts mp3 audio into the music
//! directory and prints the final file path, which is the only output read.

use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::Command;

use crate::error::{Error, Result};
use crate::types::{Platform, Query};

/// Browsers whose cookies are offered to `yt-dlp`, in order.
pub const COOKIE_BROWSERS: &[&str] = &["firefox", "chrome", "chromium"];

/// Shown when every attempt failed.
pub const AUTH_HINT: &str = "YouTube requires authentication. Try:\n   \
    1. Install a browser: pkg install firefox\n   \
    2. Login to YouTube in the browser\n   \
    3. Try again - cookies will be used automatically";

/// Downloads songs into the music directory.
#[derive(Debug, Clone)]
pub struct Downloader {
    program: String,
    music_dir: PathBuf,
    platform: Platform,
}

impl Downloader {
    /// `yt-dlp` writing into `music_dir`, searching `platform`.
    pub fn new(music_dir: impl Into<PathBuf>, platform: Platform) -> Self {
        Self::with_program("yt-dlp", music_dir, platform)
    }

    /// Use a different downloader binary.
    pub fn with_program(program: impl Into<String>, music_dir: impl Into<PathBuf>, platform: Platform) -> Self {
        Self { program: program.into(), music_dir: music_dir.into(), platform }
    }

    /// What to hand to `yt-dlp`: the custom URL, else a platform search.
    pub fn target(&self, query: &Query, custom_url: Option<&str>) -> String {
        custom_url.map_or_else(
            || format!("{}{}", self.platform.search_prefix(), query.as_str()),
            ToString::to_string,
        )
    }

    /// Full argument list for one attempt.
    pub fn args(&self, target: &str, browser: Option<&str>) -> Vec<String> {
        let template = self.music_dir.join("%(title)s.%(ext)s");
        let mut args: Vec<String> = [
            "-x",
            "--audio-format",
            "mp3",
            "--audio-quality",
            "0",
            "-o",
        ]
        .iter()
        .map(ToString::to_string)
        .collect();
        args.push(template.to_string_lossy().into_owned());
        args.push("--extractor-args".into());
        args.push("youtube:player_client=web_creator,android_creator".into());
        if let Some(browser) = browser {
            args.push("--cookies-from-browser".into());
            args.push(browser.into());
        }
        args.push("--print".into());
        args.push("after_move:filepath".into());
        args.push(target.into());
        args
    }

    /// Download a song, returning the path of the audio file.
    ///
    /// Tries each browser's cookies, then no cookies.
    pub async fn download(&self, query: &Query, custom_url: Option<&str>) -> Result<PathBuf> {
        let target = self.target(query, custom_url);
        let attempts = COOKIE_BROWSERS.iter().copied().map(Some).chain(std::iter::once(None));

        let mut last_error = String::from("no attempt made");
        for browser in attempts {
            tracing::info!("Downloading {target:?} (cookies: {})", browser.unwrap_or("none"));
            match self.attempt(&target, browser).await {
                Ok(path) => {
                    tracing::info!("Downloaded {}", path.display());
                    return Ok(path);
                }
                Err(e) => {
                    tracing::debug!("Attempt failed: {e}");
                    last_error = e;
                }
            }
        }

        tracing::warn!("All download attempts failed for {target:?}: {last_error}");
        Err(Error::Download { message: last_error, hint: AUTH_HINT })
    }

    async fn attempt(&self, target: &str, browser: Option<&str>) -> std::result::Result<PathBuf, String> {
        let output = Command::new(&self.program)
            .args(self.args(target, browser))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| format!("failed to start {}: {e}", self.program))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.lines().next_back().unwrap_or_default()
            ));
        }

        parse_printed_path(&String::from_utf8_lossy(&output.stdout))
            .ok_or_else(|| format!("{} printed no file path", self.program))
    }
}

/// The downloaded file is the last non-empty line printed.
pub fn parse_printed_path(stdout: &str) -> Option<PathBuf> {
    stdout
        .lines()
        .map(str::trim)
        .rev()
        .find(|l| !l.is_empty())
        .map(PathBuf::from)
}
