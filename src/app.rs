//! Application state and the command modes.
//!
//! The [`App`] owns the configuration and the caches and sequences the
//! external collaborators for each mode: downloader, lyrics providers and
//! player.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::cli::{Cli, Mode};
use crate::config::Config;
use crate::constants::timing::REFRESH_INTERVAL;
use crate::error::{Error, Result};
use crate::lyrics::{parse_lrc, LyricLine, LyricsCache, LyricsService};
use crate::menu::settings_menu;
use crate::prompt::{Prompt, StdPrompt};
use crate::services::{play_blocking, Downloader, Library, PlayerProcess};
use crate::sync::{LyricTimeline, SyncLoop, SyncOutcome};
use crate::types::{CacheKind, Query};
use crate::ui::{showcase_text, RenderOptions, TerminalFrontend};
use crate::{install, interactive};

/// One song to act on, with optional direct sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// What the user typed.
    pub query: Query,
    /// Download from here instead of searching.
    pub music_url: Option<String>,
    /// Try lyrics from here before LRCLIB.
    pub lyrics_url: Option<String>,
}

impl Request {
    /// A plain search with no direct sources.
    pub fn search(query: impl Into<String>) -> Self {
        Self { query: Query(query.into()), music_url: None, lyrics_url: None }
    }

    /// Build from the parsed command line, if it carries a query.
    pub fn from_cli(cli: &Cli) -> Option<Self> {
        Some(Self {
            query: cli.query()?,
            music_url: cli.music_url(),
            lyrics_url: cli.lyrics_url(),
        })
    }
}

/// Application state.
pub struct App {
    config: Config,
    library: Library,
    lyrics_cache: LyricsCache,
}

impl App {
    /// Build the application around a loaded configuration.
    pub fn new(config: Config) -> Self {
        let library = Library::new(&config.paths.music_dir, &config.paths.lyrics_dir);
        let lyrics_cache = LyricsCache::new(&config.paths.lyrics_dir);
        Self { config, library, lyrics_cache }
    }

    /// Current configuration.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The cached files.
    pub const fn library(&self) -> &Library {
        &self.library
    }

    /// Flip both visual effects for this run only.
    pub fn toggle_effects(&mut self) {
        let effects = &mut self.config.settings.effects;
        effects.glitch = !effects.glitch;
        effects.flash = !effects.flash;
        tracing::debug!("Effects toggled: glitch={} flash={}", effects.glitch, effects.flash);
    }

    /// Run the mode selected on the command line.
    pub async fn run(&mut self, cli: &Cli) -> Result<()> {
        if cli.effects {
            self.toggle_effects();
        }

        let mode = cli.mode();
        tracing::info!("Running {mode:?}");
        let mut prompt = StdPrompt::stdio();
        match mode {
            Mode::Version => println!("{}", crate::version::VersionInfo::current().describe()),
            Mode::Update => {
                println!("🔄 Updating Lyrics Shower...\n");
                if let Err(e) = install::update(&self.config.paths).await {
                    println!("❌ Update failed: {e}");
                }
            }
            Mode::Uninstall => {
                prompt.clear_screen()?;
                install::uninstall(&self.config.paths, &mut prompt)?;
            }
            Mode::Install => {
                let exe = std::env::current_exe()?;
                let installed = install::install(&self.config.paths, &exe, &self.config.settings.media_player)?;
                println!("✅ Installed to {}", installed.command.display());
                for package in &installed.failed {
                    println!("⚠️  Could not install {package}, install it manually");
                }
                println!("Restart your shell or run: source ~/.bashrc");
            }
            Mode::Settings => {
                settings_menu(&mut self.config, &mut prompt)?;
            }
            Mode::List => print!("{}", self.library.listing()?),
            Mode::ClearMusic(query) => {
                self.library.clear(CacheKind::Music, query.as_deref(), &mut prompt)?;
            }
            Mode::ClearLyrics(query) => {
                self.library.clear(CacheKind::Lyrics, query.as_deref(), &mut prompt)?;
            }
            Mode::Interactive => interactive::run(self, &mut prompt).await?,
            Mode::Lyrics { showcase } => {
                if let Some(request) = Request::from_cli(cli) {
                    self.lyrics_only(&request, showcase).await?;
                }
            }
            Mode::Music => {
                if let Some(request) = Request::from_cli(cli) {
                    if self.download(&request).await?.is_some() {
                        println!("✅ Music downloaded and cached");
                    }
                }
            }
            Mode::Play => {
                if let Some(request) = Request::from_cli(cli) {
                    self.play_only(&request).await?;
                }
            }
            Mode::Full => {
                if let Some(request) = Request::from_cli(cli) {
                    self.play_full(&request).await?;
                }
            }
        }
        Ok(())
    }

    /// Lyrics from the cache, else fetched and cached. Prints them with `showcase`.
    pub async fn lyrics_only(&self, request: &Request, showcase: bool) -> Result<Option<String>> {
        let title = request.query.song_title();

        let content = match self.lyrics_cache.load(&title)? {
            Some(cached) => {
                tracing::info!("Using cached lyrics for {title}");
                Some(cached)
            }
            None => {
                let fetched = fetch_lyrics(request).await;
                if let Some(content) = &fetched {
                    self.lyrics_cache.save(&title, content)?;
                }
                fetched
            }
        };

        match &content {
            Some(content) if showcase => println!("{}", showcase_text(content)),
            Some(_) => println!("✅ Lyrics fetched and cached"),
            None => println!("❌ No lyrics found"),
        }
        Ok(content)
    }

    /// Download the song. A failed download is reported and yields `None`.
    pub async fn download(&self, request: &Request) -> Result<Option<PathBuf>> {
        println!("🔍 Searching for: {}", request.query);
        let downloader = Downloader::new(&self.config.paths.music_dir, self.config.settings.platform);

        match downloader.download(&request.query, request.music_url.as_deref()).await {
            Ok(path) => {
                println!("✅ Downloaded: {}", path.display());
                Ok(Some(path))
            }
            Err(Error::Download { message, hint }) => {
                println!("❌ Failed to download: {message}");
                println!("\n💡 {hint}");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Play cached music (or download it first) without lyrics.
    pub async fn play_only(&self, request: &Request) -> Result<()> {
        let audio = match self.library.find_music(&request.query.song_title())? {
            Some(path) => Some(path),
            None => self.download(request).await?,
        };
        if let Some(audio) = audio {
            self.play_music(&audio).await?;
        }
        Ok(())
    }

    /// Download, fetch lyrics and play with the lyrics in sync.
    ///
    /// Without lyrics, or with lyrics that have no timed lines, the song plays
    /// without them.
    pub async fn play_full(&self, request: &Request) -> Result<()> {
        let Some(audio) = self.download(request).await? else {
            return Ok(());
        };

        let title = request.query.song_title();
        let content = match fetch_lyrics(request).await {
            Some(content) => {
                self.lyrics_cache.save(&title, &content)?;
                Some(content)
            }
            None => self.lyrics_cache.load(&title)?,
        };

        let Some(content) = content else {
            println!("⚠️  No lyrics found, playing music only");
            return self.play_music(&audio).await;
        };

        let lines = parse_lrc(&content);
        if lines.is_empty() {
            println!("⚠️  No synced lyrics available, playing music only");
            return self.play_music(&audio).await;
        }

        self.play_synced(&audio, lines)
    }

    async fn play_music(&self, audio: &Path) -> Result<()> {
        let name = audio.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
        println!("🎵 Playing: {name}");
        println!("[Ctrl+C to stop]");

        if play_blocking(&self.config.settings.media_player, audio).await? == SyncOutcome::Stopped {
            println!("\n⏹️  Stopped");
        }
        Ok(())
    }

    fn play_synced(&self, audio: &Path, lines: Vec<LyricLine>) -> Result<()> {
        let player = PlayerProcess::spawn(&self.config.settings.media_player, audio)?;
        let frontend = TerminalFrontend::enter(RenderOptions::from_settings(&self.config.settings))?;

        let outcome = SyncLoop::new(player, frontend, LyricTimeline::new(lines), REFRESH_INTERVAL).run()?;
        if outcome == SyncOutcome::Stopped {
            println!("\n\n⏹️  Stopped");
        }
        Ok(())
    }

    /// Open the settings menu on arbitrary streams.
    pub fn settings<R: BufRead, W: Write>(&mut self, prompt: &mut Prompt<R, W>) -> Result<bool> {
        settings_menu(&mut self.config, prompt)
    }
}

/// Lyrics from the request's URL, then LRCLIB.
async fn fetch_lyrics(request: &Request) -> Option<String> {
    LyricsService::with_defaults(request.lyrics_url.as_deref())
        .fetch(request.query.as_str(), "")
        .await
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::config::{Paths, Settings};
    use clap::Parser;

    fn app(home: &Path) -> App {
        let paths = Paths::with_home(home);
        paths.ensure().unwrap();
        App::new(Config { paths, settings: Settings::default() })
    }

    #[test]
    fn effects_flag_flips_both_effects() {
        let home = tempfile::tempdir().unwrap();
        let mut app = app(home.path());
        app.toggle_effects();
        assert!(app.config().settings.effects.glitch);
        assert!(app.config().settings.effects.flash);
    }

    #[test]
    fn request_carries_urls_from_cli() {
        let cli = Cli::try_parse_from(["lyrics", "--ext", "https://h/s.mp3", "song"]).unwrap();
        let request = Request::from_cli(&cli).unwrap();
        assert_eq!(request.query.as_str(), "song");
        assert_eq!(request.music_url.as_deref(), Some("https://h/s.mp3"));
        assert_eq!(request.lyrics_url.as_deref(), Some("https://h/s.lrc"));

        let cli = Cli::try_parse_from(["lyrics", "--ls"]).unwrap();
        assert!(Request::from_cli(&cli).is_none());
    }

    #[tokio::test]
    async fn lyrics_only_prefers_cache() {
        let home = tempfile::tempdir().unwrap();
        let app = app(home.path());
        let request = Request::search("AC/DC - Thunder");
        app.lyrics_cache.save(&request.query.song_title(), "[00:01.00] thunder").unwrap();

        let content = app.lyrics_only(&request, true).await.unwrap();
        assert_eq!(content.as_deref(), Some("[00:01.00] thunder"));
    }
}
