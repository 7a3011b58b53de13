//! Command-line surface.

use clap::Parser;

use crate::types::Query;

const EXAMPLES: &str = "\
Examples:
  lyrics                              # Enter interactive mode
  lyrics overnight - mirrors demo     # Download and play
  lyrics -l \"shape of you\"            # Fetch lyrics only
  lyrics -s -l \"bohemian rhapsody\"    # Show lyrics
  lyrics -m \"never gonna give you up\" # Download music only
  lyrics --clear-music \"shape\"        # Clear cached music
  lyrics --settings                   # Settings menu
  lyrics --update                     # Update to latest version
  lyrics --uninstall                  # Uninstall";

/// Real-time synced lyrics with music playback
#[derive(Parser, Debug)]
#[command(name = "lyrics", about, long_about = None, after_help = EXAMPLES)]
pub struct Cli {
    /// Song search query
    pub query: Vec<String>,

    /// Fetch lyrics only without playing
    #[arg(short, long)]
    pub lyrics: bool,

    /// Show lyrics (use with -l)
    #[arg(short, long)]
    pub showcase: bool,

    /// Play music only (no lyrics)
    #[arg(short, long)]
    pub play: bool,

    /// Download music only and cache it
    #[arg(short, long)]
    pub music: bool,

    /// List cached music and lyrics
    #[arg(long, visible_alias = "ls")]
    pub list: bool,

    /// Delete cached music, optionally matching a query
    #[arg(long, visible_alias = "cm", value_name = "QUERY", num_args = 0..=1)]
    pub clear_music: Option<Option<String>>,

    /// Delete cached lyrics, optionally matching a query
    #[arg(long, visible_alias = "cl", value_name = "QUERY", num_args = 0..=1)]
    pub clear_lyrics: Option<Option<String>>,

    /// Open settings menu
    #[arg(long, visible_alias = "menu")]
    pub settings: bool,

    /// Toggle effects for this run
    #[arg(short, long)]
    pub effects: bool,

    /// Custom URL for music/lyrics
    #[arg(long, visible_alias = "ext", value_name = "URL")]
    pub external_url: Option<String>,

    /// Custom URL for music download
    #[arg(long, value_name = "URL")]
    pub music_url: Option<String>,

    /// Custom URL for lyrics fetch
    #[arg(long, value_name = "URL")]
    pub lyrics_url: Option<String>,

    /// Update to latest version
    #[arg(long)]
    pub update: bool,

    /// Uninstall lyrics shower
    #[arg(long)]
    pub uninstall: bool,

    /// Install this binary as ~/bin/lyrics
    #[arg(long)]
    pub install: bool,

    /// Show version information
    #[arg(short, long)]
    pub version: bool,
}

/// What one invocation does, in precedence order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Print version information.
    Version,
    /// Run the updater script.
    Update,
    /// Remove the installed command.
    Uninstall,
    /// Install the running binary.
    Install,
    /// Open the settings menu.
    Settings,
    /// List both caches.
    List,
    /// Delete cached music.
    ClearMusic(Option<String>),
    /// Delete cached lyrics.
    ClearLyrics(Option<String>),
    /// No query: start the REPL.
    Interactive,
    /// Fetch and cache lyrics, optionally printing them.
    Lyrics {
        /// Print the lyrics afterwards.
        showcase: bool,
    },
    /// Download and cache music.
    Music,
    /// Play cached or downloaded music without lyrics.
    Play,
    /// Download, fetch lyrics and play in sync.
    Full,
}

impl Cli {
    /// Resolve the flags into a single mode.
    pub fn mode(&self) -> Mode {
        let non_empty = |q: Option<&str>| q.filter(|q| !q.is_empty()).map(String::from);

        if self.version {
            Mode::Version
        } else if self.update {
            Mode::Update
        } else if self.uninstall {
            Mode::Uninstall
        } else if self.install {
            Mode::Install
        } else if self.settings {
            Mode::Settings
        } else if self.list {
            Mode::List
        } else if let Some(q) = &self.clear_music {
            Mode::ClearMusic(non_empty(q.as_deref()))
        } else if let Some(q) = &self.clear_lyrics {
            Mode::ClearLyrics(non_empty(q.as_deref()))
        } else if self.query.is_empty() {
            Mode::Interactive
        } else if self.lyrics {
            Mode::Lyrics { showcase: self.showcase }
        } else if self.music {
            Mode::Music
        } else if self.play {
            Mode::Play
        } else {
            Mode::Full
        }
    }

    /// The words of the query joined, if any were given.
    pub fn query(&self) -> Option<Query> {
        (!self.query.is_empty()).then(|| Query::from_words(&self.query))
    }

    /// Where music comes from instead of a platform search.
    pub fn music_url(&self) -> Option<String> {
        self.music_url.clone().or_else(|| self.external_url.clone())
    }

    /// Where lyrics come from before LRCLIB.
    pub fn lyrics_url(&self) -> Option<String> {
        self.lyrics_url
            .clone()
            .or_else(|| self.external_url.as_deref().map(lrc_sibling))
    }
}

/// `url` with the extension of its last path segment replaced by `.lrc`.
pub fn lrc_sibling(url: &str) -> String {
    let segment_start = url.rfind('/').map_or(0, |i| i + 1);
    let stem_end = url[segment_start..]
        .rfind('.')
        .map_or(url.len(), |i| segment_start + i);
    format!("{}.lrc", &url[..stem_end])
}
