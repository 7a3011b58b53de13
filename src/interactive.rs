//! Interactive mode: a small REPL around the app.
//!
//! A session song can be set once and is used by every command given
//! without an argument.

use std::io::{self, BufRead, Write};
use std::sync::{Arc, Mutex};

use tokio::task::JoinHandle;

use crate::app::{App, Request};
use crate::constants::render::RULE_WIDTH;
use crate::error::Result;
use crate::prompt::Prompt;
use crate::types::CacheKind;

const HELP: &str = "\nAvailable commands:
  play [song]     - Download and play with lyrics
  lyrics [song]   - Fetch lyrics only
  download [song] - Download music only
  list            - List cached files
  clear           - Clear cache
  settings        - Open settings menu
  set <song>      - Set session song
  help            - Show this help
  exit            - Exit interactive mode
";

const INTERRUPT_HINT: &str = "Use 'exit' to quit";

/// Ctrl+C handling for a REPL session.
///
/// While the REPL waits at its prompt an interrupt prints a hint. While a
/// command runs the interrupt belongs to the command (playback stops on it).
#[derive(Debug, Clone, Default)]
pub struct InterruptHint {
    waiting: Arc<Mutex<Option<String>>>,
}

/// Background Ctrl+C listener, stopped on drop.
#[derive(Debug)]
pub struct InterruptListener(JoinHandle<()>);

impl Drop for InterruptListener {
    fn drop(&mut self) {
        self.0.abort();
    }
}

impl InterruptHint {
    /// Record the prompt being shown, or `None` while a command runs.
    pub fn set_waiting(&self, prompt: Option<String>) {
        if let Ok(mut waiting) = self.waiting.lock() {
            *waiting = prompt;
        }
    }

    /// What to print for an interrupt right now.
    pub fn on_interrupt(&self) -> Option<String> {
        let waiting = self.waiting.lock().ok()?;
        waiting.as_ref().map(|prompt| format!("\n{INTERRUPT_HINT}\n{prompt}"))
    }

    /// Listen for Ctrl+C until the returned listener is dropped, passing hints to `emit`.
    pub fn listen<F>(&self, emit: F) -> InterruptListener
    where
        F: Fn(&str) + Send + 'static,
    {
        let hint = self.clone();
        InterruptListener(tokio::spawn(async move {
            while tokio::signal::ctrl_c().await.is_ok() {
                match hint.on_interrupt() {
                    Some(text) => emit(&text),
                    None => tracing::debug!("Interrupt left to the running command"),
                }
            }
        }))
    }
}

/// One parsed REPL line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Blank line.
    Nothing,
    /// Leave the REPL.
    Exit,
    /// Show the command list.
    Help,
    /// Change the session song; `None` when no song was given.
    Set(Option<String>),
    /// Download and play with lyrics.
    Play(Option<String>),
    /// Fetch lyrics only.
    Lyrics(Option<String>),
    /// Download music only.
    Download(Option<String>),
    /// List both caches.
    List,
    /// Pick a cache to clear.
    Clear,
    /// Open the settings menu.
    Settings,
    /// Anything else names a song.
    Song(String),
}

/// Interpret a line. Commands without an argument fall back to `session`.
pub fn parse_command(line: &str, session: Option<&str>) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Nothing;
    }

    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let arg = if rest.is_empty() { session.map(String::from) } else { Some(rest.to_string()) };

    match word.to_lowercase().as_str() {
        "exit" | "quit" | "q" => Command::Exit,
        "help" => Command::Help,
        "set" => Command::Set(arg),
        "play" | "p" => Command::Play(arg),
        "lyrics" | "l" => Command::Lyrics(arg),
        "download" | "d" => Command::Download(arg),
        "list" => Command::List,
        "clear" => Command::Clear,
        "settings" => Command::Settings,
        _ => Command::Song(line.to_string()),
    }
}

/// Prompt text for the current session.
pub fn prompt_text(session: Option<&str>) -> String {
    session.map_or_else(|| "lyrics> ".to_string(), |song| format!("lyrics [{song}]> "))
}

/// Run the REPL until `exit` or end of input.
pub async fn run<R: BufRead + Send, W: Write + Send>(app: &mut App, prompt: &mut Prompt<R, W>) -> Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    prompt.clear_screen()?;
    prompt.say(format!("{rule}\n🎵 LYRICS SHOWER - INTERACTIVE MODE\n{rule}\n"))?;
    prompt.say("Type 'help' for commands, 'exit' to quit\n")?;

    let hint = InterruptHint::default();
    let _listener = hint.listen(|text| {
        let mut out = io::stdout();
        let _ = write!(out, "{text}");
        let _ = out.flush();
    });

    let mut session: Option<String> = None;
    loop {
        let text = prompt_text(session.as_deref());
        hint.set_waiting(Some(text.clone()));
        let line = prompt.ask(&text)?;
        hint.set_waiting(None);
        let Some(line) = line else {
            prompt.say("\nGoodbye!")?;
            return Ok(());
        };

        let command = parse_command(&line, session.as_deref());
        tracing::debug!("REPL command {command:?}");
        match dispatch(app, prompt, &mut session, command).await {
            Ok(()) => {}
            Err(LoopControl::Exit) => {
                prompt.say("Goodbye!")?;
                return Ok(());
            }
            Err(LoopControl::Failed(e)) => {
                tracing::warn!("Command failed: {e}");
                prompt.say(format!("❌ {e}"))?;
            }
        }
    }
}

/// Why dispatch stopped early.
enum LoopControl {
    Exit,
    Failed(crate::error::Error),
}

impl From<crate::error::Error> for LoopControl {
    fn from(e: crate::error::Error) -> Self {
        Self::Failed(e)
    }
}

async fn dispatch<R: BufRead + Send, W: Write + Send>(
    app: &mut App,
    prompt: &mut Prompt<R, W>,
    session: &mut Option<String>,
    command: Command,
) -> std::result::Result<(), LoopControl> {
    match command {
        Command::Nothing => {}
        Command::Exit => return Err(LoopControl::Exit),
        Command::Help => prompt.say(HELP)?,
        Command::Set(Some(song)) | Command::Song(song) => {
            prompt.say(format!("✅ Session song set to: {song}"))?;
            *session = Some(song);
        }
        Command::Set(None) => prompt.say("Usage: set <song name>")?,
        Command::Play(Some(song)) => {
            prompt.say(format!("\nPlaying: {song}\n"))?;
            app.play_full(&Request::search(song)).await?;
        }
        Command::Play(None) => prompt.say("Please specify a song or set session song with 'set <song>'")?,
        Command::Lyrics(Some(song)) => {
            app.lyrics_only(&Request::search(song), false).await?;
        }
        Command::Download(Some(song)) => {
            app.download(&Request::search(song)).await?;
        }
        Command::Lyrics(None) | Command::Download(None) => prompt.say("Please specify a song")?,
        Command::List => prompt.say(app.library().listing()?)?,
        Command::Clear => {
            prompt.say("\n1. Clear music\n2. Clear lyrics")?;
            let kind = match prompt.ask("Select: ")?.as_deref() {
                Some("1") => Some(CacheKind::Music),
                Some("2") => Some(CacheKind::Lyrics),
                _ => None,
            };
            if let Some(kind) = kind {
                app.library().clear(kind, None, prompt)?;
            }
        }
        Command::Settings => {
            app.settings(prompt)?;
        }
    }
    Ok(())
}
