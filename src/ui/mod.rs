//! User interface components.
//!
//! Renders the lyric display modes with ratatui and owns the terminal while
//! a song plays.

mod centered;
mod effects;
mod list;
mod scrolling;
mod showcase;

pub use effects::glitch;
pub use showcase::showcase_text;

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::ThreadRng;
use rand::Rng;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};

use crate::config::Settings;
use crate::error::Result;
use crate::input::{handle_playback_key, InputResult};
use crate::lyrics::format_clock;
use crate::sync::{Frontend, LyricTimeline};
use crate::types::DisplayMode;

/// Presentation options that can change while a song plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Layout.
    pub mode: DisplayMode,
    /// Glitch the current line.
    pub glitch: bool,
    /// Bright white highlight.
    pub flash: bool,
}

impl RenderOptions {
    /// Options taken from the user's settings.
    pub const fn from_settings(settings: &Settings) -> Self {
        Self {
            mode: settings.display_mode,
            glitch: settings.effects.glitch,
            flash: settings.effects.flash,
        }
    }

    /// Style of the line being sung.
    pub fn highlight_style(self) -> Style {
        let color = if self.flash { Color::White } else { Color::Cyan };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }
}

/// Everything needed to draw one frame.
pub struct LyricsView<'a> {
    /// Lines and cursor.
    pub timeline: &'a LyricTimeline,
    /// Playback clock.
    pub elapsed: Duration,
    /// Layout and effects.
    pub options: RenderOptions,
    /// Text of the current line after effects.
    pub highlight: String,
}

impl<'a> LyricsView<'a> {
    /// View of `timeline` at `elapsed`. Glitch, when on, touches only the current line.
    pub fn new<R: Rng + ?Sized>(
        timeline: &'a LyricTimeline,
        elapsed: Duration,
        options: RenderOptions,
        rng: &mut R,
    ) -> Self {
        let text = timeline.current_line().map_or("", |l| l.text.as_str());
        let highlight = if options.glitch { glitch(text, rng) } else { text.to_string() };
        Self { timeline, elapsed, options, highlight }
    }
}

/// Render the lyrics in the selected display mode.
pub fn draw(f: &mut Frame, view: &LyricsView<'_>) {
    match view.options.mode {
        DisplayMode::Scrolling => scrolling::draw(f, view),
        DisplayMode::Centered => centered::draw(f, view),
        DisplayMode::List => list::draw(f, view),
    }
}

/// Build styled help text spans from key-description pairs for the hint bar.
pub fn create_help_text<'a>(commands: &[(&'a str, &'a str)]) -> Vec<Span<'a>> {
    let mut text = vec![Span::raw(" ")]; // Start with padding

    for (i, (key, description)) in commands.iter().enumerate() {
        // Add the key with bold styling
        text.push(Span::styled(*key, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)));

        // Add the description
        text.push(Span::raw(format!(": {description}")));

        // Add separator unless it's the last item
        if i < commands.len() - 1 {
            text.push(Span::raw(" | "));
        }
    }

    text
}

/// Split off a two-line footer holding the clock and key hints.
fn split_footer(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(2)])
        .split(area);
    (chunks[0], chunks[1])
}

fn draw_footer(f: &mut Frame, view: &LyricsView<'_>, area: Rect) {
    let clock = Line::from(format!(" ⏱  {}  [Ctrl+C to stop]", format_clock(view.elapsed)));
    let hints = Line::from(create_help_text(&[
        ("m", "Mode"),
        ("g", "Glitch"),
        ("f", "Flash"),
    ]));
    f.render_widget(
        Paragraph::new(vec![clock, hints]).style(Style::default().fg(Color::Gray)),
        area,
    );
}

/// A horizontal rule the width of the banners.
fn rule() -> Line<'static> {
    Line::from("=".repeat(crate::constants::render::RULE_WIDTH))
}

// Helper function to ensure the terminal is cleaned up on exit
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run `open`, calling `rollback` if it fails.
fn with_rollback<T>(open: impl FnOnce() -> Result<T>, rollback: impl FnOnce()) -> Result<T> {
    let result = open();
    if result.is_err() {
        rollback();
    }
    result
}

/// Switch `out` to the alternate screen and wrap it in a terminal.
fn open_screen<W: io::Write>(mut out: W) -> Result<Terminal<CrosstermBackend<W>>> {
    execute!(out, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(out))?)
}

/// Best-effort terminal restore, also used by the panic hook.
pub fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

/// Full-screen lyric display driven by [`crate::sync::SyncLoop`].
pub struct TerminalFrontend {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    options: RenderOptions,
    rng: ThreadRng,
}

impl TerminalFrontend {
    /// Take over the terminal: raw mode plus alternate screen.
    pub fn enter(options: RenderOptions) -> Result<Self> {
        enable_raw_mode()?;
        let terminal = with_rollback(|| open_screen(io::stdout()), restore_terminal)?;
        Ok(Self { terminal, options, rng: rand::thread_rng() })
    }
}

impl Frontend for TerminalFrontend {
    fn draw(&mut self, timeline: &LyricTimeline, elapsed: Duration) -> Result<()> {
        let view = LyricsView::new(timeline, elapsed, self.options, &mut self.rng);
        self.terminal.draw(|f| draw(f, &view))?;
        Ok(())
    }

    fn wait_for_stop(&mut self, timeout: Duration) -> Result<bool> {
        if !event::poll(timeout)? {
            return Ok(false);
        }
        if let Event::Key(key) = event::read()? {
            match handle_playback_key(key) {
                InputResult::Quit => return Ok(true),
                InputResult::CycleMode => self.options.mode = self.options.mode.next(),
                InputResult::ToggleGlitch => self.options.glitch = !self.options.glitch,
                InputResult::ToggleFlash => self.options.flash = !self.options.flash,
                InputResult::Ignored => {}
            }
        }
        Ok(false)
    }
}

impl Drop for TerminalFrontend {
    fn drop(&mut self) {
        if let Err(e) = cleanup_terminal(&mut self.terminal) {
            eprintln!("Error cleaning up terminal: {e:?}");
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    use super::{draw, LyricsView};

    /// Render a view into a fixed-size buffer.
    pub fn render_buffer(view: &LyricsView<'_>, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(f, view)).unwrap();
        terminal.backend().buffer().clone()
    }

    /// Text of each row of `buffer`.
    pub fn rows(buffer: &Buffer) -> Vec<String> {
        let area = buffer.area;
        (0..area.height)
            .map(|y| (0..area.width).map(|x| buffer.get(x, y).symbol()).collect::<String>())
            .collect()
    }

    /// Render a view into a fixed-size buffer and return its rows.
    pub fn render_rows(view: &LyricsView<'_>, width: u16, height: u16) -> Vec<String> {
        rows(&render_buffer(view, width, height))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    struct ClosedOutput;

    impl io::Write for ClosedOutput {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failed_screen_setup_rolls_back() {
        let mut rolled_back = false;
        let result = with_rollback(|| open_screen(ClosedOutput), || rolled_back = true);
        assert!(result.is_err());
        assert!(rolled_back);
    }

    #[test]
    fn successful_setup_keeps_state() {
        let mut rolled_back = false;
        assert_eq!(with_rollback(|| Ok(7), || rolled_back = true).unwrap(), 7);
        assert!(!rolled_back);
    }
}
