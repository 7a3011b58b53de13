//! Keyboard handling during playback.
//!
//! Raw mode swallows `SIGINT`, so Ctrl+C arrives here as a key event like
//! any other and is mapped to [`InputResult::Quit`].

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Result of processing an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// The input was ignored (not bound to anything).
    Ignored,
    /// Stop playback.
    Quit,
    /// Switch to the next display mode.
    CycleMode,
    /// Toggle the glitch effect.
    ToggleGlitch,
    /// Toggle the flash effect.
    ToggleFlash,
}

/// Map a key press to a playback action.
pub fn handle_playback_key(key: KeyEvent) -> InputResult {
    if key.kind == KeyEventKind::Release {
        return InputResult::Ignored;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => InputResult::Quit,
        KeyCode::Char('q') | KeyCode::Esc => InputResult::Quit,
        KeyCode::Char('m') => InputResult::CycleMode,
        KeyCode::Char('g') => InputResult::ToggleGlitch,
        KeyCode::Char('f') => InputResult::ToggleFlash,
        _ => InputResult::Ignored,
    }
}
