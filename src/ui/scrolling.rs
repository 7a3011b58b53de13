use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{draw_footer, rule, split_footer, LyricsView};
use crate::constants::render::{CONTEXT_AFTER, CONTEXT_BEFORE};

/// Lines `current - 1 ..= current + 3`, current one marked and set apart.
pub fn draw(f: &mut Frame, view: &LyricsView<'_>) {
    let (main, footer) = split_footer(f.size());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(1)])
        .split(main);

    let header = Paragraph::new(vec![rule(), Line::from("🎵 NOW PLAYING"), rule()]);
    f.render_widget(header, chunks[0]);

    let lines = view.timeline.lines();
    let current = view.timeline.current();
    let start = current.saturating_sub(CONTEXT_BEFORE);
    let end = (current + CONTEXT_AFTER + 1).min(lines.len());

    let mut body = Vec::new();
    for (i, line) in lines.iter().enumerate().take(end).skip(start) {
        if i == current {
            body.push(Line::default());
            body.push(Line::from(Span::styled(
                format!("  ► {}", view.highlight),
                view.options.highlight_style(),
            )));
            body.push(Line::default());
        } else {
            body.push(Line::from(Span::styled(
                format!("    {}", line.text),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }
    f.render_widget(Paragraph::new(body), chunks[1]);

    draw_footer(f, view, footer);
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use std::time::Duration;

    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use ratatui::style::{Color, Modifier};

    use crate::lyrics::LyricLine;
    use crate::sync::LyricTimeline;
    use crate::types::DisplayMode;
    use crate::ui::test_support::{render_buffer, render_rows, rows};
    use crate::ui::{LyricsView, RenderOptions};

    fn options(glitch: bool, flash: bool) -> RenderOptions {
        RenderOptions { mode: DisplayMode::Scrolling, glitch, flash }
    }

    fn row_of(rows: &[String], needle: &str) -> u16 {
        let y = rows.iter().position(|r| r.contains(needle)).unwrap();
        u16::try_from(y).unwrap()
    }

    fn is_combining(c: char) -> bool {
        ('\u{300}'..='\u{36f}').contains(&c)
    }

    fn timeline(at: f64) -> LyricTimeline {
        let mut t = LyricTimeline::new(
            (0..10).map(|i| LyricLine::new(f64::from(i), format!("line {i}"))).collect(),
        );
        t.advance(Duration::from_secs_f64(at));
        t
    }

    #[test]
    fn shows_context_window() {
        let t = timeline(4.2);
        let view = LyricsView {
            timeline: &t,
            elapsed: Duration::from_secs_f64(4.2),
            options: RenderOptions { mode: DisplayMode::Scrolling, glitch: false, flash: false },
            highlight: "line 4".to_string(),
        };
        let rows = render_rows(&view, 60, 24);
        let screen = rows.join("\n");

        assert!(screen.contains("NOW PLAYING"));
        assert!(screen.contains("► line 4"));
        for visible in ["line 3", "line 5", "line 7"] {
            assert!(screen.contains(visible), "{visible} missing");
        }
        assert!(!screen.contains("line 2"));
        assert!(!screen.contains("line 8"));
        assert!(screen.contains("00:04"));
        assert!(screen.contains("[Ctrl+C to stop]"));
    }

    #[test]
    fn window_clamps_at_start() {
        let t = timeline(0.0);
        let view = LyricsView {
            timeline: &t,
            elapsed: Duration::ZERO,
            options: RenderOptions { mode: DisplayMode::Scrolling, glitch: false, flash: true },
            highlight: "line 0".to_string(),
        };
        let screen = render_rows(&view, 60, 24).join("\n");
        assert!(screen.contains("► line 0"));
        assert!(screen.contains("line 3"));
        assert!(!screen.contains("line 4"));
    }

    #[test]
    fn current_line_bold_cyan_others_gray() {
        let t = timeline(4.2);
        let mut rng = StdRng::seed_from_u64(1);
        let view = LyricsView::new(&t, Duration::from_secs_f64(4.2), options(false, false), &mut rng);
        let buffer = render_buffer(&view, 60, 24);
        let rows = rows(&buffer);

        // "  ► line 4": the marker sits at column 2
        let current = buffer.get(2, row_of(&rows, "► line 4")).style();
        assert_eq!(current.fg, Some(Color::Cyan));
        assert!(current.add_modifier.contains(Modifier::BOLD));

        // "    line 5": text starts at column 4
        let other = buffer.get(4, row_of(&rows, "line 5")).style();
        assert_eq!(other.fg, Some(Color::DarkGray));
        assert!(!other.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn flash_turns_highlight_bold_white() {
        let t = timeline(4.2);
        let mut rng = StdRng::seed_from_u64(1);
        let view = LyricsView::new(&t, Duration::from_secs_f64(4.2), options(false, true), &mut rng);
        let buffer = render_buffer(&view, 60, 24);
        let rows = rows(&buffer);

        let current = buffer.get(2, row_of(&rows, "► line 4")).style();
        assert_eq!(current.fg, Some(Color::White));
        assert!(current.add_modifier.contains(Modifier::BOLD));
        assert_eq!(buffer.get(4, row_of(&rows, "line 3")).style().fg, Some(Color::DarkGray));
    }

    #[test]
    fn glitch_touches_only_current_line() {
        let long = "x".repeat(40);
        let mut t = LyricTimeline::new(vec![
            LyricLine::new(0.0, "before"),
            LyricLine::new(1.0, long.clone()),
            LyricLine::new(2.0, "after one"),
            LyricLine::new(3.0, "after two"),
        ]);
        t.advance(Duration::from_secs_f64(1.5));

        let mut rng = StdRng::seed_from_u64(9);
        let view = LyricsView::new(&t, Duration::from_secs_f64(1.5), options(true, false), &mut rng);
        assert_ne!(view.highlight, long);
        assert_eq!(view.highlight.chars().filter(|c| !is_combining(*c)).collect::<String>(), long);

        let rows = render_rows(&view, 60, 24);
        let current = &rows[usize::from(row_of(&rows, "► x"))];
        assert!(current.chars().any(is_combining));
        for other in ["before", "after one", "after two"] {
            let row = &rows[usize::from(row_of(&rows, other))];
            assert!(!row.chars().any(is_combining), "{other} was glitched");
        }
    }
}
