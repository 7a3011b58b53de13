use ratatui::{
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{draw_footer, rule, split_footer, LyricsView};

/// Every line of the song; the view follows the current one.
pub fn draw(f: &mut Frame, view: &LyricsView<'_>) {
    let (main, footer) = split_footer(f.size());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(1)])
        .split(main);

    f.render_widget(Paragraph::new(vec![rule(), Line::from("🎵 LYRICS"), rule()]), chunks[0]);

    let current = view.timeline.current();
    let body: Vec<Line> = view
        .timeline
        .lines()
        .iter()
        .enumerate()
        .map(|(i, line)| {
            if i == current {
                Line::from(Span::styled(format!("  ► {}", view.highlight), view.options.highlight_style()))
            } else {
                Line::from(format!("    {}", line.text))
            }
        })
        .collect();

    let offset = scroll_offset(current, body.len(), usize::from(chunks[1].height));
    let offset = u16::try_from(offset).unwrap_or(u16::MAX);
    f.render_widget(Paragraph::new(body).scroll((offset, 0)), chunks[1]);

    draw_footer(f, view, footer);
}

/// First visible row keeping `current` near the middle without scrolling past the end.
pub fn scroll_offset(current: usize, total: usize, height: usize) -> usize {
    if total <= height {
        return 0;
    }
    current.saturating_sub(height / 2).min(total - height)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use std::time::Duration;

    use super::*;
    use crate::lyrics::LyricLine;
    use crate::sync::LyricTimeline;
    use crate::types::DisplayMode;
    use crate::ui::test_support::render_rows;
    use crate::ui::RenderOptions;

    #[test]
    fn offset_centers_then_clamps() {
        assert_eq!(scroll_offset(3, 5, 10), 0);
        assert_eq!(scroll_offset(2, 40, 10), 0);
        assert_eq!(scroll_offset(20, 40, 10), 15);
        assert_eq!(scroll_offset(39, 40, 10), 30);
    }

    #[test]
    fn current_line_stays_visible() {
        let mut t = LyricTimeline::new(
            (0..50).map(|i| LyricLine::new(f64::from(i), format!("verse {i}"))).collect(),
        );
        t.advance(Duration::from_secs_f64(45.5));
        let view = LyricsView {
            timeline: &t,
            elapsed: Duration::from_secs_f64(45.5),
            options: RenderOptions { mode: DisplayMode::List, glitch: false, flash: false },
            highlight: "verse 45".to_string(),
        };
        let screen = render_rows(&view, 40, 20).join("\n");
        assert!(screen.contains("► verse 45"));
        assert!(screen.contains("verse 49"));
        assert!(!screen.contains("verse 0 "));
    }
}
