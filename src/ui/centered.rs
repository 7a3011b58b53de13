use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::{draw_footer, split_footer, LyricsView};

/// Only the current line, in the middle of the screen.
pub fn draw(f: &mut Frame, view: &LyricsView<'_>) {
    let (main, footer) = split_footer(f.size());

    if view.timeline.current_line().is_some() {
        let padding = left_padding(&view.highlight, main.width);
        let line = Line::from(vec![
            Span::raw(" ".repeat(padding)),
            Span::styled(view.highlight.as_str(), view.options.highlight_style()),
        ]);
        let row = Rect { y: main.y + main.height / 2, height: main.height.min(1), ..main };
        f.render_widget(Paragraph::new(line), row);
    }

    draw_footer(f, view, footer);
}

/// Columns to skip so `text` sits centered in `width` cells.
pub fn left_padding(text: &str, width: u16) -> usize {
    usize::from(width).saturating_sub(text.width()) / 2
}
