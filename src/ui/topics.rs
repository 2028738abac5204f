//! The topic bar: one button per category, selection applies immediately.

use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the topic bar.
pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 3 {
        return;
    }

    let selected = Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let normal = Style::default().fg(Color::Gray);

    let mut spans = Vec::with_capacity(app.topics.len() * 2 + 1);
    for (i, topic) in app.topics.iter().enumerate() {
        let style = if i == app.selected_topic { selected } else { normal };
        spans.push(Span::styled(format!(" {} ", topic), style));
        spans.push(Span::raw(" "));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
