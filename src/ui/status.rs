//! The status bar: transient messages on the left, feed counters on the right.

use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 10 {
        return;
    }

    let left = match app.status_message() {
        Some(message) => message.to_string(),
        None => "q quit · / search · Tab topic · ↑↓ scroll".to_string(),
    };

    let right = format!(
        "{}/{} videos · page {}",
        app.visible_count(),
        app.cards.len(),
        app.cursor.next_page().saturating_sub(1).max(1)
    );

    let gap = (area.width as usize)
        .saturating_sub(left.chars().count() + right.chars().count() + 1);

    let line = Line::from(vec![
        Span::styled(left, Style::default().fg(Color::Gray)),
        Span::raw(" ".repeat(gap)),
        Span::styled(right, Style::default().fg(Color::DarkGray)),
    ]);

    f.render_widget(Paragraph::new(line), area);
}
