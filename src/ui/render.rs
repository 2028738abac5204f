//! Render functions for the TUI.
//!
//! One fixed vertical layout: topic bar, search line, the card grid with its
//! sentinel row, and the status bar.

use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{gallery, status, topics};

/// Minimum terminal dimensions required for normal operation.
const MIN_WIDTH: u16 = 40;
const MIN_HEIGHT: u16 = 12;

/// Main render dispatch function.
pub(super) fn render(f: &mut Frame, app: &App) {
    let area = f.area();

    // Guard against zero-size areas to prevent panics
    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
        };
        f.render_widget(msg, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    topics::render(f, app, chunks[0]);
    render_search_line(f, app, chunks[1]);
    gallery::render(f, app, chunks[2]);
    status::render(f, app, chunks[3]);
}

/// The search line: an active prompt while typing, otherwise the submitted
/// term (or a hint when none is active).
fn render_search_line(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let line = if app.search_mode {
        Line::from(vec![
            Span::styled("/", Style::default().fg(Color::Yellow)),
            Span::raw(app.search_input.as_str()),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ])
    } else if !app.filter.search_term.is_empty() {
        Line::from(vec![
            Span::styled("Search: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                app.filter.search_term.as_str(),
                Style::default().fg(Color::Yellow),
            ),
        ])
    } else {
        Line::from(Span::styled(
            "Press / to search titles",
            Style::default().fg(Color::DarkGray),
        ))
    };

    f.render_widget(Paragraph::new(line), area);
}
