//! The card grid and its sentinel row.
//!
//! Lays out the visible cards in `grid.columns` equal-width cells per card
//! row, starting at the current scroll row. Hidden cards occupy no space, so
//! the sentinel, rendered as the row right after the last visible card
//! row, moves up as the filter narrows.

use crate::app::{App, CARD_HEIGHT};
use crate::gallery::Card;
use crate::util::truncate_to_width;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the gallery area: card rows from the scroll position down, then
/// the sentinel.
pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 10 || area.height < 1 {
        return;
    }

    let columns = app.grid.columns.max(1);
    let visible: Vec<&Card> = app.cards.iter().filter(|c| c.visible).collect();
    let total_rows = visible.len().div_ceil(columns);

    if visible.is_empty() && !app.cards.is_empty() {
        let msg = Paragraph::new("No videos match the current filter")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(msg, Rect::new(area.x, area.y, area.width, 1));
        if area.height > 1 {
            render_sentinel(f, app, Rect::new(area.x, area.y + 1, area.width, 1));
        }
        return;
    }

    let mut slot: u16 = 0;
    for row_idx in app.scroll_row.. {
        let row_y = area.y + slot * CARD_HEIGHT;
        if row_y >= area.y + area.height {
            break;
        }

        if row_idx < total_rows {
            let height = CARD_HEIGHT.min(area.y + area.height - row_y);
            let row_area = Rect::new(area.x, row_y, area.width, height);
            render_card_row(f, &visible, row_idx, columns, row_area);
        } else if row_idx == total_rows {
            render_sentinel(f, app, Rect::new(area.x, row_y, area.width, 1));
            break;
        } else {
            break;
        }

        slot += 1;
    }
}

/// One row of up to `columns` cards.
fn render_card_row(f: &mut Frame, visible: &[&Card], row_idx: usize, columns: usize, area: Rect) {
    let constraints: Vec<Constraint> =
        (0..columns).map(|_| Constraint::Ratio(1, columns as u32)).collect();
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (col, cell) in cells.iter().enumerate() {
        let index = row_idx * columns + col;
        if let Some(card) = visible.get(index) {
            render_card(f, card, *cell);
        }
    }
}

/// One card: bordered block with a thumbnail placeholder, the title line,
/// the channel line, and the view-count line.
fn render_card(f: &mut Frame, card: &Card, area: Rect) {
    if area.width < 6 || area.height < 3 {
        return;
    }

    let inner_width = area.width.saturating_sub(4) as usize;

    let thumb_style = Style::default().fg(Color::Black).bg(Color::DarkGray);
    let mut lines: Vec<Line> = if card.image_url.is_some() {
        vec![
            Line::from(Span::styled(" ".repeat(inner_width + 2), thumb_style)),
            Line::from(Span::styled(
                format!(" {:<width$} ", truncate_to_width(&card.thumb_alt, inner_width), width = inner_width),
                thumb_style,
            )),
        ]
    } else {
        vec![
            Line::default(),
            Line::from(Span::styled(
                "no thumbnail",
                Style::default().fg(Color::DarkGray),
            )),
        ]
    };

    lines.push(Line::from(Span::styled(
        truncate_to_width(&card.title, inner_width + 2),
        Style::default().add_modifier(Modifier::BOLD),
    )));

    let channel_line = match (&card.channel_thumb_alt, &card.channel_name) {
        (Some(_), Some(name)) => Line::from(vec![
            Span::styled("◉ ", Style::default().fg(Color::Blue)),
            Span::styled(
                truncate_to_width(name, inner_width),
                Style::default().fg(Color::Gray),
            ),
        ]),
        (Some(_), None) => Line::from(Span::styled("◉", Style::default().fg(Color::Blue))),
        (None, Some(name)) => Line::from(Span::styled(
            truncate_to_width(name, inner_width + 2),
            Style::default().fg(Color::Gray),
        )),
        (None, None) => Line::default(),
    };
    lines.push(channel_line);

    lines.push(Line::from(Span::styled(
        truncate_to_width(&card.view_line, inner_width + 2),
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(paragraph, area);
}

/// The sentinel row under the last card row: loading, inline error, or the
/// idle marker.
fn render_sentinel(f: &mut Frame, app: &App, area: Rect) {
    let line = if app.cursor.is_loading() {
        Line::from(Span::styled(
            "Loading more videos…",
            Style::default().fg(Color::Yellow),
        ))
    } else if let Some(error) = &app.load_error {
        Line::from(Span::styled(
            format!("{} (scroll to retry)", error),
            Style::default().fg(Color::Red),
        ))
    } else {
        Line::from(Span::styled("· · ·", Style::default().fg(Color::DarkGray)))
    };

    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}
