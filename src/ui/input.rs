//! Keyboard input handling.
//!
//! Keys map onto the semantic actions of the gallery: topic selection,
//! search submission, and scrolling. Every scroll movement re-evaluates the
//! sentinel; the loader's own guard makes rapid re-evaluation safe.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc;

use crate::app::{App, AppEvent};

use super::loop_runner::Action;

/// Maximum accepted search input length.
const MAX_SEARCH_LENGTH: usize = 256;

pub(super) fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<Action> {
    // Ctrl+C always quits, regardless of mode
    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        return Ok(Action::Quit);
    }

    if app.search_mode {
        return handle_search_input(app, code, event_tx);
    }

    match code {
        KeyCode::Char('q') | KeyCode::Esc => return Ok(Action::Quit),

        KeyCode::Char('/') => {
            app.search_mode = true;
        }

        // Topic bar: Tab cycles forward, Shift+Tab back, digits jump
        KeyCode::Tab => {
            let next = (app.selected_topic + 1) % app.topics.len();
            app.on_category_selected(next);
            app.maybe_load(event_tx);
        }
        KeyCode::BackTab => {
            let prev = (app.selected_topic + app.topics.len() - 1) % app.topics.len();
            app.on_category_selected(prev);
            app.maybe_load(event_tx);
        }
        KeyCode::Char(c @ '1'..='9') => {
            let index = (c as u8 - b'1') as usize;
            if index < app.topics.len() {
                app.on_category_selected(index);
                app.maybe_load(event_tx);
            }
        }

        // Scrolling, one card row at a time
        KeyCode::Down | KeyCode::Char('j') => {
            app.scroll_by(1);
            app.maybe_load(event_tx);
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.scroll_by(-1);
            app.maybe_load(event_tx);
        }
        KeyCode::PageDown => {
            app.scroll_by(app.rows_in_view() as i64);
            app.maybe_load(event_tx);
        }
        KeyCode::PageUp => {
            app.scroll_by(-(app.rows_in_view() as i64));
            app.maybe_load(event_tx);
        }
        KeyCode::Home | KeyCode::Char('g') => {
            app.scroll_to_top();
        }
        KeyCode::End | KeyCode::Char('G') => {
            app.scroll_to_bottom();
            app.maybe_load(event_tx);
        }

        _ => {}
    }

    Ok(Action::Continue)
}

/// Input handling while the search prompt is active.
///
/// The filter only changes on Enter; typing edits the buffer, nothing
/// more. Esc leaves the prompt with the buffer intact and the previously
/// submitted term still in force.
fn handle_search_input(
    app: &mut App,
    code: KeyCode,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<Action> {
    match code {
        KeyCode::Esc => {
            app.search_mode = false;
        }
        KeyCode::Enter => {
            app.on_search_submitted();
            // Filtering can pull the sentinel into view
            app.maybe_load(event_tx);
        }
        KeyCode::Backspace => {
            app.search_input.pop();
        }
        KeyCode::Char(c) => {
            if app.search_input.len() < MAX_SEARCH_LENGTH {
                app.search_input.push(c);
            }
        }
        _ => {}
    }

    Ok(Action::Continue)
}
