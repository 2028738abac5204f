//! Main event loop for the TUI.
//!
//! This module contains the core event loop that multiplexes terminal input,
//! background task events, and periodic ticks.

use crate::app::{App, AppEvent};
use crate::gallery::RESIZE_DEBOUNCE;
use anyhow::Result;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};

use super::events::handle_app_event;
use super::input::handle_input;
use super::render::render;

/// Result of handling a key press event.
///
/// Returned by input handlers to signal whether the application should
/// continue running or terminate gracefully.
pub enum Action {
    /// Continue the event loop and process more events.
    Continue,
    /// Exit the application and restore the terminal.
    Quit,
}

/// Runs the TUI application event loop.
///
/// Uses `tokio::select!` to multiplex three event sources:
/// - **Terminal input**: Key presses and resizes from crossterm's async
///   event stream
/// - **Background tasks**: Feed page completions via the `AppEvent` channel
/// - **Periodic tick**: 250ms timer for status expiry and the debounced
///   grid recomputation
///
/// Before the first iteration the initial grid sizing runs and the first
/// feed page is requested, so the gallery starts loading without any user
/// input, and the scroll trigger takes over from there.
///
/// # Panic Safety
///
/// Installs a panic hook that restores terminal state before unwinding,
/// ensuring the terminal is not left in raw mode on panic.
pub async fn run(
    app: &mut App,
    event_tx: mpsc::Sender<AppEvent>,
    mut event_rx: mpsc::Receiver<AppEvent>,
) -> Result<()> {
    // Install panic hook BEFORE setting up terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let mut terminal = setup_terminal()?;
    let mut event_stream = crossterm::event::EventStream::new();

    // Startup: size the grid for the current terminal, then kick off the
    // first page load.
    let size = terminal.size()?;
    app.terminal_rows = size.height;
    app.update_grid_columns(size.width);
    app.initial_load(&event_tx);

    let mut tick_interval = tokio::time::interval(Duration::from_millis(250));

    // Signal handlers for graceful shutdown (Unix only)
    #[cfg(unix)]
    let mut sigterm = signal(SignalKind::terminate())?;
    #[cfg(unix)]
    let mut sigint = signal(SignalKind::interrupt())?;

    loop {
        if app.needs_redraw {
            terminal.draw(|f| render(f, app))?;
            app.needs_redraw = false;
        }

        if app.clear_expired_status() {
            app.needs_redraw = true;
        }

        // Drain all pending app events before waiting, so page completions
        // are folded in promptly even during rapid input.
        while let Ok(event) = event_rx.try_recv() {
            app.needs_redraw = true;
            handle_app_event(app, event, &event_tx);
        }

        #[cfg(unix)]
        let sigterm_fut = sigterm.recv();
        #[cfg(not(unix))]
        let sigterm_fut = std::future::pending::<Option<()>>();

        #[cfg(unix)]
        let sigint_fut = sigint.recv();
        #[cfg(not(unix))]
        let sigint_fut = std::future::pending::<Option<()>>();

        tokio::select! {
            biased;  // Process in order listed for predictable behavior

            _ = sigterm_fut => {
                tracing::info!("Received SIGTERM, shutting down gracefully");
                break;
            }

            _ = sigint_fut => {
                tracing::info!("Received SIGINT, shutting down gracefully");
                break;
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) => {
                        app.needs_redraw = true;
                        match handle_input(app, key.code, key.modifiers, &event_tx) {
                            Ok(Action::Quit) => break,
                            Ok(Action::Continue) => {}
                            Err(e) => app.set_status(format!("Error: {}", e)),
                        }
                    }
                    Some(Ok(Event::Resize(cols, rows))) => {
                        app.on_resize(cols, rows);
                    }
                    _ => {}
                }
            }

            Some(event) = event_rx.recv() => {
                app.needs_redraw = true;
                handle_app_event(app, event, &event_tx);
            }

            _ = tick_interval.tick() => {
                handle_tick(app, &event_tx);
            }
        }
    }

    restore_terminal(terminal)?;
    Ok(())
}

/// Handle periodic tick: apply a quiesced resize.
///
/// The grid recomputation is debounced: a resize only takes effect once no
/// further resize event has arrived for the full delay, so dragging a
/// terminal edge collapses into a single recomputation.
fn handle_tick(app: &mut App, event_tx: &mpsc::Sender<AppEvent>) {
    if let Some((armed_at, cols)) = app.resize_debounce {
        if armed_at.elapsed() >= RESIZE_DEBOUNCE {
            app.resize_debounce = None;
            app.update_grid_columns(cols);
            // A new column count reflows the grid; the sentinel may have
            // come into view.
            app.maybe_load(event_tx);
        }
    }
}

/// Set up the terminal for TUI rendering.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state.
fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
