//! Responsive column count.
//!
//! The breakpoint table is defined over logical pixel widths; the terminal
//! viewport maps into pixel space through a fixed cell-width constant so the
//! same thresholds drive both. Recomputation happens once at startup and
//! after every resize, debounced by a fixed quiescence delay.

use std::time::Duration;

use super::card::Card;

/// Quiescence delay before a resize is acted on. Rapid resize events
/// collapse into a single recomputation after the user stops resizing.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(250);

/// Logical pixels per terminal cell, used to map terminal columns onto the
/// pixel breakpoints. Overridable via config for unusual fonts.
pub const DEFAULT_CELL_WIDTH_PX: u32 = 8;

/// Column count before the first sizing pass runs; matches the initial
/// per-card value and is overwritten immediately at startup.
pub const INITIAL_COLUMNS: usize = 6;

/// Shared layout state for the gallery container.
#[derive(Debug, Clone, Copy)]
pub struct GridState {
    pub columns: usize,
}

impl GridState {
    pub fn new() -> Self {
        Self {
            columns: INITIAL_COLUMNS,
        }
    }
}

impl Default for GridState {
    fn default() -> Self {
        Self::new()
    }
}

/// Breakpoint table, boundary-inclusive on the lower side:
/// `<600 → 2, <900 → 3, <1200 → 4, else → 6`.
pub fn columns_for_width(width_px: u32) -> usize {
    if width_px < 600 {
        2
    } else if width_px < 900 {
        3
    } else if width_px < 1200 {
        4
    } else {
        6
    }
}

/// Map a terminal width in cells to a column count.
pub fn columns_for_terminal(cells: u16, cell_width_px: u32) -> usize {
    columns_for_width(cells as u32 * cell_width_px)
}

/// Propagate a freshly computed column count: once to the shared grid state
/// and, redundantly, onto every rendered card's own column attribute.
pub fn apply_columns(grid: &mut GridState, cards: &mut [Card], columns: usize) {
    grid.columns = columns;
    for card in cards.iter_mut() {
        card.columns = columns;
    }
}
