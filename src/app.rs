//! Application state for the gallery TUI.
//!
//! All mutable feed state (the card set, the page cursor, the filter, the
//! grid) lives here and is only ever touched from the event-loop task.
//! Background fetches report back through [`AppEvent`], so every mutation
//! happens between `select!` arms, never concurrently.

use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::feed::{self, FeedClient, FeedCursor, FeedError};
use crate::gallery::{
    apply_columns, apply_filters, build_card, columns_for_terminal, Card, FilterState, GridState,
};
use crate::server::FeedPage;

// ============================================================================
// Layout Constants
// ============================================================================

/// Terminal rows one card occupies, borders included.
pub const CARD_HEIGHT: u16 = 7;

/// Rows taken by fixed chrome around the gallery: topic bar, search bar,
/// status bar.
pub const CHROME_ROWS: u16 = 3;

/// Pre-trigger margin, in card rows, by which the sentinel counts as visible
/// before it geometrically enters the viewport.
pub const SENTINEL_MARGIN_ROWS: usize = 1;

/// How long a transient status message stays on screen.
const STATUS_TTL: std::time::Duration = std::time::Duration::from_secs(4);

// ============================================================================
// Events
// ============================================================================

/// Events from background tasks
pub enum AppEvent {
    /// One feed page fetch finished, successfully or not.
    FeedPageLoaded {
        page: u32,
        result: Result<FeedPage, FeedError>,
    },
}

// ============================================================================
// App State
// ============================================================================

pub struct App {
    pub client: FeedClient,

    /// Every card ever appended, in feed order. Append-only for the session.
    pub cards: Vec<Card>,
    pub cursor: FeedCursor,
    pub filter: FilterState,
    pub grid: GridState,

    /// Topic bar entries; index 0 is always "all".
    pub topics: Vec<String>,
    pub selected_topic: usize,

    pub search_mode: bool,
    pub search_input: String,

    /// First visible card row (scroll position, in card rows).
    pub scroll_row: usize,

    pub terminal_cols: u16,
    pub terminal_rows: u16,
    pub cell_width_px: u32,

    /// Pending debounced resize: the last resize event's time and width.
    pub resize_debounce: Option<(Instant, u16)>,

    /// Inline load-failure indicator shown at the sentinel row.
    pub load_error: Option<String>,

    status: Option<(String, Instant)>,
    pub needs_redraw: bool,
}

impl App {
    pub fn new(client: FeedClient, topics: Vec<String>, cell_width_px: u32) -> Self {
        Self {
            client,
            cards: Vec::new(),
            cursor: FeedCursor::new(),
            filter: FilterState::default(),
            grid: GridState::new(),
            topics,
            selected_topic: 0,
            search_mode: false,
            search_input: String::new(),
            scroll_row: 0,
            terminal_cols: 0,
            terminal_rows: 0,
            cell_width_px,
            resize_debounce: None,
            load_error: None,
            status: None,
            needs_redraw: true,
        }
    }

    // ========================================================================
    // Geometry
    // ========================================================================

    pub fn visible_count(&self) -> usize {
        self.cards.iter().filter(|c| c.visible).count()
    }

    /// Card rows occupied by the visible card set. Hidden cards take no
    /// space, so the sentinel sits right after the visible rows.
    pub fn total_card_rows(&self) -> usize {
        let columns = self.grid.columns.max(1);
        self.visible_count().div_ceil(columns)
    }

    /// Card rows that fit in the gallery area of the current terminal.
    pub fn rows_in_view(&self) -> usize {
        let gallery_rows = self.terminal_rows.saturating_sub(CHROME_ROWS);
        ((gallery_rows / CARD_HEIGHT) as usize).max(1)
    }

    /// Row index of the sentinel: the virtual row immediately after the last
    /// visible card row.
    pub fn sentinel_row(&self) -> usize {
        self.total_card_rows()
    }

    /// Whether the sentinel is inside the expanded detection region. Any
    /// nonzero overlap counts; the margin fires the trigger slightly early.
    pub fn sentinel_visible(&self) -> bool {
        self.sentinel_row() < self.scroll_row + self.rows_in_view() + SENTINEL_MARGIN_ROWS
    }

    fn max_scroll(&self) -> usize {
        // The sentinel row itself is scrollable into view
        (self.total_card_rows() + 1).saturating_sub(self.rows_in_view())
    }

    pub fn scroll_by(&mut self, delta: i64) {
        let current = self.scroll_row as i64;
        self.scroll_row = (current + delta).clamp(0, self.max_scroll() as i64) as usize;
        self.needs_redraw = true;
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_row = 0;
        self.needs_redraw = true;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_row = self.max_scroll();
        self.needs_redraw = true;
    }

    fn clamp_scroll(&mut self) {
        self.scroll_row = self.scroll_row.min(self.max_scroll());
    }

    // ========================================================================
    // Feed Loading
    // ========================================================================

    /// Evaluate the scroll trigger: start a load iff the sentinel is visible.
    /// The duplicate-invocation guard lives in the cursor, so calling this on
    /// every scroll event is safe.
    pub fn maybe_load(&mut self, event_tx: &mpsc::Sender<AppEvent>) {
        if !self.sentinel_visible() {
            return;
        }
        if feed::request_page(&mut self.cursor, &self.client, event_tx) {
            self.load_error = None;
            self.needs_redraw = true;
        }
    }

    /// Start the initial page load unconditionally, mirroring the first
    /// fetch the page issues before any scrolling happens.
    pub fn initial_load(&mut self, event_tx: &mpsc::Sender<AppEvent>) {
        feed::request_page(&mut self.cursor, &self.client, event_tx);
    }

    /// Fold one completed fetch back into the app state.
    ///
    /// Success with records: build one card per record in array order, append
    /// before the sentinel, advance the cursor. The new cards arrive visible
    /// regardless of the active filter; visibility is only recomputed on the
    /// two filter triggers. Success with an empty page is the end-of-feed
    /// steady state. Failure surfaces the inline indicator and leaves the
    /// cursor on the same page for a retried trigger.
    ///
    /// Returns true iff cards were appended. Only an append re-evaluates the
    /// scroll trigger: an empty or failed page changes no geometry, and
    /// re-triggering on it would spin on the same page.
    pub fn apply_page_result(&mut self, page: u32, result: Result<FeedPage, FeedError>) -> bool {
        self.needs_redraw = true;
        match result {
            Ok(feed_page) if !feed_page.data.is_empty() => {
                let count = feed_page.data.len();
                self.cards.extend(
                    feed_page
                        .data
                        .iter()
                        .map(|record| build_card(record, self.grid.columns)),
                );
                self.cursor.finish(true);
                tracing::debug!(page, count, total = self.cards.len(), "Appended feed page");
                true
            }
            Ok(_) => {
                // End of feed; the trigger may keep firing and keep landing here.
                self.cursor.finish(false);
                tracing::debug!(page, "Feed page empty, end of feed");
                false
            }
            Err(e) => {
                self.cursor.finish(false);
                tracing::warn!(error = %e, page, "Feed page load failed");
                self.load_error = Some("Failed to load feed".to_string());
                self.set_status(format!("Load failed: {}", e));
                false
            }
        }
    }

    // ========================================================================
    // Semantic UI Actions
    // ========================================================================

    /// A topic-bar category was selected.
    pub fn on_category_selected(&mut self, index: usize) {
        if index >= self.topics.len() {
            return;
        }
        self.selected_topic = index;
        let category = self.topics[index].clone();
        self.filter.select_category(&category);
        apply_filters(&self.filter, &mut self.cards);
        self.clamp_scroll();
        self.needs_redraw = true;
    }

    /// The search input was submitted.
    pub fn on_search_submitted(&mut self) {
        let raw = self.search_input.clone();
        self.filter.submit_search(&raw);
        apply_filters(&self.filter, &mut self.cards);
        self.search_mode = false;
        self.clamp_scroll();
        self.needs_redraw = true;
    }

    /// A terminal resize arrived; arm the debounce instead of recomputing
    /// immediately. The tick handler applies it after the quiescence delay.
    pub fn on_resize(&mut self, cols: u16, rows: u16) {
        self.terminal_rows = rows;
        self.resize_debounce = Some((Instant::now(), cols));
        self.needs_redraw = true;
    }

    /// Recompute the column count for the given terminal width and propagate
    /// it to the grid and every rendered card.
    pub fn update_grid_columns(&mut self, cols: u16) {
        self.terminal_cols = cols;
        let columns = columns_for_terminal(cols, self.cell_width_px);
        apply_columns(&mut self.grid, &mut self.cards, columns);
        self.clamp_scroll();
        self.needs_redraw = true;
    }

    // ========================================================================
    // Status Line
    // ========================================================================

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some((message.into(), Instant::now()));
        self.needs_redraw = true;
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status.as_ref().map(|(m, _)| m.as_str())
    }

    /// Drop an expired status message; returns true if one was cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, set_at)) = self.status {
            if set_at.elapsed() >= STATUS_TTL {
                self.status = None;
                return true;
            }
        }
        false
    }
}
