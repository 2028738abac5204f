//! The incremental feed loader.
//!
//! A two-state machine (`Idle`/`Loading`) around a 1-based page cursor.
//! Exactly one fetch may be in flight: re-invocation while loading is a
//! no-op, which is what makes rapid sentinel triggers safe. The page number
//! only advances after a successful, non-empty append, so page N's cards
//! always precede page N+1's in the gallery.

use tokio::sync::mpsc;

use crate::app::AppEvent;

use super::client::FeedClient;

/// The loader's owned state for one page session.
#[derive(Debug)]
pub struct FeedCursor {
    next_page: u32,
    loading: bool,
}

impl FeedCursor {
    pub fn new() -> Self {
        Self {
            next_page: 1,
            loading: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn next_page(&self) -> u32 {
        self.next_page
    }

    /// Enter the loading state, returning the page to fetch.
    ///
    /// Returns `None` when a fetch is already outstanding; the caller must
    /// treat that as "do nothing", not as an error.
    pub fn begin(&mut self) -> Option<u32> {
        if self.loading {
            return None;
        }
        self.loading = true;
        Some(self.next_page)
    }

    /// Leave the loading state. `advanced` is true only for a successful,
    /// non-empty append; empty pages and failures keep the cursor in place
    /// so the next trigger retries the same page.
    pub fn finish(&mut self, advanced: bool) {
        self.loading = false;
        if advanced {
            self.next_page += 1;
        }
    }
}

impl Default for FeedCursor {
    fn default() -> Self {
        Self::new()
    }
}

/// Kick off a fetch of the cursor's next page unless one is already running.
///
/// The fetch runs as a background task; its outcome comes back to the event
/// loop as [`AppEvent::FeedPageLoaded`]. Returns whether a load was started.
pub fn request_page(
    cursor: &mut FeedCursor,
    client: &FeedClient,
    event_tx: &mpsc::Sender<AppEvent>,
) -> bool {
    let Some(page) = cursor.begin() else {
        tracing::trace!("Load already in flight, ignoring trigger");
        return false;
    };

    tracing::debug!(page, "Requesting feed page");

    let client = client.clone();
    let tx = event_tx.clone();
    tokio::spawn(async move {
        let result = client.fetch_page(page).await;
        if let Err(e) = tx.send(AppEvent::FeedPageLoaded { page, result }).await {
            tracing::warn!(error = %e, page, "Failed to deliver feed page (receiver dropped)");
        }
    });

    true
}
