//! Application event handling.
//!
//! Folds background task completions into the app state. The only producer
//! today is the feed loader; its page results land here in the order the
//! fetches finish, which, because at most one fetch is ever outstanding, is
//! also page order.

use tokio::sync::mpsc;

use crate::app::{App, AppEvent};

/// Handle application events from background tasks.
pub(super) fn handle_app_event(app: &mut App, event: AppEvent, event_tx: &mpsc::Sender<AppEvent>) {
    match event {
        AppEvent::FeedPageLoaded { page, result } => {
            let appended = app.apply_page_result(page, result);
            // Appending reflows the gallery: if the sentinel is still inside
            // the detection region (short store, tall terminal), keep
            // loading until the viewport is filled. Empty and failed pages
            // change no geometry and wait for the next user-driven trigger.
            if appended {
                app.maybe_load(event_tx);
            }
        }
    }
}
