//! Card construction: one video record in, one renderable card out.
//!
//! `build_card` is a pure function with no I/O and no shared state, safe to
//! call any number of times for the same record. Every optional record field
//! has a defined fallback here, so a sparse record degrades instead of
//! failing.

use crate::storage::VideoRecord;
use crate::util::group_thousands;

/// Fixed placeholder for records with no view count at all.
pub const NO_VIEW_DATA: &str = "No view data";

/// One rendered gallery card.
///
/// Created once per record ever appended to the feed and never rebuilt.
/// After construction only two fields mutate: `visible` (the filter's
/// display toggle) and `columns` (rewritten by the grid sizer on resize).
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    /// Correlation key, copied from the record.
    pub id: String,
    /// Category used by the filter; a card without one only matches "all".
    pub category: Option<String>,
    /// Always present, possibly empty.
    pub title: String,
    /// Thumbnail alt text; synthesized from the id when the title is empty.
    pub thumb_alt: String,
    pub image_url: Option<String>,
    pub channel_name: Option<String>,
    /// Present iff the record carried a channel image.
    pub channel_thumb_alt: Option<String>,
    /// Pre-formatted view-count line.
    pub view_line: String,
    pub visible: bool,
    pub columns: usize,
}

/// Format the view-count line: a thousands-grouped count when present
/// (including zero), the fixed placeholder when absent.
pub fn format_view_line(view_count: Option<i64>) -> String {
    match view_count {
        Some(n) => format!("{} views", group_thousands(n.max(0) as u64)),
        None => NO_VIEW_DATA.to_string(),
    }
}

/// Build the card for one record.
///
/// `columns` is the current grid column count; cards built before the first
/// resize pass carry the initial value and are overwritten by the grid sizer.
pub fn build_card(record: &VideoRecord, columns: usize) -> Card {
    let thumb_alt = if record.title.is_empty() {
        format!("Video {}", record.id)
    } else {
        record.title.clone()
    };

    let channel_thumb_alt = record.channel_image_url.as_ref().map(|_| {
        format!(
            "{} thumbnail",
            record.channel_name.as_deref().unwrap_or("Channel")
        )
    });

    Card {
        id: record.id.clone(),
        category: record.category.clone(),
        title: record.title.clone(),
        thumb_alt,
        image_url: record.image_url.clone(),
        channel_name: record.channel_name.clone(),
        channel_thumb_alt,
        view_line: format_view_line(record.view_count),
        visible: true,
        columns,
    }
}
