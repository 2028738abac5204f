//! Deterministic demo data for the video store.
//!
//! The upstream deployment ships a pre-populated database; for local runs the
//! `--seed N` flag generates an equivalent corpus. Generation is a pure
//! function of the record index, so reseeding produces identical rows and the
//! upsert in `insert_video` keeps the operation idempotent.

use anyhow::Result;

use super::schema::Database;
use super::types::VideoRecord;

/// Topics the demo corpus cycles through; mirrored by the default topic bar.
pub const DEMO_TOPICS: &[&str] = &["music", "gaming", "news", "sports", "tech"];

const TITLE_SUBJECTS: &[&str] = &[
    "Morning Routine",
    "Speedrun Highlights",
    "Street Interview",
    "Match Recap",
    "Keyboard Build",
    "Synth Jam",
    "Ranked Climb",
    "Press Briefing",
    "Training Camp",
    "Code Review",
];

const TITLE_QUALIFIERS: &[&str] = &[
    "Explained",
    "in 10 Minutes",
    "Gone Wrong",
    "Live",
    "Behind the Scenes",
    "You Missed",
    "From Scratch",
];

const CHANNELS: &[&str] = &[
    "Daily Loop",
    "PixelForge",
    "The Wire Desk",
    "Half Court",
    "Solder & Co",
];

/// Build the demo record for index `i`.
///
/// Field presence varies on fixed strides so the optional-field fallbacks in
/// the card builder are all reachable from seeded data:
/// - every 9th record has no view count (NULL, not zero),
/// - every 11th has a zero view count,
/// - every 4th has no channel image,
/// - every 13th has no channel name,
/// - every 17th has no thumbnail.
pub fn demo_video(i: usize) -> VideoRecord {
    let id = format!("video-{:05}", i);
    let subject = TITLE_SUBJECTS[i % TITLE_SUBJECTS.len()];
    let qualifier = TITLE_QUALIFIERS[i % TITLE_QUALIFIERS.len()];
    let channel = CHANNELS[i % CHANNELS.len()];
    let category = DEMO_TOPICS[i % DEMO_TOPICS.len()];

    let view_count = if i % 9 == 3 {
        None
    } else if i % 11 == 5 {
        Some(0)
    } else {
        // Spread across a few orders of magnitude so thousands grouping shows
        Some(((i as i64 * 7919) % 4_000_000) + 12)
    };

    VideoRecord {
        id: id.clone(),
        title: format!("{} {} #{}", subject, qualifier, i),
        category: Some(category.to_string()),
        image_url: if i % 17 == 8 {
            None
        } else {
            Some(format!("https://cdn.example.com/thumbs/{}.jpg", id))
        },
        channel_name: if i % 13 == 6 {
            None
        } else {
            Some(channel.to_string())
        },
        channel_image_url: if i % 4 == 0 {
            None
        } else {
            Some(format!(
                "https://cdn.example.com/channels/{}.png",
                channel.to_lowercase().replace([' ', '&'], "-")
            ))
        },
        view_count,
    }
}

/// Insert `count` demo records, returning how many were written.
pub async fn seed_demo_videos(db: &Database, count: usize) -> Result<usize> {
    for i in 0..count {
        db.insert_video(&demo_video(i)).await?;
    }
    tracing::info!(count, "Seeded demo videos");
    Ok(count)
}
