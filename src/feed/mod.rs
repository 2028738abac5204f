mod client;
mod loader;

pub use client::{FeedClient, FeedError};
pub use loader::{request_page, FeedCursor};
