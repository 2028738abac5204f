//! vidgrid: a terminal video gallery with incremental scroll loading.
//!
//! One process hosts both halves of the system: an axum feed API serving
//! fixed-size pages of video records out of SQLite, and a ratatui gallery
//! that consumes those pages through the incremental feed pipeline: a
//! guarded page-cursor loader, pure card construction, a viewport sentinel
//! that drives loading, a client-side category/text filter, and a
//! width-responsive column count.

pub mod app;
pub mod config;
pub mod feed;
pub mod gallery;
pub mod server;
pub mod storage;
pub mod ui;
pub mod util;
