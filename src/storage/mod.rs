mod schema;
mod seed;
mod types;
mod videos;

pub use schema::Database;
pub use seed::{demo_video, seed_demo_videos, DEMO_TOPICS};
pub use types::{StoreError, VideoRecord};
pub use videos::PAGE_SIZE;
