//! Video queries: the paginated read path behind the feed API, plus the
//! insert/count operations used by seeding and tests.

use anyhow::Result;

use super::schema::Database;
use super::types::VideoRecord;

/// Fixed number of records per feed page.
///
/// The feed API reports `hasNextPage` as `returned length == PAGE_SIZE`, so
/// a store whose remaining count is an exact multiple yields one harmless
/// empty follow-up page.
pub const PAGE_SIZE: usize = 30;

impl Database {
    /// Fetch one page of videos, 1-based.
    ///
    /// Ordered by `id` ascending so that successive pages are disjoint and
    /// complete as long as the store is not concurrently mutated. Pages
    /// beyond the end of the store return an empty slice, not an error.
    pub async fn video_page(&self, page: u32) -> Result<Vec<VideoRecord>> {
        let page = page.max(1);
        let offset = (page as i64 - 1) * PAGE_SIZE as i64;

        let videos = sqlx::query_as::<_, VideoRecord>(
            r#"
            SELECT id, title, category, image_url, channel_name, channel_image_url, view_count
            FROM videos
            ORDER BY id
            LIMIT ? OFFSET ?
        "#,
        )
        .bind(PAGE_SIZE as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(videos)
    }

    /// Insert a video, replacing any existing record with the same id.
    ///
    /// Upsert semantics keep seeding idempotent across restarts.
    pub async fn insert_video(&self, video: &VideoRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO videos (id, title, category, image_url, channel_name, channel_image_url, view_count)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                category = excluded.category,
                image_url = excluded.image_url,
                channel_name = excluded.channel_name,
                channel_image_url = excluded.channel_image_url,
                view_count = excluded.view_count
        "#,
        )
        .bind(&video.id)
        .bind(&video.title)
        .bind(&video.category)
        .bind(&video.image_url)
        .bind(&video.channel_name)
        .bind(&video.channel_image_url)
        .bind(video.view_count)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Total number of videos in the store.
    pub async fn count_videos(&self) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM videos")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> Database {
        Database::open(":memory:").await.unwrap()
    }

    fn test_video(id: &str, title: &str) -> VideoRecord {
        VideoRecord {
            id: id.to_string(),
            title: title.to_string(),
            category: Some("music".to_string()),
            image_url: Some(format!("https://example.com/{}.jpg", id)),
            channel_name: Some("Test Channel".to_string()),
            channel_image_url: None,
            view_count: Some(100),
        }
    }

    #[tokio::test]
    async fn test_empty_store_returns_empty_page() {
        let db = test_db().await;
        let page = db.video_page(1).await.unwrap();
        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn test_page_is_ordered_by_id() {
        let db = test_db().await;
        // Insert out of order; ids are zero-padded so text order == numeric order
        for id in ["video-0003", "video-0001", "video-0002"] {
            db.insert_video(&test_video(id, "t")).await.unwrap();
        }

        let page = db.video_page(1).await.unwrap();
        let ids: Vec<&str> = page.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["video-0001", "video-0002", "video-0003"]);
    }

    #[tokio::test]
    async fn test_pages_are_disjoint_and_bounded() {
        let db = test_db().await;
        for i in 0..PAGE_SIZE + 5 {
            db.insert_video(&test_video(&format!("video-{:04}", i), "t"))
                .await
                .unwrap();
        }

        let first = db.video_page(1).await.unwrap();
        let second = db.video_page(2).await.unwrap();
        assert_eq!(first.len(), PAGE_SIZE);
        assert_eq!(second.len(), 5);

        for v in &second {
            assert!(
                !first.iter().any(|f| f.id == v.id),
                "page 2 must not repeat page 1 records"
            );
        }
    }

    #[tokio::test]
    async fn test_page_zero_is_clamped_to_first_page() {
        let db = test_db().await;
        db.insert_video(&test_video("video-0001", "t")).await.unwrap();

        let page = db.video_page(0).await.unwrap();
        assert_eq!(page.len(), 1);
    }

    #[tokio::test]
    async fn test_insert_is_upsert_on_id() {
        let db = test_db().await;
        db.insert_video(&test_video("video-0001", "Old")).await.unwrap();
        db.insert_video(&test_video("video-0001", "New")).await.unwrap();

        assert_eq!(db.count_videos().await.unwrap(), 1);
        let page = db.video_page(1).await.unwrap();
        assert_eq!(page[0].title, "New");
    }

    #[tokio::test]
    async fn test_null_view_count_round_trips() {
        let db = test_db().await;
        let mut video = test_video("video-0001", "t");
        video.view_count = None;
        db.insert_video(&video).await.unwrap();

        let page = db.video_page(1).await.unwrap();
        assert_eq!(page[0].view_count, None);
    }
}
