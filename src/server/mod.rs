//! The feed API server.
//!
//! A small axum router exposing the paginated video feed consumed by the
//! gallery, plus a static index page. The endpoint is read-only: pagination
//! is 1-based with a fixed page size, ordered by record id so successive
//! pages neither overlap nor skip rows on a quiescent store.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

use crate::storage::{Database, VideoRecord, PAGE_SIZE};

// ============================================================================
// Wire Types
// ============================================================================

/// Raw query string for the feed endpoint.
///
/// `page` is kept as a string so that a non-numeric value degrades to the
/// default page rather than a 400; the consumer treats anything it cannot
/// parse as page 1.
#[derive(Debug, Deserialize)]
struct PageQuery {
    page: Option<String>,
}

impl PageQuery {
    /// Resolve to a 1-based page number. Omitted, non-numeric, and
    /// out-of-range values all collapse to 1.
    fn resolve(&self) -> u32 {
        self.page
            .as_deref()
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .map(|p| p.max(1))
            .unwrap_or(1)
    }
}

/// Successful feed page payload.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPage {
    pub message: String,
    pub current_page: u32,
    pub has_next_page: bool,
    pub data: Vec<VideoRecord>,
}

/// Failure payload. Deliberately generic: store detail stays in the log.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

// ============================================================================
// Routes
// ============================================================================

/// Build the application router. Exposed separately from [`serve`] so tests
/// can bind it to an ephemeral port.
pub fn router(db: Database) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/videos", get(list_videos))
        .with_state(db)
}

async fn index() -> Html<&'static str> {
    Html(include_str!("../../assets/index.html"))
}

/// `GET /api/videos?page=<n>`
///
/// Returns at most [`PAGE_SIZE`] records ordered by id. `hasNextPage` is an
/// approximation: true iff the slice is full, so a store whose remainder is
/// exactly one page reports a next page that then turns out empty.
async fn list_videos(State(db): State<Database>, Query(query): Query<PageQuery>) -> Response {
    let page = query.resolve();
    tracing::debug!(page, "Feed page requested");

    match db.video_page(page).await {
        Ok(data) => {
            let has_next_page = data.len() == PAGE_SIZE;
            tracing::debug!(page, returned = data.len(), has_next_page, "Feed page served");
            Json(FeedPage {
                message: "video list retrieved".to_string(),
                current_page: page,
                has_next_page,
                data,
            })
            .into_response()
        }
        Err(e) => {
            // Log the store failure in full; the client only sees a generic fault.
            tracing::error!(error = %e, page, "Video page query failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    message: "Failed to query the video store".to_string(),
                }),
            )
                .into_response()
        }
    }
}

// ============================================================================
// Bootstrap
// ============================================================================

/// Bind and serve the feed API on `port` until the process exits.
pub async fn serve(db: Database, port: u16) -> anyhow::Result<()> {
    let listener = TcpListener::bind(("127.0.0.1", port)).await?;
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "Feed API listening");
    axum::serve(listener, router(db)).await?;
    Ok(())
}
