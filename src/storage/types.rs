use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Store-specific errors with user-friendly messages
#[derive(Debug, Error)]
pub enum StoreError {
    /// Another instance of the application has locked the database
    #[error("Another instance of vidgrid appears to be running. Please close it and try again.")]
    InstanceLocked,

    /// Migration failed
    #[error("Database migration failed: {0}")]
    Migration(String),

    /// Generic database error
    #[error("Database error: {0}")]
    Other(#[from] sqlx::Error),
}

impl StoreError {
    /// Check if a sqlx error indicates database locking
    pub(crate) fn from_sqlx(err: sqlx::Error) -> Self {
        let error_string = err.to_string().to_lowercase();

        // SQLITE_BUSY (5): database is locked
        // SQLITE_LOCKED (6): database table is locked
        // SQLITE_CANTOPEN (14): unable to open database file
        if error_string.contains("database is locked")
            || error_string.contains("database table is locked")
            || error_string.contains("sqlite_busy")
            || error_string.contains("sqlite_locked")
            || error_string.contains("unable to open database file")
        {
            return StoreError::InstanceLocked;
        }

        StoreError::Other(err)
    }
}

// ============================================================================
// Data Structures
// ============================================================================

/// One video record, as stored and as serialized over the feed API.
///
/// `id` is the stable correlation key: the pagination query orders by it and
/// every rendered card carries it. `title` is required; every other field is
/// optional with a defined fallback rendering in the card builder.
///
/// Wire names are camelCase to match the feed API payload.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    pub id: String,
    pub title: String,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub channel_name: Option<String>,
    pub channel_image_url: Option<String>,
    pub view_count: Option<i64>,
}
