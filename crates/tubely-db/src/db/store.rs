use async_trait::async_trait;
use tubely_core::models::{MediaKind, Video};
use tubely_core::AppError;
use uuid::Uuid;

/// Get/update access to video records by id.
#[async_trait]
pub trait VideoStore: Send + Sync {
    /// Fetch a record; `Ok(None)` when no record has this id.
    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError>;

    /// Point the URL column for `kind` at `url`, bump `updated_at` and return the stored row.
    ///
    /// Only that column and the timestamp are written, so uploads of different kinds to the same
    /// record never overwrite each other. Returns `AppError::NotFound` when the record no longer
    /// exists.
    async fn set_media_url(
        &self,
        id: Uuid,
        kind: MediaKind,
        url: &str,
    ) -> Result<Video, AppError>;
}
