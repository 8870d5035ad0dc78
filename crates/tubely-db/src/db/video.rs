use async_trait::async_trait;
use sqlx::{PgPool, Postgres};
use tubely_core::models::{MediaKind, Video};
use tubely_core::AppError;
use uuid::Uuid;

use super::store::VideoStore;

const VIDEO_COLUMNS: &str =
    "id, user_id, title, description, created_at, updated_at, thumbnail_url, video_url";

/// Repository for video records
#[derive(Clone)]
pub struct PgVideoStore {
    pool: PgPool,
}

impl PgVideoStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VideoStore for PgVideoStore {
    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "select", db.record_id = %id))]
    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        let video = sqlx::query_as::<Postgres, Video>(&format!(
            "SELECT {} FROM videos WHERE id = $1",
            VIDEO_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(video)
    }

    #[tracing::instrument(skip(self, url), fields(db.table = "videos", db.operation = "update", db.record_id = %id, kind = %kind))]
    async fn set_media_url(
        &self,
        id: Uuid,
        kind: MediaKind,
        url: &str,
    ) -> Result<Video, AppError> {
        let column = match kind {
            MediaKind::Thumbnail => "thumbnail_url",
            MediaKind::Video => "video_url",
        };

        let updated = sqlx::query_as::<Postgres, Video>(&format!(
            r#"
            UPDATE videos
            SET {} = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            column, VIDEO_COLUMNS
        ))
        .bind(id)
        .bind(url)
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or_else(|| AppError::NotFound(format!("Video {} not found", id)))
    }
}
