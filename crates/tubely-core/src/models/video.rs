use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::upload::MediaKind;

/// A video record owned by a single user.
///
/// Uploads never create records; they only fill in `thumbnail_url` or `video_url`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Video {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
}

impl Video {
    pub fn new(user_id: Uuid, title: impl Into<String>, description: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            title: title.into(),
            description,
            created_at: now,
            updated_at: now,
            thumbnail_url: None,
            video_url: None,
        }
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }

    pub fn media_url(&self, kind: MediaKind) -> Option<&str> {
        match kind {
            MediaKind::Thumbnail => self.thumbnail_url.as_deref(),
            MediaKind::Video => self.video_url.as_deref(),
        }
    }

    /// Point the URL field selected by `kind` at `url` and bump `updated_at`.
    pub fn set_media_url(&mut self, kind: MediaKind, url: String) {
        match kind {
            MediaKind::Thumbnail => self.thumbnail_url = Some(url),
            MediaKind::Video => self.video_url = Some(url),
        }
        self.updated_at = Utc::now();
    }
}
