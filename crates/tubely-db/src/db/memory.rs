//! Map-backed [`VideoStore`] for tests and local tooling.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tubely_core::models::{MediaKind, Video};
use tubely_core::AppError;
use uuid::Uuid;

use super::store::VideoStore;

#[derive(Clone, Default)]
pub struct InMemoryVideoStore {
    videos: Arc<RwLock<HashMap<Uuid, Video>>>,
    fail_updates: Arc<AtomicBool>,
    update_calls: Arc<AtomicUsize>,
}

impl InMemoryVideoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a record as-is.
    pub async fn insert(&self, video: Video) {
        self.videos.write().await.insert(video.id, video);
    }

    /// Snapshot of a record without going through the trait.
    pub async fn get(&self, id: Uuid) -> Option<Video> {
        self.videos.read().await.get(&id).cloned()
    }

    /// Make every subsequent `set_media_url` fail with a database-style error.
    pub fn fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }

    /// Number of `set_media_url` calls seen, failed ones included.
    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VideoStore for InMemoryVideoStore {
    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        Ok(self.get(id).await)
    }

    async fn set_media_url(
        &self,
        id: Uuid,
        kind: MediaKind,
        url: &str,
    ) -> Result<Video, AppError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(AppError::Internal("simulated update failure".to_string()));
        }

        let mut videos = self.videos.write().await;
        let existing = videos
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Video {} not found", id)))?;
        existing.set_media_url(kind, url.to_string());
        Ok(existing.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_then_get() {
        let store = InMemoryVideoStore::new();
        let video = Video::new(Uuid::new_v4(), "Boots", None);
        store.insert(video.clone()).await;

        let fetched = store.get_video(video.id).await.unwrap().unwrap();
        assert_eq!(fetched, video);
        assert!(store.get_video(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_media_url_updates_selected_column() {
        let store = InMemoryVideoStore::new();
        let video = Video::new(Uuid::new_v4(), "Boots", None);
        store.insert(video.clone()).await;

        let updated = store
            .set_media_url(video.id, MediaKind::Video, "https://cdn/landscape/x.mp4")
            .await
            .unwrap();

        assert_eq!(updated.video_url.as_deref(), Some("https://cdn/landscape/x.mp4"));
        assert_eq!(updated.thumbnail_url, None);
        assert!(updated.updated_at >= video.updated_at);
        assert_eq!(store.get(video.id).await.unwrap(), updated);
        assert_eq!(store.update_calls(), 1);
    }

    #[tokio::test]
    async fn test_set_media_url_keeps_other_kind() {
        let store = InMemoryVideoStore::new();
        let video = Video::new(Uuid::new_v4(), "Boots", None);
        store.insert(video.clone()).await;

        // Both writers started from the same snapshot; neither may clear the other.
        let (thumb, vid) = tokio::join!(
            store.set_media_url(video.id, MediaKind::Thumbnail, "http://x/a.png"),
            store.set_media_url(video.id, MediaKind::Video, "http://x/landscape/b.mp4"),
        );
        thumb.unwrap();
        vid.unwrap();

        let stored = store.get(video.id).await.unwrap();
        assert_eq!(stored.thumbnail_url.as_deref(), Some("http://x/a.png"));
        assert_eq!(stored.video_url.as_deref(), Some("http://x/landscape/b.mp4"));
        assert_eq!(stored.title, video.title);
    }

    #[tokio::test]
    async fn test_set_media_url_missing_is_not_found() {
        let store = InMemoryVideoStore::new();
        assert!(matches!(
            store
                .set_media_url(Uuid::new_v4(), MediaKind::Thumbnail, "http://x/a.png")
                .await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_simulated_failure_leaves_record_unchanged() {
        let store = InMemoryVideoStore::new();
        let video = Video::new(Uuid::new_v4(), "Boots", None);
        store.insert(video.clone()).await;
        store.fail_updates(true);

        assert!(store
            .set_media_url(video.id, MediaKind::Thumbnail, "http://x/a.png")
            .await
            .is_err());
        assert!(store.get(video.id).await.unwrap().thumbnail_url.is_none());
    }
}
