//! Upload pipeline
//!
//! One invocation per request, strictly in order:
//! authenticate → authorize → validate and stage → classify (video) → key → store → update record.
//! Every step short-circuits on error and nothing is retried.

use std::sync::Arc;

use axum::extract::multipart::MultipartRejection;
use axum::extract::Multipart;
use axum::http::HeaderMap;
use tubely_core::{extension_for, AppError, MediaKind, Video};
use tubely_processing::{classify, MediaValidator, Orientation};
use tubely_storage::generate_key;
use uuid::Uuid;

use crate::auth::extract_bearer_token;
use crate::state::AppState;

use super::staging::{stage_media_field, StagedUpload};
use super::types::AcceptedMedia;

pub struct UploadPipeline {
    state: Arc<AppState>,
}

impl UploadPipeline {
    pub fn new(state: &Arc<AppState>) -> Self {
        Self {
            state: state.clone(),
        }
    }

    /// Attach an uploaded `kind` payload to the video `video_id` and return the updated record.
    ///
    /// A rejected multipart extraction is only reported once the caller is known to own the
    /// record, so unauthenticated or foreign requests never learn about body problems.
    #[tracing::instrument(skip_all, fields(kind = %kind, video_id = %video_id))]
    pub async fn run(
        &self,
        kind: MediaKind,
        video_id: Uuid,
        headers: &HeaderMap,
        multipart: Result<Multipart, MultipartRejection>,
    ) -> Result<Video, AppError> {
        let user_id = self.authenticate(headers).await?;
        self.authorize(video_id, user_id).await?;

        let mut multipart = multipart.map_err(|rejection| {
            AppError::Internal(format!(
                "Unable to parse multipart form: {}",
                rejection.body_text()
            ))
        })?;

        let validator = MediaValidator::new(kind, self.state.limits.max_file_bytes(kind));
        let (accepted, staged) =
            stage_media_field(&mut multipart, &validator, &self.state.staging_dir).await?;

        let prefix = if kind.requires_probe() {
            Some(self.classify(&staged).await?)
        } else {
            None
        };

        let key = self.object_key(&accepted, prefix)?;
        let url = self.persist(&key, &accepted, staged).await?;

        match self.state.videos.set_media_url(video_id, kind, &url).await {
            Ok(updated) => {
                tracing::info!(user_id = %user_id, key = %key, "Upload attached to video");
                Ok(updated)
            }
            Err(e) => {
                self.discard_object(&key).await;
                Err(e)
            }
        }
    }

    async fn authenticate(&self, headers: &HeaderMap) -> Result<Uuid, AppError> {
        let token = extract_bearer_token(headers)?;
        self.state.auth.verify(token).await
    }

    async fn authorize(&self, video_id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        let video = self
            .state
            .videos
            .get_video(video_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Video {} not found", video_id)))?;

        if !video.is_owned_by(user_id) {
            tracing::warn!(
                user_id = %user_id,
                owner_id = %video.user_id,
                "Upload attempted by a user who does not own the video"
            );
            return Err(AppError::Forbidden(
                "Only the owner of a video can upload media for it".to_string(),
            ));
        }

        Ok(())
    }

    async fn classify(&self, staged: &StagedUpload) -> Result<Orientation, AppError> {
        let path = staged
            .path()
            .ok_or_else(|| AppError::Internal("Video payload was not staged to disk".into()))?;

        let dimensions = self.state.probe.probe(path).await?;
        let (ratio, orientation) = classify(dimensions)?;

        tracing::debug!(
            width = dimensions.width,
            height = dimensions.height,
            ratio = %ratio,
            orientation = %orientation,
            "Video classified"
        );

        Ok(orientation)
    }

    fn object_key(
        &self,
        accepted: &AcceptedMedia,
        prefix: Option<Orientation>,
    ) -> Result<String, AppError> {
        let extension = extension_for(&accepted.media_type).ok_or_else(|| {
            AppError::Internal(format!(
                "No file extension for media type {}",
                accepted.media_type
            ))
        })?;

        Ok(generate_key(extension, prefix.map(|o| o.as_str()))?)
    }

    async fn persist(
        &self,
        key: &str,
        accepted: &AcceptedMedia,
        staged: StagedUpload,
    ) -> Result<String, AppError> {
        let size = staged.size();
        let (reader, _temp_guard) = staged.into_reader();

        let url = self
            .state
            .storage
            .put_stream(key, &accepted.media_type, Some(size), reader)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, key = %key, "Failed to store upload");
                AppError::from(e)
            })?;

        tracing::info!(
            key = %key,
            size_bytes = size,
            backend = ?self.state.storage.backend_type(),
            "Upload stored"
        );

        Ok(url)
    }

    /// Best-effort removal of an object whose record update failed.
    async fn discard_object(&self, key: &str) {
        match self.state.storage.delete(key).await {
            Ok(()) => tracing::warn!(key = %key, "Removed stored object after record update failed"),
            Err(e) => tracing::error!(
                error = %e,
                key = %key,
                "Record update failed and the stored object could not be removed"
            ),
        }
    }
}
