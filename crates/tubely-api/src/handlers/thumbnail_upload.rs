use crate::error::{ErrorResponse, HttpAppError};
use crate::services::upload::UploadPipeline;
use crate::state::AppState;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::HeaderMap,
    Json,
};
use std::sync::Arc;
use tubely_core::{AppError, MediaKind, Video};
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/videos/{video_id}/thumbnail",
    tag = "videos",
    params(
        ("video_id" = String, Path, description = "Video ID (UUID)")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data", description = "Field `thumbnail`: image/jpeg or image/png"),
    responses(
        (status = 200, description = "Thumbnail stored and attached to the video", body = Video),
        (status = 400, description = "Invalid video ID or content type", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the video", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip(state, headers, multipart))]
pub async fn upload_thumbnail(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Video>, HttpAppError> {
    let video_id =
        Uuid::parse_str(&video_id).map_err(|e| state.http_error(AppError::from(e)))?;

    let video = UploadPipeline::new(&state)
        .run(MediaKind::Thumbnail, video_id, &headers, multipart)
        .await
        .map_err(|e| state.http_error(e))?;

    Ok(Json(video))
}
