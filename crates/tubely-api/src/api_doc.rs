//! OpenAPI documentation, served at `/api/openapi.json`.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::error;
use crate::handlers;
use tubely_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tubely API",
        version = "0.1.0",
        description = "Media uploads for Tubely videos. Thumbnails and video files are validated, stored under random keys and attached to the video record. All upload endpoints require a bearer token belonging to the video's owner."
    ),
    paths(
        handlers::thumbnail_upload::upload_thumbnail,
        handlers::video_upload::upload_video,
        handlers::health::health_check,
    ),
    components(
        schemas(
            models::Video,
            models::MediaKind,
            handlers::health::HealthResponse,
            error::ErrorResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "videos", description = "Thumbnail and video uploads for video records"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

/// Registers the `bearer_auth` scheme referenced by the upload endpoints.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_upload_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/videos/{video_id}/thumbnail"));
        assert!(doc.paths.paths.contains_key("/videos/{video_id}/video"));
        assert!(doc.paths.paths.contains_key("/health"));
        assert!(doc
            .components
            .unwrap()
            .security_schemes
            .contains_key("bearer_auth"));
    }
}
