//! HTTP error response conversion
//!
//! This module provides HTTP-specific error response conversion for AppError.
//!
//! **Preferred handler pattern:** Return `Result<impl IntoResponse, HttpAppError>` and convert
//! with `.map_err(|e| state.http_error(e))` so the body honors the configured environment.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tubely_core::{AppError, ErrorMetadata, LogLevel};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Whether this error is recoverable (can be retried)
    pub recoverable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

impl ErrorResponse {
    fn from_app_error(app_error: &AppError, include_details: bool) -> Self {
        Self {
            error: app_error.client_message(),
            details: include_details.then(|| app_error.detailed_message()),
            error_type: include_details.then(|| app_error.error_type().to_string()),
            code: app_error.error_code().to_string(),
            recoverable: app_error.is_recoverable(),
            suggested_action: app_error.suggested_action().map(String::from),
        }
    }
}

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from tubely-core)
///
/// `expose_details` comes from the running configuration (see [`AppState::http_error`]); a bare
/// `From<AppError>` conversion never exposes details.
///
/// [`AppState::http_error`]: crate::state::AppState::http_error
#[derive(Debug)]
pub struct HttpAppError {
    error: AppError,
    expose_details: bool,
}

impl HttpAppError {
    pub fn new(error: AppError, expose_details: bool) -> Self {
        Self {
            error,
            expose_details,
        }
    }

    pub fn error(&self) -> &AppError {
        &self.error
    }
}

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError::new(err, false)
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(
                error = %error,
                error_type = error_type,
                details = %error.detailed_message(),
                "Error occurred"
            );
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.error;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        // Sensitive errors never carry details.
        let include_details = self.expose_details && !app_error.is_sensitive();
        let body = ErrorResponse::from_app_error(app_error, include_details);

        (status, Json(body)).into_response()
    }
}
