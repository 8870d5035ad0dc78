use tubely_core::{AppError, MediaKind};

/// Common validation errors for uploaded media
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Missing Content-Type for file")]
    MissingContentType,

    #[error("Invalid Content-Type: {0}")]
    MalformedContentType(String),

    #[error("Invalid content type: {content_type} (allowed: {allowed:?})")]
    InvalidContentType {
        content_type: String,
        allowed: Vec<String>,
    },
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::FileTooLarge { .. } => AppError::PayloadTooLarge(err.to_string()),
            ValidationError::MissingContentType => AppError::Internal(err.to_string()),
            ValidationError::MalformedContentType(_) | ValidationError::InvalidContentType { .. } => {
                AppError::BadRequest(err.to_string())
            }
        }
    }
}

fn is_token(s: &str) -> bool {
    !s.is_empty()
        && s.chars().all(|c| {
            c.is_ascii_alphanumeric()
                || matches!(
                    c,
                    '!' | '#' | '$' | '%' | '&' | '\'' | '*' | '+' | '-' | '.' | '^' | '_' | '`'
                        | '|' | '~'
                )
        })
}

/// Parse a `Content-Type` value into its bare, lowercased `type/subtype`.
///
/// Parameters such as `; charset=binary` are dropped.
pub fn parse_media_type(raw: &str) -> Result<String, ValidationError> {
    let essence = raw.split(';').next().unwrap_or_default().trim();
    if essence.is_empty() {
        return Err(ValidationError::MissingContentType);
    }

    match essence.split_once('/') {
        Some((top, sub)) if is_token(top) && is_token(sub) => Ok(essence.to_ascii_lowercase()),
        _ => Err(ValidationError::MalformedContentType(raw.to_string())),
    }
}

/// Media validator
///
/// Checks the declared media type against the allow list of one upload kind, and the payload
/// size against that kind's ceiling.
#[derive(Debug, Clone)]
pub struct MediaValidator {
    kind: MediaKind,
    max_file_size: usize,
}

impl MediaValidator {
    pub fn new(kind: MediaKind, max_file_size: usize) -> Self {
        Self {
            kind,
            max_file_size,
        }
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn max_file_size(&self) -> usize {
        self.max_file_size
    }

    /// Validate file size
    pub fn validate_file_size(&self, size: usize) -> Result<(), ValidationError> {
        if size > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }

        Ok(())
    }

    /// Validate a declared content type and return its normalized media type.
    pub fn validate_content_type(&self, content_type: &str) -> Result<String, ValidationError> {
        let media_type = parse_media_type(content_type)?;

        if !self.kind.allows(&media_type) {
            return Err(ValidationError::InvalidContentType {
                content_type: media_type,
                allowed: self
                    .kind
                    .allowed_content_types()
                    .iter()
                    .map(|ct| ct.to_string())
                    .collect(),
            });
        }

        Ok(media_type)
    }
}
