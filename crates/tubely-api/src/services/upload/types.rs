//! Types used by the upload pipeline

use tubely_core::{Config, MediaKind};

/// Room left on top of the file ceiling for multipart boundaries and part headers.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Per-kind payload ceilings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadLimits {
    pub max_thumbnail_bytes: usize,
    pub max_video_bytes: usize,
}

impl UploadLimits {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_thumbnail_bytes: config.max_thumbnail_size_bytes(),
            max_video_bytes: config.max_video_size_bytes(),
        }
    }

    /// Largest file accepted for `kind`.
    pub fn max_file_bytes(&self, kind: MediaKind) -> usize {
        match kind {
            MediaKind::Thumbnail => self.max_thumbnail_bytes,
            MediaKind::Video => self.max_video_bytes,
        }
    }

    /// Request body ceiling for the route serving `kind`.
    pub fn max_body_bytes(&self, kind: MediaKind) -> usize {
        self.max_file_bytes(kind)
            .saturating_add(MULTIPART_OVERHEAD_BYTES)
    }
}

/// The payload field of a multipart form, after its declared type passed validation.
#[derive(Debug, Clone)]
pub struct AcceptedMedia {
    pub kind: MediaKind,
    /// Normalized media type, e.g. `video/mp4`
    pub media_type: String,
}
