use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The two kinds of media a video record can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Thumbnail,
    Video,
}

const THUMBNAIL_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/png"];
const VIDEO_CONTENT_TYPES: &[&str] = &["video/mp4"];

impl MediaKind {
    /// Name of the multipart field carrying the payload.
    pub fn form_field(&self) -> &'static str {
        match self {
            MediaKind::Thumbnail => "thumbnail",
            MediaKind::Video => "video",
        }
    }

    /// Media types (already normalized, no parameters) accepted for this kind.
    pub fn allowed_content_types(&self) -> &'static [&'static str] {
        match self {
            MediaKind::Thumbnail => THUMBNAIL_CONTENT_TYPES,
            MediaKind::Video => VIDEO_CONTENT_TYPES,
        }
    }

    pub fn allows(&self, media_type: &str) -> bool {
        self.allowed_content_types().contains(&media_type)
    }

    /// Videos are staged to disk and probed for orientation; thumbnails are buffered in memory.
    pub fn requires_probe(&self) -> bool {
        matches!(self, MediaKind::Video)
    }
}

/// File extension for an accepted media type: the subtype, e.g. `image/png` -> `png`.
pub fn extension_for(media_type: &str) -> Option<&str> {
    media_type
        .split_once('/')
        .map(|(_, subtype)| subtype)
        .filter(|subtype| !subtype.is_empty())
}

impl Display for MediaKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            MediaKind::Thumbnail => write!(f, "thumbnail"),
            MediaKind::Video => write!(f, "video"),
        }
    }
}
