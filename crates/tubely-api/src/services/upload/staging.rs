//! Pulling the payload field out of a multipart form and staging it.
//!
//! Thumbnails are buffered in memory. Videos go to a uniquely named temp file so the probe can
//! read them from disk; the file is removed when the [`StagedUpload`] (or the guard returned by
//! [`StagedUpload::into_reader`]) is dropped, on success and on every error path.

use std::io::Cursor;
use std::path::Path;

use axum::extract::multipart::{Field, MultipartError};
use axum::extract::Multipart;
use axum::http::StatusCode;
use bytes::{Bytes, BytesMut};
use tempfile::NamedTempFile;
use tokio::io::{AsyncSeekExt, AsyncWriteExt};
use tubely_core::{extension_for, AppError};
use tubely_processing::MediaValidator;
use tubely_storage::ByteReader;

use super::types::AcceptedMedia;

const TEMP_FILE_PREFIX: &str = "tubely-upload-";

/// Map a failed multipart read to the error reported to the client.
///
/// Hitting the route's body ceiling surfaces here as a 413; anything else is internal.
pub(crate) fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::Internal(format!("Unable to parse multipart form: {}", err.body_text()))
    }
}

enum StagedBody {
    Memory(Bytes),
    Disk {
        temp: NamedTempFile,
        file: tokio::fs::File,
    },
}

/// Payload bytes owned by one upload invocation.
pub struct StagedUpload {
    size: u64,
    body: StagedBody,
}

impl StagedUpload {
    fn in_memory(data: Bytes) -> Self {
        Self {
            size: data.len() as u64,
            body: StagedBody::Memory(data),
        }
    }

    fn on_disk(temp: NamedTempFile, file: tokio::fs::File, size: u64) -> Self {
        Self {
            size,
            body: StagedBody::Disk { temp, file },
        }
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Location of the staged file, `None` for in-memory payloads.
    pub fn path(&self) -> Option<&Path> {
        match &self.body {
            StagedBody::Memory(_) => None,
            StagedBody::Disk { temp, .. } => Some(temp.path()),
        }
    }

    /// Reader positioned at the first byte, plus the temp file guard when the payload lives on
    /// disk. Keep the guard alive until the reader is drained.
    pub fn into_reader(self) -> (ByteReader, Option<NamedTempFile>) {
        match self.body {
            StagedBody::Memory(data) => (Box::pin(Cursor::new(data)), None),
            StagedBody::Disk { temp, file } => (Box::pin(file), Some(temp)),
        }
    }
}

/// Find the payload field for `validator.kind()`, check its declared type and stage its bytes.
/// Videos are staged under `staging_dir`.
///
/// Fields with other names are skipped. The content type is validated before any payload byte
/// is read.
pub async fn stage_media_field(
    multipart: &mut Multipart,
    validator: &MediaValidator,
    staging_dir: &Path,
) -> Result<(AcceptedMedia, StagedUpload), AppError> {
    let kind = validator.kind();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(kind.form_field()) {
            continue;
        }

        let declared = field.content_type().ok_or_else(|| {
            AppError::Internal(format!(
                "Missing Content-Type for form field '{}'",
                kind.form_field()
            ))
        })?;
        let media_type = validator.validate_content_type(declared)?;

        let staged = if kind.requires_probe() {
            stage_to_disk(field, validator, &media_type, staging_dir).await?
        } else {
            buffer_in_memory(field, validator).await?
        };

        tracing::debug!(
            kind = %kind,
            media_type = %media_type,
            size_bytes = staged.size(),
            on_disk = staged.path().is_some(),
            "Upload staged"
        );

        return Ok((AcceptedMedia { kind, media_type }, staged));
    }

    Err(AppError::Internal(format!(
        "Unable to parse form file: missing field '{}'",
        kind.form_field()
    )))
}

async fn buffer_in_memory(
    mut field: Field<'_>,
    validator: &MediaValidator,
) -> Result<StagedUpload, AppError> {
    let mut buffer = BytesMut::new();

    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        validator.validate_file_size(buffer.len() + chunk.len())?;
        buffer.extend_from_slice(&chunk);
    }

    Ok(StagedUpload::in_memory(buffer.freeze()))
}

async fn stage_to_disk(
    mut field: Field<'_>,
    validator: &MediaValidator,
    media_type: &str,
    staging_dir: &Path,
) -> Result<StagedUpload, AppError> {
    let suffix = extension_for(media_type)
        .map(|ext| format!(".{}", ext))
        .unwrap_or_default();
    let temp = tempfile::Builder::new()
        .prefix(TEMP_FILE_PREFIX)
        .suffix(&suffix)
        .tempfile_in(staging_dir)
        .map_err(|e| AppError::Internal(format!("Couldn't create temp file: {}", e)))?;

    let mut file = tokio::fs::File::from_std(temp.as_file().try_clone()?);
    let mut written: usize = 0;

    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        written += chunk.len();
        validator.validate_file_size(written)?;
        file.write_all(&chunk).await.map_err(|e| {
            AppError::Internal(format!("Couldn't write file to disk: {}", e))
        })?;
    }

    file.flush().await?;
    file.rewind().await?;

    Ok(StagedUpload::on_disk(temp, file, written as u64))
}
