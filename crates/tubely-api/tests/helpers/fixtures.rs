//! Test fixtures: small payloads and multipart forms.

use axum_test::multipart::{MultipartForm, Part};

/// Minimal valid 1x1 PNG bytes.
pub fn create_minimal_png() -> Vec<u8> {
    vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x02, 0x00, 0x00, 0x00, 0x90,
        0x77, 0x53, 0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49, 0x44, 0x41, 0x54, 0x08, 0xD7, 0x63, 0xF8,
        0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x18, 0xDD, 0x8D, 0x89, 0x00, 0x00, 0x00,
        0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ]
}

/// Bytes that start like an MP4 `ftyp` box; the probe is faked so the rest does not matter.
pub fn create_test_mp4(len: usize) -> Vec<u8> {
    let mut data = vec![
        0x00, 0x00, 0x00, 0x18, b'f', b't', b'y', b'p', b'm', b'p', b'4', b'2',
    ];
    data.resize(len.max(data.len()), 0xAB);
    data
}

/// A form with a single file part.
pub fn file_form(field: &str, data: Vec<u8>, file_name: &str, mime_type: &str) -> MultipartForm {
    MultipartForm::new().add_part(
        field,
        Part::bytes(data).file_name(file_name).mime_type(mime_type),
    )
}
