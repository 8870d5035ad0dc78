//! Object key generation shared by every storage backend.
//!
//! Key format: `[<prefix>/]<random>.<extension>`, where `<random>` is 32 bytes from the operating
//! system's CSPRNG encoded as unpadded URL-safe base64 (always 43 characters).

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use rand::rngs::OsRng;
use rand::TryRngCore;
use thiserror::Error;
use tubely_core::AppError;

const KEY_RANDOM_BYTES: usize = 32;

#[derive(Debug, Error)]
pub enum KeyError {
    #[error("OS random number generator unavailable: {0}")]
    RandomUnavailable(String),

    #[error("Invalid key component: {0}")]
    InvalidComponent(String),
}

impl From<KeyError> for AppError {
    fn from(err: KeyError) -> Self {
        AppError::Internal(err.to_string())
    }
}

fn is_valid_component(component: &str) -> bool {
    !component.is_empty()
        && component
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
}

/// Generate a fresh object key.
///
/// `extension` and `prefix` must be lowercase ASCII alphanumerics so the key stays URL-safe and
/// cannot escape a directory when used as a filesystem path.
pub fn generate_key(extension: &str, prefix: Option<&str>) -> Result<String, KeyError> {
    if !is_valid_component(extension) {
        return Err(KeyError::InvalidComponent(format!(
            "extension '{}'",
            extension
        )));
    }
    if let Some(prefix) = prefix {
        if !is_valid_component(prefix) {
            return Err(KeyError::InvalidComponent(format!("prefix '{}'", prefix)));
        }
    }

    let mut buf = [0u8; KEY_RANDOM_BYTES];
    OsRng
        .try_fill_bytes(&mut buf)
        .map_err(|e| KeyError::RandomUnavailable(e.to_string()))?;
    let random = URL_SAFE_NO_PAD.encode(buf);

    Ok(match prefix {
        Some(prefix) => format!("{}/{}.{}", prefix, random, extension),
        None => format!("{}.{}", random, extension),
    })
}
