//! FFprobe-backed dimension probing of staged uploads.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tokio::process::Command;
use tubely_core::AppError;

use crate::metadata::Dimensions;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Failed to run ffprobe: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("ffprobe exited with {status}: {stderr}")]
    Exited { status: String, stderr: String },

    #[error("Failed to parse ffprobe output: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("ffprobe reported no streams")]
    NoStreams,

    #[error("First stream has no usable width/height")]
    MissingDimensions,
}

impl From<ProbeError> for AppError {
    fn from(err: ProbeError) -> Self {
        AppError::Probe(err.to_string())
    }
}

/// Inspects a staged file and reports its frame dimensions.
#[async_trait]
pub trait ContentProbe: Send + Sync {
    async fn probe(&self, path: &Path) -> Result<Dimensions, ProbeError>;
}

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    width: Option<u32>,
    height: Option<u32>,
}

/// Extract dimensions from `ffprobe -print_format json -show_streams` output.
///
/// Only the first stream is consulted, whatever its codec type.
pub fn parse_probe_output(stdout: &[u8]) -> Result<Dimensions, ProbeError> {
    let output: FfprobeOutput = serde_json::from_slice(stdout).map_err(ProbeError::Parse)?;
    let first = output.streams.first().ok_or(ProbeError::NoStreams)?;

    match (first.width, first.height) {
        (Some(width), Some(height)) => {
            Dimensions::new(width, height).ok_or(ProbeError::MissingDimensions)
        }
        _ => Err(ProbeError::MissingDimensions),
    }
}

/// Runs one `ffprobe` process per call; no retries.
#[derive(Debug, Clone)]
pub struct FfprobeProbe {
    ffprobe_path: String,
}

impl FfprobeProbe {
    pub fn new(ffprobe_path: impl Into<String>) -> Self {
        Self {
            ffprobe_path: ffprobe_path.into(),
        }
    }
}

impl Default for FfprobeProbe {
    fn default() -> Self {
        Self::new("ffprobe")
    }
}

#[async_trait]
impl ContentProbe for FfprobeProbe {
    #[tracing::instrument(skip(self), fields(service = "probe"))]
    async fn probe(&self, path: &Path) -> Result<Dimensions, ProbeError> {
        let output = Command::new(&self.ffprobe_path)
            .args(["-v", "error", "-print_format", "json", "-show_streams"])
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(ProbeError::Spawn)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::error!(status = %output.status, stderr = %stderr, "ffprobe failed");
            return Err(ProbeError::Exited {
                status: output.status.to_string(),
                stderr,
            });
        }

        let dimensions = parse_probe_output(&output.stdout)?;
        tracing::debug!(
            width = dimensions.width,
            height = dimensions.height,
            "Probed video dimensions"
        );
        Ok(dimensions)
    }
}
