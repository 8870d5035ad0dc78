//! Tubely Processing Library
//!
//! Content inspection for uploads: media type validation, ffprobe-based dimension probing and
//! aspect-ratio classification of videos.

pub mod metadata;
#[cfg(feature = "video")]
pub mod probe;
pub mod ratio;
pub mod validator;

pub use metadata::Dimensions;
#[cfg(feature = "video")]
pub use probe::{parse_probe_output, ContentProbe, FfprobeProbe, ProbeError};
pub use ratio::{classify, orientation, reduce, Orientation, RatioError, SimplifiedRatio};
pub use validator::{parse_media_type, MediaValidator, ValidationError};
