//! Aspect ratio reduction and orientation buckets.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tubely_core::AppError;

use crate::metadata::Dimensions;

/// Largest frame side accepted for classification. Keeps the subtraction gcd bounded.
pub const MAX_DIMENSION: u32 = 32_768;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RatioError {
    #[error("Cannot compute aspect ratio of {width}x{height}: dimensions must be non-zero")]
    ZeroDimension { width: u32, height: u32 },

    #[error(
        "Cannot compute aspect ratio of {width}x{height}: sides are limited to {max}",
        max = MAX_DIMENSION
    )]
    DimensionOutOfRange { width: u32, height: u32 },
}

impl From<RatioError> for AppError {
    fn from(err: RatioError) -> Self {
        AppError::Probe(err.to_string())
    }
}

/// Orientation bucket of a frame; the lowercase name doubles as an object key prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
    Other,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
            Orientation::Other => "other",
        }
    }
}

impl Display for Orientation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Width:height with common factors removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimplifiedRatio {
    pub width: u32,
    pub height: u32,
}

impl SimplifiedRatio {
    pub fn orientation(&self) -> Orientation {
        orientation(self.width, self.height)
    }
}

impl Display for SimplifiedRatio {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}:{}", self.width, self.height)
    }
}

/// Greatest common divisor by repeated subtraction. Both inputs must be non-zero.
fn gcd_by_subtraction(mut a: u32, mut b: u32) -> u32 {
    while a != b {
        if a > b {
            a -= b;
        } else {
            b -= a;
        }
    }
    a
}

/// Reduce `width:height` to lowest terms.
pub fn reduce(width: u32, height: u32) -> Result<SimplifiedRatio, RatioError> {
    if width == 0 || height == 0 {
        return Err(RatioError::ZeroDimension { width, height });
    }
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(RatioError::DimensionOutOfRange { width, height });
    }

    let divisor = gcd_by_subtraction(width, height);
    Ok(SimplifiedRatio {
        width: width / divisor,
        height: height / divisor,
    })
}

pub fn orientation(width: u32, height: u32) -> Orientation {
    if height > width {
        Orientation::Portrait
    } else if width > height {
        Orientation::Landscape
    } else {
        Orientation::Other
    }
}

/// Reduce probed dimensions and bucket them.
pub fn classify(dimensions: Dimensions) -> Result<(SimplifiedRatio, Orientation), RatioError> {
    let ratio = reduce(dimensions.width, dimensions.height)?;
    Ok((ratio, ratio.orientation()))
}
