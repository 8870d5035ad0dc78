use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Storage backend types
///
/// Selected once at startup; every upload handled by the process goes to the same backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Amazon S3 or an S3-compatible provider
    S3,
    /// Directory on the local filesystem served under `/assets`
    Local,
    /// No backend: the payload is embedded in a `data:` URI
    Inline,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "s3" => Ok(StorageBackend::S3),
            "local" => Ok(StorageBackend::Local),
            "inline" => Ok(StorageBackend::Inline),
            _ => Err(anyhow::anyhow!("Invalid storage backend: {}", s)),
        }
    }
}

impl Display for StorageBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StorageBackend::S3 => write!(f, "s3"),
            StorageBackend::Local => write!(f, "local"),
            StorageBackend::Inline => write!(f, "inline"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_storage_backend() {
        assert_eq!("s3".parse::<StorageBackend>().unwrap(), StorageBackend::S3);
        assert_eq!(
            " Local ".parse::<StorageBackend>().unwrap(),
            StorageBackend::Local
        );
        assert_eq!(
            "INLINE".parse::<StorageBackend>().unwrap(),
            StorageBackend::Inline
        );
        assert!("nfs".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for backend in [
            StorageBackend::S3,
            StorageBackend::Local,
            StorageBackend::Inline,
        ] {
            assert_eq!(backend.to_string().parse::<StorageBackend>().unwrap(), backend);
        }
    }
}
