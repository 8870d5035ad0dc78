use crate::traits::{ByteReader, Storage, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tokio::io::AsyncReadExt;

/// Backend-less storage: the "URL" is a `data:` URI carrying the payload itself.
///
/// Nothing is persisted, so `delete` is a no-op. Meant for small
/// thumbnails in development setups without a bucket or writable assets directory.
#[derive(Clone, Debug, Default)]
pub struct InlineStorage;

impl InlineStorage {
    pub fn new() -> Self {
        InlineStorage
    }
}

fn data_uri(content_type: &str, data: &[u8]) -> String {
    format!("data:{};base64,{}", content_type, STANDARD.encode(data))
}

#[async_trait]
impl Storage for InlineStorage {
    async fn put_stream(
        &self,
        storage_key: &str,
        content_type: &str,
        content_length: Option<u64>,
        mut reader: ByteReader,
    ) -> StorageResult<String> {
        let mut buffer = Vec::with_capacity(content_length.unwrap_or(0) as usize);
        reader.read_to_end(&mut buffer).await?;

        tracing::debug!(
            key = %storage_key,
            size_bytes = buffer.len(),
            "Encoding upload inline as data URI"
        );
        Ok(data_uri(content_type, &buffer))
    }

    async fn delete(&self, _storage_key: &str) -> StorageResult<()> {
        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Inline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_uri_encoding() {
        assert_eq!(data_uri("image/png", b"hello"), "data:image/png;base64,aGVsbG8=");
    }

    #[tokio::test]
    async fn test_inline_stream_returns_data_uri() {
        let storage = InlineStorage::new();
        let reader: ByteReader = Box::pin(std::io::Cursor::new(b"hello".to_vec()));
        let url = storage
            .put_stream("ignored.mp4", "video/mp4", Some(5), reader)
            .await
            .unwrap();
        assert_eq!(url, "data:video/mp4;base64,aGVsbG8=");
        assert!(storage.delete("ignored.mp4").await.is_ok());
    }
}
