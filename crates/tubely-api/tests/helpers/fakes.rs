//! Collaborator doubles: a scripted probe and a storage wrapper that records calls.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tubely_processing::{ContentProbe, Dimensions, ProbeError};
use tubely_storage::{ByteReader, Storage, StorageBackend, StorageError, StorageResult};

#[derive(Clone, Copy, Debug)]
enum ProbeScript {
    Dimensions { width: u32, height: u32 },
    Exit,
}

/// Probe that answers from a script instead of running ffprobe.
#[derive(Debug)]
pub struct FakeProbe {
    script: ProbeScript,
    delay: Option<Duration>,
    seen: Mutex<Vec<(PathBuf, bool)>>,
}

impl FakeProbe {
    /// Report the given frame size for every file. Zero sides are passed through untouched.
    pub fn reporting(width: u32, height: u32) -> Self {
        Self {
            script: ProbeScript::Dimensions { width, height },
            delay: None,
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Hold every probe for `delay` before answering, like ffprobe on a large file.
    pub fn slowed_by(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Behave like ffprobe exiting non-zero on a corrupt file.
    pub fn failing() -> Self {
        Self {
            script: ProbeScript::Exit,
            delay: None,
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Paths probed so far, each with whether the file existed at probe time.
    pub fn seen(&self) -> Vec<(PathBuf, bool)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentProbe for FakeProbe {
    async fn probe(&self, path: &Path) -> Result<Dimensions, ProbeError> {
        self.seen
            .lock()
            .unwrap()
            .push((path.to_path_buf(), path.exists()));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match self.script {
            ProbeScript::Dimensions { width, height } => Ok(Dimensions { width, height }),
            ProbeScript::Exit => Err(ProbeError::Exited {
                status: "exit status: 1".to_string(),
                stderr: "moov atom not found".to_string(),
            }),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedPut {
    pub key: String,
    pub content_type: String,
    pub content_length: Option<u64>,
    pub url: String,
}

/// Forwards to a real backend and remembers every put and delete.
pub struct RecordingStorage {
    inner: Arc<dyn Storage>,
    puts: Mutex<Vec<RecordedPut>>,
    deletes: Mutex<Vec<String>>,
}

impl RecordingStorage {
    pub fn new(inner: Arc<dyn Storage>) -> Self {
        Self {
            inner,
            puts: Mutex::new(Vec::new()),
            deletes: Mutex::new(Vec::new()),
        }
    }

    pub fn puts(&self) -> Vec<RecordedPut> {
        self.puts.lock().unwrap().clone()
    }

    pub fn deletes(&self) -> Vec<String> {
        self.deletes.lock().unwrap().clone()
    }
}

#[async_trait]
impl Storage for RecordingStorage {
    async fn put_stream(
        &self,
        storage_key: &str,
        content_type: &str,
        content_length: Option<u64>,
        reader: ByteReader,
    ) -> StorageResult<String> {
        let url = self
            .inner
            .put_stream(storage_key, content_type, content_length, reader)
            .await?;
        self.puts.lock().unwrap().push(RecordedPut {
            key: storage_key.to_string(),
            content_type: content_type.to_string(),
            content_length,
            url: url.clone(),
        });
        Ok(url)
    }

    async fn delete(&self, storage_key: &str) -> Result<(), StorageError> {
        self.deletes.lock().unwrap().push(storage_key.to_string());
        self.inner.delete(storage_key).await
    }

    fn backend_type(&self) -> StorageBackend {
        self.inner.backend_type()
    }
}
