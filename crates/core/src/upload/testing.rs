//! In-memory fakes for exercising the pipeline without a storage backend.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use bytes::Bytes;

use super::events::{UploadEvent, UploadObserver};
use crate::storage::{ObjectLocator, ObjectStore, StorageError};

/// Object store whose failures are scripted per file body.
#[derive(Default)]
pub(crate) struct FakeStore {
    failures: Mutex<HashMap<Vec<u8>, u32>>,
    rejected: Vec<Vec<u8>>,
    latency: Duration,
    calls: AtomicUsize,
    attempts: Mutex<Vec<String>>,
    stored: Mutex<Vec<String>>,
}

impl FakeStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Fail the first `times` writes of a file with this body.
    pub(crate) fn failing(self, body: &[u8], times: u32) -> Self {
        self.failures
            .lock()
            .unwrap()
            .insert(body.to_vec(), times);
        self
    }

    /// Fail every write of a file with this body.
    pub(crate) fn always_failing(self, body: &[u8]) -> Self {
        self.failing(body, u32::MAX)
    }

    /// Reject every write of a file with this body as an invalid key.
    pub(crate) fn rejecting(mut self, body: &[u8]) -> Self {
        self.rejected.push(body.to_vec());
        self
    }

    /// Delay every write.
    pub(crate) fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Keys of every write attempt, successful or not.
    pub(crate) fn attempted_keys(&self) -> Vec<String> {
        self.attempts.lock().unwrap().clone()
    }

    /// Keys of successful writes.
    pub(crate) fn stored_keys(&self) -> Vec<String> {
        self.stored.lock().unwrap().clone()
    }
}

impl ObjectStore for FakeStore {
    async fn put(
        &self,
        namespace: &str,
        object_name: &str,
        bytes: Bytes,
        _content_type: &str,
        _overwrite: bool,
    ) -> Result<ObjectLocator, StorageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let key = format!("{namespace}/{object_name}");
        self.attempts.lock().unwrap().push(key.clone());

        if self.rejected.iter().any(|r| r.as_slice() == bytes.as_ref()) {
            return Err(StorageError::invalid_key(format!("rejected key: {key}")));
        }

        if let Some(remaining) = self.failures.lock().unwrap().get_mut(bytes.as_ref()) {
            if *remaining > 0 {
                if *remaining != u32::MAX {
                    *remaining -= 1;
                }
                return Err(StorageError::operation("503 Service Unavailable"));
            }
        }

        self.stored.lock().unwrap().push(key);
        Ok(self.public_url_for(namespace, object_name))
    }

    fn public_url_for(&self, namespace: &str, object_name: &str) -> ObjectLocator {
        ObjectLocator::new(format!("https://files.test/{namespace}/{object_name}"))
    }
}

/// Observer that keeps every event.
#[derive(Default)]
pub(crate) struct RecordingObserver {
    events: Mutex<Vec<UploadEvent>>,
}

impl RecordingObserver {
    pub(crate) fn events(&self) -> Vec<UploadEvent> {
        self.events.lock().unwrap().clone()
    }

    pub(crate) fn count(&self, predicate: impl Fn(&UploadEvent) -> bool) -> usize {
        self.events.lock().unwrap().iter().filter(|e| predicate(e)).count()
    }
}

impl UploadObserver for RecordingObserver {
    fn record(&self, event: &UploadEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
