//! Batched, paced, retrying bulk upload.

use std::sync::Arc;

use futures::future::join_all;

use super::error::UploadError;
use super::events::{TracingObserver, UploadEvent, UploadObserver};
use super::naming;
use super::retry::{RetryDecision, RetryPolicy};
use super::types::{Attachment, DestinationNamespace, FileFailure, UploadReport, UploadSettings};
use crate::storage::{ObjectLocator, ObjectStore};

/// Uploads attachments to an object store in paced, concurrent batches.
pub struct UploadPipeline<S: ObjectStore> {
    store: Arc<S>,
    settings: UploadSettings,
    retry: RetryPolicy,
    observer: Arc<dyn UploadObserver>,
}

impl<S: ObjectStore> UploadPipeline<S> {
    /// Create a pipeline that reports to `tracing`.
    #[must_use]
    pub fn new(store: Arc<S>, settings: UploadSettings) -> Self {
        let retry = settings.retry_policy();
        Self {
            store,
            settings,
            retry,
            observer: Arc::new(TracingObserver),
        }
    }

    /// Replace the event sink.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn UploadObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Settings in effect.
    #[must_use]
    pub fn settings(&self) -> &UploadSettings {
        &self.settings
    }

    /// Store a single attachment, retrying transient storage failures.
    ///
    /// The object name is generated once and reused for every attempt, so a
    /// retried write overwrites rather than duplicates.
    ///
    /// # Errors
    ///
    /// Returns `PayloadTooLarge` without touching storage if the attachment
    /// exceeds the size limit, or `StoreFailed` with the last storage error
    /// once the retry policy gives up.
    pub async fn store_one(
        &self,
        attachment: &Attachment,
        namespace: &DestinationNamespace,
        correlation_id: Option<&str>,
    ) -> Result<ObjectLocator, UploadError> {
        if attachment.size() > self.settings.max_file_size {
            return Err(UploadError::payload_too_large(
                attachment.name(),
                attachment.size(),
                self.settings.max_file_size,
            ));
        }

        let object_name = naming::object_name(correlation_id, namespace, attachment.name());
        let mut attempt = 0;

        loop {
            attempt += 1;
            let result = self
                .store
                .put(
                    namespace.as_str(),
                    &object_name,
                    attachment.bytes().clone(),
                    attachment.content_type(),
                    true,
                )
                .await;

            let err = match result {
                Ok(locator) => {
                    self.observer.record(&UploadEvent::FileStored {
                        file: attachment.name().to_string(),
                        locator: locator.to_string(),
                        attempts: attempt,
                    });
                    return Ok(locator);
                }
                Err(err) => err,
            };

            let decision = self.retry.decide(attempt, &err);
            self.observer.record(&UploadEvent::AttemptFailed {
                file: attachment.name().to_string(),
                attempt,
                will_retry: decision != RetryDecision::GiveUp,
                error: err.to_string(),
            });

            match decision {
                RetryDecision::RetryAfter(delay) => tokio::time::sleep(delay).await,
                RetryDecision::GiveUp => {
                    return Err(UploadError::store_failed(attachment.name(), attempt, err));
                }
            }
        }
    }

    /// Upload every attachment and report each file's outcome.
    ///
    /// Batches run strictly one after another; files inside a batch run
    /// concurrently. A failed file never cancels its siblings or stops later
    /// batches.
    pub async fn upload_report(
        &self,
        attachments: &[Attachment],
        namespace: &DestinationNamespace,
        correlation_id: Option<&str>,
    ) -> UploadReport {
        let mut report = UploadReport::default();
        let batch_size = self.settings.batch_size.max(1);
        let batch_count = attachments.len().div_ceil(batch_size);

        for (index, batch) in attachments.chunks(batch_size).enumerate() {
            let results = join_all(
                batch
                    .iter()
                    .map(|attachment| self.store_one(attachment, namespace, correlation_id)),
            )
            .await;

            let mut succeeded = 0;
            for (attachment, result) in batch.iter().zip(results) {
                match result {
                    Ok(locator) => {
                        succeeded += 1;
                        report.locators.push(locator);
                    }
                    Err(error) => {
                        self.observer.record(&UploadEvent::FileFailed {
                            file: attachment.name().to_string(),
                            error: error.to_string(),
                        });
                        report.failures.push(FileFailure {
                            file: attachment.name().to_string(),
                            error,
                        });
                    }
                }
            }

            self.observer.record(&UploadEvent::BatchSettled {
                batch: index,
                size: batch.len(),
                succeeded,
                failed: batch.len() - succeeded,
            });

            if index + 1 < batch_count {
                self.observer.record(&UploadEvent::BatchPaced {
                    batch: index,
                    delay: self.settings.batch_delay,
                });
                tokio::time::sleep(self.settings.batch_delay).await;
            }
        }

        self.observer.record(&UploadEvent::Completed {
            namespace: namespace.to_string(),
            attempted: report.attempted(),
            succeeded: report.succeeded(),
            failed: report.failed(),
        });

        report
    }

    /// Upload every attachment, tolerating partial failure.
    ///
    /// Returns the locators of stored files when at least one succeeded;
    /// failures are reported to the observer only.
    ///
    /// # Errors
    ///
    /// Returns `PipelineFailed`, wrapping the first failure, when files were
    /// attempted and none was stored.
    pub async fn upload_all(
        &self,
        attachments: &[Attachment],
        namespace: &DestinationNamespace,
        correlation_id: Option<&str>,
    ) -> Result<Vec<ObjectLocator>, UploadError> {
        self.upload_report(attachments, namespace, correlation_id)
            .await
            .into_result()
    }
}
