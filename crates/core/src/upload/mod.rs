//! Bulk upload of order attachments.
//!
//! This module provides:
//! - Size validation and collision-resistant object naming
//! - Single-file store with a fixed-delay retry policy
//! - Batched, paced, concurrent upload with partial-failure tolerance
//! - Structured events for an injected observer

mod error;
mod events;
pub mod naming;
mod pipeline;
mod retry;
mod types;

#[cfg(test)]
mod testing;

pub use crate::storage::ObjectLocator;
pub use error::UploadError;
pub use events::{TracingObserver, UploadEvent, UploadObserver};
pub use pipeline::UploadPipeline;
pub use retry::{RetryDecision, RetryPolicy};
pub use types::{Attachment, DestinationNamespace, FileFailure, UploadReport, UploadSettings};

#[cfg(test)]
pub(crate) use testing::FakeStore;
