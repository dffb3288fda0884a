//! Order submission.
//!
//! This module provides:
//! - Validation of a customer submission before any upload
//! - Concurrent upload of design, mockup and payment attachments
//! - Persistence of the order through an injected record store
//! - Download file naming for staff

mod error;
mod service;
mod types;


pub use error::SubmissionError;
pub use service::{OrderRecordStore, SubmissionService, download_file_name, validate_submission};
pub use types::{
    AttachmentCategory, CustomerDetails, NewOrderRecord, OrderItem, OrderMode, OrderStatus,
    OrderSubmission, SubmittedOrder,
};
