//! Core logic for print-on-demand order intake.
//!
//! This crate has no web or database dependencies. Storage goes through
//! OpenDAL, order persistence through the [`order::OrderRecordStore`] trait.
//!
//! # Modules
//!
//! - `storage` - Object storage abstraction (S3, Azure Blob, filesystem, memory)
//! - `upload` - Batched, paced, retrying bulk upload of attachments
//! - `order` - Order submission workflow

pub mod order;
pub mod storage;
pub mod upload;
