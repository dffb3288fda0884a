//! Object storage for order attachments using Apache OpenDAL.
//!
//! This module provides vendor-agnostic object storage with support for:
//! - S3-compatible: Supabase Storage, Cloudflare R2, AWS S3
//! - Azure Blob Storage
//! - Local filesystem (development only)
//! - In-process memory (tests)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                   ObjectStore (capability)                       │
//! │   put(namespace, name, bytes, content_type, overwrite)           │
//! │   public_url_for(namespace, name)                                │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                      Apache OpenDAL                              │
//! │ op.write_with("ns/name", data)   │ op.stat("key")                │
//! │ op.delete("key")                 │                               │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod service;

pub use config::{StorageConfig, StorageProvider};
pub use error::StorageError;
pub use service::{ObjectLocator, ObjectMetadata, ObjectStore, StorageService};
