//! Shared types, errors, and configuration for Podorder.
//!
//! This crate provides common types used across all other crates:
//! - Order identifiers
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, StorageKind, StorageSettings, UploadLimits};
pub use error::{AppError, AppResult};
