//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Object storage configuration.
    pub storage: StorageSettings,
    /// Bulk upload limits and pacing.
    #[serde(default)]
    pub upload: UploadLimits,
}

/// Storage backend kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    /// S3-compatible storage (Supabase, R2, AWS S3).
    S3,
    /// Azure Blob Storage.
    AzureBlob,
    /// Local filesystem.
    #[default]
    LocalFs,
    /// In-process memory store.
    Memory,
}

/// Object storage configuration.
///
/// Only the fields relevant to the selected `kind` are read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageSettings {
    /// Storage backend kind.
    #[serde(default)]
    pub kind: StorageKind,
    /// S3 endpoint URL.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// S3 bucket or Azure container.
    #[serde(default)]
    pub bucket: Option<String>,
    /// S3 access key ID.
    #[serde(default)]
    pub access_key_id: Option<String>,
    /// S3 secret access key.
    #[serde(default)]
    pub secret_access_key: Option<String>,
    /// S3 region.
    #[serde(default = "default_region")]
    pub region: String,
    /// Azure storage account name.
    #[serde(default)]
    pub account: Option<String>,
    /// Azure storage access key.
    #[serde(default)]
    pub access_key: Option<String>,
    /// Root directory for the local filesystem backend.
    #[serde(default = "default_root")]
    pub root: String,
    /// Base URL used to build public object URLs.
    #[serde(default)]
    pub public_base_url: Option<String>,
}

fn default_region() -> String {
    "auto".to_string()
}

fn default_root() -> String {
    "./storage".to_string()
}

/// Bulk upload limits and pacing.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadLimits {
    /// Maximum attachment size in bytes.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    /// Files uploaded concurrently per batch.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Total attempts per file, including the first.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Delay between attempts of one file, in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    /// Delay between batches, in milliseconds.
    #[serde(default = "default_batch_delay_ms")]
    pub batch_delay_ms: u64,
}

fn default_max_file_size() -> u64 {
    30 * 1024 * 1024 // 30 MiB
}

fn default_batch_size() -> usize {
    3
}

fn default_max_attempts() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

fn default_batch_delay_ms() -> u64 {
    1000
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_file_size: default_max_file_size(),
            batch_size: default_batch_size(),
            max_attempts: default_max_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
            batch_delay_ms: default_batch_delay_ms(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("PODORDER").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
