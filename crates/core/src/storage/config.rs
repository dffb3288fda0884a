//! Storage configuration types.

use podorder_shared::{StorageKind, StorageSettings};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::error::StorageError;

/// Storage provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StorageProvider {
    /// S3-compatible storage: Supabase Storage, Cloudflare R2, AWS S3
    S3 {
        /// S3 endpoint URL.
        endpoint: String,
        /// S3 bucket name.
        bucket: String,
        /// Access key ID.
        access_key_id: String,
        /// Secret access key.
        secret_access_key: String,
        /// Region.
        region: String,
    },
    /// Azure Blob Storage
    AzureBlob {
        /// Azure storage account name.
        account: String,
        /// Azure storage access key.
        access_key: String,
        /// Azure container name.
        container: String,
    },
    /// Local filesystem (development only)
    LocalFs {
        /// Root directory path.
        root: PathBuf,
    },
    /// In-process memory (tests only)
    Memory,
}

impl StorageProvider {
    /// Create S3-compatible provider.
    #[must_use]
    pub fn s3(
        endpoint: impl Into<String>,
        bucket: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self::S3 {
            endpoint: endpoint.into(),
            bucket: bucket.into(),
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            region: region.into(),
        }
    }

    /// Create Azure Blob Storage provider.
    #[must_use]
    pub fn azure_blob(
        account: impl Into<String>,
        access_key: impl Into<String>,
        container: impl Into<String>,
    ) -> Self {
        Self::AzureBlob {
            account: account.into(),
            access_key: access_key.into(),
            container: container.into(),
        }
    }

    /// Create local filesystem provider (development only).
    #[must_use]
    pub fn local_fs(root: impl Into<PathBuf>) -> Self {
        Self::LocalFs { root: root.into() }
    }

    /// Get the provider name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::S3 { .. } => "s3",
            Self::AzureBlob { .. } => "azure_blob",
            Self::LocalFs { .. } => "local",
            Self::Memory => "memory",
        }
    }

    /// Base URL objects are publicly reachable under, without a trailing slash.
    #[must_use]
    pub fn default_public_base_url(&self) -> String {
        match self {
            Self::S3 {
                endpoint, bucket, ..
            } => format!("{}/{bucket}", endpoint.trim_end_matches('/')),
            Self::AzureBlob {
                account, container, ..
            } => format!("https://{account}.blob.core.windows.net/{container}"),
            Self::LocalFs { root } => {
                format!("file://{}", root.to_string_lossy().trim_end_matches('/'))
            }
            Self::Memory => "memory://".to_string(),
        }
    }
}

/// Storage service configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Storage provider configuration.
    pub provider: StorageProvider,
    /// Overrides the provider-derived public URL base (e.g. a CDN).
    pub public_base_url: Option<String>,
    /// `Cache-Control` header stored with every object.
    pub cache_control: String,
}

impl StorageConfig {
    /// Default cache control: 1 hour.
    pub const DEFAULT_CACHE_CONTROL: &'static str = "max-age=3600";

    /// Create a new storage config with default settings.
    #[must_use]
    pub fn new(provider: StorageProvider) -> Self {
        Self {
            provider,
            public_base_url: None,
            cache_control: Self::DEFAULT_CACHE_CONTROL.to_string(),
        }
    }

    /// Set the public URL base.
    #[must_use]
    pub fn with_public_base_url(mut self, url: impl Into<String>) -> Self {
        self.public_base_url = Some(url.into());
        self
    }

    /// Set the cache control header.
    #[must_use]
    pub fn with_cache_control(mut self, value: impl Into<String>) -> Self {
        self.cache_control = value.into();
        self
    }

    /// Public URL base in effect, without a trailing slash.
    #[must_use]
    pub fn public_base_url(&self) -> String {
        self.public_base_url.as_ref().map_or_else(
            || self.provider.default_public_base_url(),
            |url| url.trim_end_matches('/').to_string(),
        )
    }

    /// Build a storage config from loaded application settings.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a field required by the selected
    /// backend is missing.
    pub fn from_settings(settings: &StorageSettings) -> Result<Self, StorageError> {
        fn required<'a>(value: Option<&'a String>, field: &str) -> Result<&'a str, StorageError> {
            value
                .map(String::as_str)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| StorageError::configuration(format!("storage.{field} is required")))
        }

        let provider = match settings.kind {
            StorageKind::S3 => StorageProvider::s3(
                required(settings.endpoint.as_ref(), "endpoint")?,
                required(settings.bucket.as_ref(), "bucket")?,
                required(settings.access_key_id.as_ref(), "access_key_id")?,
                required(settings.secret_access_key.as_ref(), "secret_access_key")?,
                settings.region.as_str(),
            ),
            StorageKind::AzureBlob => StorageProvider::azure_blob(
                required(settings.account.as_ref(), "account")?,
                required(settings.access_key.as_ref(), "access_key")?,
                required(settings.bucket.as_ref(), "bucket")?,
            ),
            StorageKind::LocalFs => StorageProvider::local_fs(settings.root.as_str()),
            StorageKind::Memory => StorageProvider::Memory,
        };

        let mut config = Self::new(provider);
        config.public_base_url.clone_from(&settings.public_base_url);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_provider_s3() {
        let provider = StorageProvider::s3(
            "https://project.supabase.co/storage/v1/s3/",
            "orders",
            "access_key",
            "secret_key",
            "auto",
        );
        assert_eq!(provider.name(), "s3");
        assert_eq!(
            provider.default_public_base_url(),
            "https://project.supabase.co/storage/v1/s3/orders"
        );
    }

    #[test]
    fn test_storage_provider_azure() {
        let provider = StorageProvider::azure_blob("podorder", "access_key", "attachments");
        assert_eq!(provider.name(), "azure_blob");
        assert_eq!(
            provider.default_public_base_url(),
            "https://podorder.blob.core.windows.net/attachments"
        );
    }

    #[test]
    fn test_storage_provider_local() {
        let provider = StorageProvider::local_fs("/var/podorder/");
        assert_eq!(provider.name(), "local");
        assert_eq!(provider.default_public_base_url(), "file:///var/podorder");
    }

    #[test]
    fn test_public_base_url_override() {
        let config = StorageConfig::new(StorageProvider::Memory)
            .with_public_base_url("https://cdn.example.com/public/");
        assert_eq!(config.public_base_url(), "https://cdn.example.com/public");
        assert_eq!(config.cache_control, StorageConfig::DEFAULT_CACHE_CONTROL);
    }

    #[test]
    fn test_from_settings_s3_requires_credentials() {
        let settings = StorageSettings {
            kind: StorageKind::S3,
            endpoint: Some("https://s3.example.com".to_string()),
            bucket: Some("orders".to_string()),
            ..StorageSettings::default()
        };
        let err = StorageConfig::from_settings(&settings).unwrap_err();
        assert!(matches!(err, StorageError::Configuration(msg) if msg.contains("access_key_id")));
    }

    #[test]
    fn test_from_settings_memory() {
        let settings = StorageSettings {
            kind: StorageKind::Memory,
            public_base_url: Some("https://files.example.com".to_string()),
            ..StorageSettings::default()
        };
        let config = StorageConfig::from_settings(&settings).unwrap();
        assert_eq!(config.provider.name(), "memory");
        assert_eq!(config.public_base_url(), "https://files.example.com");
    }
}
