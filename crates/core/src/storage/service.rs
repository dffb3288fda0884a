//! Storage service implementation using Apache OpenDAL.

use std::fmt;
use std::future::Future;

use bytes::Bytes;
use opendal::{Capability, ErrorKind, Operator, services};
use serde::{Deserialize, Serialize};

use super::config::{StorageConfig, StorageProvider};
use super::error::StorageError;

/// Public, durable reference to a stored object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectLocator(String);

impl ObjectLocator {
    /// Wrap an already-built public URL.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Returns the URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the locator, returning the URL.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ObjectLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ObjectLocator> for String {
    fn from(locator: ObjectLocator) -> Self {
        locator.0
    }
}

/// Metadata about a stored object.
#[derive(Debug, Clone)]
pub struct ObjectMetadata {
    /// Storage key.
    pub storage_key: String,
    /// Object size in bytes.
    pub file_size: u64,
    /// Content type.
    pub content_type: Option<String>,
}

/// Object storage capability consumed by the upload pipeline.
///
/// Implemented by [`StorageService`]; tests substitute in-memory fakes.
pub trait ObjectStore: Send + Sync {
    /// Store `bytes` as `{namespace}/{object_name}` and return its public locator.
    fn put(
        &self,
        namespace: &str,
        object_name: &str,
        bytes: Bytes,
        content_type: &str,
        overwrite: bool,
    ) -> impl Future<Output = Result<ObjectLocator, StorageError>> + Send;

    /// Public locator an object under `namespace` would be served at.
    fn public_url_for(&self, namespace: &str, object_name: &str) -> ObjectLocator;
}

/// Storage service backed by an OpenDAL operator.
pub struct StorageService {
    operator: Operator,
    capability: Capability,
    config: StorageConfig,
}

impl StorageService {
    /// Create a new storage service from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_config(config: StorageConfig) -> Result<Self, StorageError> {
        let operator = Self::create_operator(&config.provider)?;
        let capability = operator.info().full_capability();
        Ok(Self {
            operator,
            capability,
            config,
        })
    }

    /// Create OpenDAL operator from provider config.
    fn create_operator(provider: &StorageProvider) -> Result<Operator, StorageError> {
        match provider {
            StorageProvider::S3 {
                endpoint,
                bucket,
                access_key_id,
                secret_access_key,
                region,
            } => build_operator(
                services::S3::default()
                    .endpoint(endpoint)
                    .bucket(bucket)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key)
                    .region(region),
            ),
            StorageProvider::AzureBlob {
                account,
                access_key,
                container,
            } => build_operator(
                services::Azblob::default()
                    .account_name(account)
                    .account_key(access_key)
                    .container(container),
            ),
            StorageProvider::LocalFs { root } => build_operator(
                services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| StorageError::configuration("invalid path"))?,
                ),
            ),
            StorageProvider::Memory => build_operator(services::Memory::default()),
        }
    }

    /// Build the storage key for an object in a namespace.
    ///
    /// Format: `{namespace}/{object_name}`
    ///
    /// # Errors
    ///
    /// Returns an error if the namespace has empty or relative segments, or
    /// the object name is empty or contains a separator.
    pub fn object_key(namespace: &str, object_name: &str) -> Result<String, StorageError> {
        let bad_segment = |s: &str| s.is_empty() || s == "." || s == "..";

        if namespace.split('/').any(bad_segment) {
            return Err(StorageError::invalid_key(format!(
                "namespace '{namespace}' has an empty or relative segment"
            )));
        }
        if bad_segment(object_name) || object_name.contains('/') {
            return Err(StorageError::invalid_key(format!(
                "object name '{object_name}' is not a single path segment"
            )));
        }

        Ok(format!("{namespace}/{object_name}"))
    }

    /// Public URL for a storage key.
    #[must_use]
    pub fn public_url(&self, key: &str) -> ObjectLocator {
        ObjectLocator::new(format!("{}/{key}", self.config.public_base_url()))
    }

    /// Get metadata for a stored object.
    ///
    /// # Errors
    ///
    /// Returns an error if the object does not exist or cannot be accessed.
    pub async fn stat(&self, key: &str) -> Result<ObjectMetadata, StorageError> {
        let meta = self.operator.stat(key).await.map_err(StorageError::from)?;

        Ok(ObjectMetadata {
            storage_key: key.to_string(),
            file_size: meta.content_length(),
            content_type: meta.content_type().map(String::from),
        })
    }

    /// Delete an object from storage.
    ///
    /// # Errors
    ///
    /// Returns an error if deletion fails.
    pub async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.operator.delete(key).await.map_err(StorageError::from)
    }

    /// Check if an object exists in storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot answer; a missing object is `Ok(false)`.
    pub async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        match self.operator.stat(key).await {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Get the storage provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.config.provider.name()
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }
}

impl ObjectStore for StorageService {
    async fn put(
        &self,
        namespace: &str,
        object_name: &str,
        bytes: Bytes,
        content_type: &str,
        overwrite: bool,
    ) -> Result<ObjectLocator, StorageError> {
        let key = Self::object_key(namespace, object_name)?;

        // Backends without conditional writes get a best-effort existence check.
        if !overwrite && !self.capability.write_with_if_not_exists && self.exists(&key).await? {
            return Err(StorageError::AlreadyExists { key });
        }

        let mut write = self.operator.write_with(&key, bytes);
        if self.capability.write_with_content_type {
            write = write.content_type(content_type);
        }
        if self.capability.write_with_cache_control {
            write = write.cache_control(&self.config.cache_control);
        }
        if !overwrite && self.capability.write_with_if_not_exists {
            write = write.if_not_exists(true);
        }
        write.await.map_err(StorageError::from)?;

        Ok(self.public_url(&key))
    }

    fn public_url_for(&self, namespace: &str, object_name: &str) -> ObjectLocator {
        self.public_url(&format!("{namespace}/{object_name}"))
    }
}

fn build_operator<B: opendal::Builder>(builder: B) -> Result<Operator, StorageError> {
    Ok(Operator::new(builder)
        .map_err(|e| StorageError::configuration(e.to_string()))?
        .finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_service() -> StorageService {
        let config = StorageConfig::new(StorageProvider::Memory)
            .with_public_base_url("https://files.example.com/storage/v1/object/public");
        StorageService::from_config(config).expect("should create service")
    }

    #[test]
    fn test_object_key() {
        let key = StorageService::object_key("orders/ORD123/designs", "front.png").unwrap();
        assert_eq!(key, "orders/ORD123/designs/front.png");
    }

    #[test]
    fn test_object_key_rejects_bad_segments() {
        for namespace in ["", "/orders", "orders/", "orders//designs", "orders/../x", "./a"] {
            let err = StorageService::object_key(namespace, "a.png").unwrap_err();
            assert!(matches!(err, StorageError::InvalidKey(_)), "{namespace}");
        }
        for name in ["", ".", "..", "a/b.png"] {
            let err = StorageService::object_key("orders", name).unwrap_err();
            assert!(matches!(err, StorageError::InvalidKey(_)), "{name}");
        }
    }

    #[test]
    fn test_public_url_for() {
        let service = memory_service();
        let locator = service.public_url_for("orders/ORD123/mockups", "m.jpg");
        assert_eq!(
            locator.as_str(),
            "https://files.example.com/storage/v1/object/public/orders/ORD123/mockups/m.jpg"
        );
    }

    #[tokio::test]
    async fn test_put_then_stat() {
        let service = memory_service();
        let locator = service
            .put(
                "orders/ORD123/designs",
                "front.png",
                Bytes::from_static(b"png-bytes"),
                "image/png",
                true,
            )
            .await
            .expect("put should succeed");

        assert_eq!(
            locator,
            service.public_url_for("orders/ORD123/designs", "front.png")
        );
        let meta = service
            .stat("orders/ORD123/designs/front.png")
            .await
            .expect("object should exist");
        assert_eq!(meta.file_size, 9);
        assert!(service.exists("orders/ORD123/designs/front.png").await.unwrap());
    }

    #[tokio::test]
    async fn test_put_overwrites_when_allowed() {
        let service = memory_service();
        for body in [&b"first"[..], &b"second-version"[..]] {
            service
                .put("orders/ORD1/payment", "proof.jpg", Bytes::copy_from_slice(body), "image/jpeg", true)
                .await
                .expect("put should succeed");
        }
        let meta = service.stat("orders/ORD1/payment/proof.jpg").await.unwrap();
        assert_eq!(meta.file_size, 14);
    }

    #[tokio::test]
    async fn test_put_without_overwrite_rejects_existing() {
        let service = memory_service();
        service
            .put("orders/ORD1/payment", "proof.jpg", Bytes::from_static(b"a"), "image/jpeg", false)
            .await
            .expect("first put should succeed");

        let err = service
            .put("orders/ORD1/payment", "proof.jpg", Bytes::from_static(b"b"), "image/jpeg", false)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::AlreadyExists { .. }));
    }

    #[tokio::test]
    async fn test_put_invalid_key() {
        let service = memory_service();
        let err = service
            .put("orders//x", "a.png", Bytes::new(), "image/png", true)
            .await
            .unwrap_err();
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_delete() {
        let service = memory_service();
        service
            .put("orders/ORD9/designs", "d.ai", Bytes::from_static(b"x"), "application/postscript", true)
            .await
            .unwrap();
        service.delete("orders/ORD9/designs/d.ai").await.unwrap();
        assert!(!service.exists("orders/ORD9/designs/d.ai").await.unwrap());
    }

    #[tokio::test]
    async fn test_exists_missing_object_is_ok_false() {
        let service = memory_service();
        let exists = service
            .exists("orders/ORD404/designs/missing.png")
            .await
            .expect("missing object is not an error");
        assert!(!exists);
    }
}
