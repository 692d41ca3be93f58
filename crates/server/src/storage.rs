use bytes::Bytes;
use object_store::ObjectStore;
use object_store::aws::AmazonS3Builder;
use object_store::path::Path as ObjectPath;
use projecthost_core::StorageKey;
use projecthost_runtime_config::StorageSettings;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("object not found")]
    NotFound,
    #[error("storage fetch timed out after {0:?}")]
    Timeout(Duration),
    #[error("invalid storage key: {0}")]
    InvalidKey(#[from] object_store::path::Error),
    #[error("storage error: {0}")]
    Storage(object_store::Error),
}

impl From<object_store::Error> for FetchError {
    fn from(e: object_store::Error) -> Self {
        match e {
            object_store::Error::NotFound { .. } => Self::NotFound,
            other => Self::Storage(other),
        }
    }
}

/// Read-only handle onto the bucket that project builds are published to.
///
/// Cloning is cheap; every request shares the same underlying client.
#[derive(Clone)]
pub struct ProjectStore {
    inner: Arc<dyn ObjectStore>,
    fetch_timeout: Duration,
}

impl ProjectStore {
    pub fn new(inner: Arc<dyn ObjectStore>, fetch_timeout: Duration) -> Self {
        Self {
            inner,
            fetch_timeout,
        }
    }

    /// Build an S3 client. Credentials come from the usual `AWS_*` environment.
    pub fn s3(settings: &StorageSettings, fetch_timeout: Duration) -> anyhow::Result<Self> {
        if settings.bucket.is_empty() {
            anyhow::bail!("storage bucket is not configured (set AWS_S3_BUCKET)");
        }
        let mut builder = AmazonS3Builder::from_env()
            .with_bucket_name(&settings.bucket)
            .with_region(&settings.region)
            .with_allow_http(settings.allow_http);
        if let Some(endpoint) = &settings.endpoint {
            builder = builder.with_endpoint(endpoint);
        }
        let s3 = builder.build()?;
        Ok(Self::new(Arc::new(s3), fetch_timeout))
    }

    /// Single get-object attempt, bounded by the fetch timeout. No retries.
    pub async fn fetch(&self, key: &StorageKey) -> Result<Bytes, FetchError> {
        let location = ObjectPath::parse(key.as_str())?;
        let get = async {
            let result = self.inner.get(&location).await?;
            result.bytes().await
        };
        match tokio::time::timeout(self.fetch_timeout, get).await {
            Ok(body) => Ok(body?),
            Err(_) => Err(FetchError::Timeout(self.fetch_timeout)),
        }
    }
}
