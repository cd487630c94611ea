/**
 * S3 Object Store
 *
 * Production `ObjectStore` backed by an S3 bucket. Configuration comes from
 * the environment: `S3_BUCKET_NAME`, `AWS_REGION`, and the standard AWS
 * credential variables.
 *
 * Stored objects are addressed by the bucket's virtual-hosted URL
 * (`https://{bucket}.s3.{region}.amazonaws.com/{key}`); the path suffix
 * after `.com/` is the storage key reused on deletion.
 */
use async_trait::async_trait;
use s3::creds::Credentials;
use s3::{Bucket, Region};

use crate::storage::{ObjectStore, StorageError};

/// S3-backed object store.
pub struct S3Store {
    bucket: Box<Bucket>,
    bucket_name: String,
    region: String,
}

impl S3Store {
    /// Build a store from `S3_BUCKET_NAME` / `AWS_REGION` / AWS credential
    /// environment variables.
    pub fn from_env() -> Result<Self, StorageError> {
        let bucket_name = std::env::var("S3_BUCKET_NAME")
            .map_err(|_| StorageError::Configuration("S3_BUCKET_NAME not set".to_string()))?;
        let region_name =
            std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string());

        let region: Region = region_name
            .parse()
            .map_err(|e| StorageError::Configuration(format!("invalid AWS_REGION: {e}")))?;
        let credentials = Credentials::default()
            .map_err(|e| StorageError::Configuration(format!("AWS credentials: {e}")))?;
        let bucket = Bucket::new(&bucket_name, region, credentials)
            .map_err(|e| StorageError::Configuration(format!("bucket setup: {e}")))?;

        Ok(Self {
            bucket,
            bucket_name,
            region: region_name,
        })
    }

    fn object_url(&self, key: &str) -> String {
        format!(
            "https://{}.s3.{}.amazonaws.com/{}",
            self.bucket_name, self.region, key
        )
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn put(
        &self,
        key: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<String, StorageError> {
        let response = self
            .bucket
            .put_object_with_content_type(key, bytes, content_type)
            .await
            .map_err(|e| StorageError::Upstream(format!("put {key}: {e}")))?;

        if response.status_code() != 200 {
            return Err(StorageError::Upstream(format!(
                "put {key}: unexpected status {}",
                response.status_code()
            )));
        }

        tracing::debug!("Stored object {} ({} bytes)", key, bytes.len());
        Ok(self.object_url(key))
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.bucket
            .delete_object(key)
            .await
            .map_err(|e| StorageError::Upstream(format!("delete {key}: {e}")))?;

        tracing::debug!("Deleted object {}", key);
        Ok(())
    }
}
