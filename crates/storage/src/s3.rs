//! S3-compatible object store.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;

use crate::store::{ObjectStore, StorageError};

/// Object store backed by an S3 bucket.
pub struct S3Store {
    client: aws_sdk_s3::Client,
    bucket: String,
    region: String,
}

impl S3Store {
    /// Create a store over an existing SDK client.
    pub fn new(client: aws_sdk_s3::Client, bucket: String, region: String) -> Self {
        Self {
            client,
            bucket,
            region,
        }
    }

    /// Create a store using credentials and settings from the default
    /// AWS provider chain (environment, profile, instance metadata).
    pub async fn connect(bucket: String, region: String) -> Self {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(region.clone()))
            .load()
            .await;
        Self::new(aws_sdk_s3::Client::new(&config), bucket, region)
    }

    /// Public HTTPS URL of an object in this bucket.
    fn public_url(&self, path: &str) -> String {
        format!(
            "https://{}.s3.{}.amazonaws.com/{}",
            self.bucket, self.region, path
        )
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn put(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(path)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        tracing::debug!(path, bucket = %self.bucket, "Stored object in S3");
        Ok(())
    }

    async fn make_public(&self, path: &str) -> Result<String, StorageError> {
        self.client
            .put_object_acl()
            .bucket(&self.bucket)
            .key(path)
            .acl(ObjectCannedAcl::PublicRead)
            .send()
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        Ok(self.public_url(path))
    }
}
