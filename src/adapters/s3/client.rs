//! S3 object store adapter
//!
//! Uploads rendered payloads to the configured bucket and deletes them
//! again during compensation. Works against AWS S3 or any S3-compatible
//! store via the endpoint override (LocalStack, MinIO).

use crate::adapters::store::{ObjectStore, VersionToken};
use crate::config::S3Config;
use crate::domain::errors::ObjectStoreError;
use crate::domain::Result;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;

/// Object store backed by an S3 bucket
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl S3ObjectStore {
    /// Build a client from configuration
    ///
    /// Static credentials from the configuration take precedence; otherwise
    /// the default AWS credential chain (environment, profile, instance
    /// role) is used.
    pub async fn new(config: &S3Config) -> Result<Self> {
        let region = aws_types::region::Region::new(config.region.clone());

        let mut builder = match (&config.access_key_id, &config.secret_access_key) {
            (Some(access_key_id), Some(secret_access_key)) => {
                let credentials = aws_credential_types::Credentials::new(
                    access_key_id,
                    secret_access_key,
                    None,
                    None,
                    "fracht-static",
                );
                aws_sdk_s3::Config::builder()
                    .region(region)
                    .credentials_provider(credentials)
                    .behavior_version_latest()
            }
            _ => {
                let shared = aws_config::defaults(BehaviorVersion::latest())
                    .region(region)
                    .load()
                    .await;
                aws_sdk_s3::config::Builder::from(&shared)
            }
        };

        if let Some(ref endpoint) = config.endpoint {
            builder = builder.endpoint_url(endpoint);
        }
        if config.force_path_style {
            builder = builder.force_path_style(true);
        }

        Ok(Self {
            client: Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
        })
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<VersionToken> {
        tracing::info!(bucket = %self.bucket, key = %key, "Uploading object to S3");
        let resp = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(bytes.to_vec()))
            .send()
            .await
            .map_err(|e| ObjectStoreError::UploadFailed {
                key: key.to_string(),
                message: e.to_string(),
            })?;

        let etag = resp.e_tag().ok_or_else(|| ObjectStoreError::UploadFailed {
            key: key.to_string(),
            message: "response contained no ETag".to_string(),
        })?;
        Ok(VersionToken::new(etag))
    }

    async fn delete(&self, key: &str) -> Result<()> {
        tracing::info!(bucket = %self.bucket, key = %key, "Deleting object from S3");
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| ObjectStoreError::DeleteFailed {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }
}
