//! [`ObjectStore`] backed by Apache OpenDAL.
//!
//! The S3 service is used in production; the in-memory service runs the same
//! write path in tests without network access.

use async_trait::async_trait;
use opendal::{services, Operator};
use tracing::debug;
use triage_core::{logging, Error, ObjectStore, Result};

use crate::config::S3Config;

/// OpenDAL operator plus the public base URL objects are served from.
#[derive(Clone)]
pub struct OpendalStore {
    op: Operator,
    public_base_url: String,
    backend: &'static str,
}

impl OpendalStore {
    /// Create a store writing to the configured S3 bucket.
    pub fn s3(config: &S3Config) -> Result<Self> {
        let mut builder = services::S3::default()
            .bucket(&config.bucket)
            .region(&config.region)
            .access_key_id(&config.access_key_id)
            .secret_access_key(&config.secret_access_key);
        if let Some(ref endpoint) = config.endpoint {
            builder = builder.endpoint(endpoint);
        }

        let op = Operator::new(builder)
            .map_err(|e| Error::Config(format!("Invalid S3 configuration: {}", e)))?
            .finish();

        Ok(Self {
            op,
            public_base_url: config.public_base_url(),
            backend: "s3",
        })
    }

    /// Create an in-memory store whose URLs are rooted at `public_base_url`.
    pub fn memory(public_base_url: impl Into<String>) -> Result<Self> {
        let op = Operator::new(services::Memory::default())
            .map_err(|e| Error::Config(format!("Invalid memory storage: {}", e)))?
            .finish();

        Ok(Self {
            op,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
            backend: "memory",
        })
    }

    /// Underlying operator, for reading objects back.
    pub fn operator(&self) -> &Operator {
        &self.op
    }

    /// Public URL of an object key.
    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url, encode_key(key))
    }
}

/// Percent-encode each path segment of an object key.
fn encode_key(key: &str) -> String {
    key.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[async_trait]
impl ObjectStore for OpendalStore {
    async fn put_object(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<String> {
        let size = data.len();
        self.op
            .write_with(key, data)
            .content_type(content_type)
            .await
            .map_err(|e| Error::Upload(format!("{} write of {} failed: {}", self.backend, key, e)))?;

        debug!(
            { logging::COMPONENT } = "opendal",
            backend = self.backend,
            { logging::STORAGE_KEY } = %key,
            { logging::SIZE_BYTES } = size,
            "Object written"
        );
        Ok(self.public_url(key))
    }

    fn backend_name(&self) -> &str {
        self.backend
    }
}
