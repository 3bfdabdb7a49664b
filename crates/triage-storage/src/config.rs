//! S3 storage configuration.

use std::fmt;

use triage_core::defaults::{
    ENV_AWS_ACCESS_KEY_ID, ENV_AWS_REGION, ENV_AWS_SECRET_ACCESS_KEY, ENV_S3_BUCKET_NAME,
    ENV_S3_ENDPOINT, ENV_S3_KEY_PREFIX, ENV_S3_PUBLIC_BASE_URL, ENV_UPLOAD_TIMEOUT_SECS,
    STORAGE_KEY_PREFIX, UPLOAD_TIMEOUT_SECS,
};
use triage_core::{env, Result};

/// Configuration for the S3 (or S3-compatible) screenshot bucket.
#[derive(Clone)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    /// Custom endpoint for S3-compatible providers.
    pub endpoint: Option<String>,
    /// Base URL objects are publicly readable under, overriding the derived one.
    pub public_base_url: Option<String>,
    /// Key prefix for uploaded objects.
    pub key_prefix: String,
    /// Per-upload timeout in seconds.
    pub upload_timeout_secs: u64,
}

impl S3Config {
    /// Load from environment variables.
    ///
    /// Fails with a configuration error naming the first missing variable.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            bucket: env::required(ENV_S3_BUCKET_NAME)?,
            region: env::required(ENV_AWS_REGION)?,
            access_key_id: env::required(ENV_AWS_ACCESS_KEY_ID)?,
            secret_access_key: env::required(ENV_AWS_SECRET_ACCESS_KEY)?,
            endpoint: env::optional(ENV_S3_ENDPOINT),
            public_base_url: env::optional(ENV_S3_PUBLIC_BASE_URL),
            key_prefix: env::optional(ENV_S3_KEY_PREFIX)
                .unwrap_or_else(|| STORAGE_KEY_PREFIX.to_string()),
            upload_timeout_secs: env::parsed_or(ENV_UPLOAD_TIMEOUT_SECS, UPLOAD_TIMEOUT_SECS)?,
        })
    }

    /// Base URL stored objects are reachable under, without a trailing slash.
    ///
    /// Precedence: explicit public base URL, then path-style URL on a custom
    /// endpoint, then the AWS virtual-hosted bucket URL.
    pub fn public_base_url(&self) -> String {
        if let Some(ref base) = self.public_base_url {
            return base.trim_end_matches('/').to_string();
        }
        if let Some(ref endpoint) = self.endpoint {
            return format!("{}/{}", endpoint.trim_end_matches('/'), self.bucket);
        }
        format!("https://{}.s3.{}.amazonaws.com", self.bucket, self.region)
    }
}

impl fmt::Debug for S3Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("S3Config")
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .field("access_key_id", &"<redacted>")
            .field("secret_access_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("public_base_url", &self.public_base_url)
            .field("key_prefix", &self.key_prefix)
            .field("upload_timeout_secs", &self.upload_timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> S3Config {
        S3Config {
            bucket: "studio-reports".to_string(),
            region: "eu-west-2".to_string(),
            access_key_id: "AKIAEXAMPLE".to_string(),
            secret_access_key: "very-secret".to_string(),
            endpoint: None,
            public_base_url: None,
            key_prefix: "uploads".to_string(),
            upload_timeout_secs: 30,
        }
    }

    #[test]
    fn test_public_base_url_aws_default() {
        assert_eq!(
            config().public_base_url(),
            "https://studio-reports.s3.eu-west-2.amazonaws.com"
        );
    }

    #[test]
    fn test_public_base_url_custom_endpoint_is_path_style() {
        let mut c = config();
        c.endpoint = Some("https://minio.internal:9000/".to_string());
        assert_eq!(c.public_base_url(), "https://minio.internal:9000/studio-reports");
    }

    #[test]
    fn test_public_base_url_override_wins() {
        let mut c = config();
        c.endpoint = Some("https://minio.internal:9000".to_string());
        c.public_base_url = Some("https://cdn.example.com/reports/".to_string());
        assert_eq!(c.public_base_url(), "https://cdn.example.com/reports");
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let debug = format!("{:?}", config());
        assert!(!debug.contains("AKIAEXAMPLE"));
        assert!(!debug.contains("very-secret"));
        assert!(debug.contains("studio-reports"));
    }
}
