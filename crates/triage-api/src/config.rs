//! HTTP server configuration.

use std::time::Duration;

use axum::http::HeaderValue;
use triage_core::defaults::{
    ENV_ALLOWED_ORIGINS, ENV_HOST, ENV_MAX_BODY_SIZE_BYTES, ENV_PORT, ENV_REPORT_PATH,
    ENV_REQUEST_TIMEOUT_SECS, ENV_UPLOAD_CONCURRENCY, MAX_BODY_SIZE_BYTES, REPORT_PATH,
    REQUEST_TIMEOUT_SECS, SERVER_HOST, SERVER_PORT, UPLOAD_CONCURRENCY,
};
use triage_core::{env, Error, Result};

/// Listener, routing and request-shaping settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Path the report endpoint is mounted at.
    pub report_path: String,
    /// Upper bound for a whole multipart request body.
    pub max_body_size_bytes: usize,
    /// Origins allowed by CORS. Empty disables the CORS layer.
    pub allowed_origins: Vec<HeaderValue>,
    /// Attachments uploaded at once within one request.
    pub upload_concurrency: usize,
    /// Deadline for a whole report request, slow request bodies included.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: SERVER_HOST.to_string(),
            port: SERVER_PORT,
            report_path: REPORT_PATH.to_string(),
            max_body_size_bytes: MAX_BODY_SIZE_BYTES,
            allowed_origins: Vec::new(),
            upload_concurrency: UPLOAD_CONCURRENCY,
            request_timeout_secs: REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ServerConfig {
    /// Load from environment variables.
    pub fn from_env() -> Result<Self> {
        let report_path = env::optional(ENV_REPORT_PATH).unwrap_or_else(|| REPORT_PATH.to_string());
        if !report_path.starts_with('/') {
            return Err(Error::Config(format!(
                "{} must start with '/', got {}",
                ENV_REPORT_PATH, report_path
            )));
        }

        let upload_concurrency = env::parsed_or(ENV_UPLOAD_CONCURRENCY, UPLOAD_CONCURRENCY)?;
        if upload_concurrency == 0 {
            return Err(Error::Config(format!("{} must be at least 1", ENV_UPLOAD_CONCURRENCY)));
        }

        let request_timeout_secs = env::parsed_or(ENV_REQUEST_TIMEOUT_SECS, REQUEST_TIMEOUT_SECS)?;
        if request_timeout_secs == 0 {
            return Err(Error::Config(format!("{} must be at least 1", ENV_REQUEST_TIMEOUT_SECS)));
        }

        Ok(Self {
            host: env::optional(ENV_HOST).unwrap_or_else(|| SERVER_HOST.to_string()),
            port: env::parsed_or(ENV_PORT, SERVER_PORT)?,
            report_path,
            max_body_size_bytes: env::parsed_or(ENV_MAX_BODY_SIZE_BYTES, MAX_BODY_SIZE_BYTES)?,
            allowed_origins: parse_allowed_origins(
                env::optional(ENV_ALLOWED_ORIGINS).as_deref().unwrap_or(""),
            ),
            upload_concurrency,
            request_timeout_secs,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Socket address string for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parse a comma-separated origin list.
///
/// Entries that are not valid header values are skipped with a warning.
///
/// ```bash
/// ALLOWED_ORIGINS=https://monstastudios.github.io,http://localhost:8080
/// ```
pub fn parse_allowed_origins(raw: &str) -> Vec<HeaderValue> {
    raw.split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            if trimmed == "*" {
                tracing::warn!("Wildcard CORS origin is not supported, ignoring");
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!("Invalid CORS origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_allowed_origins_list() {
        let origins = parse_allowed_origins("https://monstastudios.github.io, http://localhost:8080");
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[0], "https://monstastudios.github.io");
        assert_eq!(origins[1], "http://localhost:8080");
    }

    #[test]
    fn test_parse_allowed_origins_empty_disables_cors() {
        assert!(parse_allowed_origins("").is_empty());
        assert!(parse_allowed_origins(" , ,").is_empty());
    }

    #[test]
    fn test_parse_allowed_origins_rejects_wildcard_and_invalid() {
        let origins = parse_allowed_origins("*,https://ok.example,bad\norigin");
        assert_eq!(origins.len(), 1);
        assert_eq!(origins[0], "https://ok.example");
    }

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.report_path, "/api/report");
        assert_eq!(config.upload_concurrency, 1);
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
        assert_eq!(config.request_timeout(), Duration::from_secs(120));
    }
}
