//! # triage-storage
//!
//! Object storage for report screenshots.
//!
//! This crate provides:
//! - [`S3Config`] loaded from the environment
//! - [`OpendalStore`], an `ObjectStore` over Apache OpenDAL (S3 or in-memory)
//! - [`AttachmentUploader`], which keys, types and uploads one attachment
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use triage_storage::{AttachmentUploader, OpendalStore, S3Config};
//!
//! # fn main() -> triage_core::Result<()> {
//! let config = S3Config::from_env()?;
//! let store = OpendalStore::s3(&config)?;
//! let uploader = AttachmentUploader::new(
//!     Arc::new(store),
//!     config.key_prefix.clone(),
//!     Duration::from_secs(config.upload_timeout_secs),
//! );
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod opendal_store;
pub mod uploader;

pub use config::S3Config;
pub use opendal_store::OpendalStore;
pub use uploader::{storage_key, AttachmentUploader};
