//! # triage-core
//!
//! Core types, traits, and pure report logic for triage.
//!
//! This crate provides the data model of a submitted report, the filename
//! sanitizer and content-type resolver, the report assembler, and the trait
//! definitions for the storage and issue-tracker backends.

pub mod defaults;
pub mod env;
pub mod error;
pub mod file_safety;
pub mod logging;
pub mod models;
pub mod report;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use file_safety::{resolve_content_type, sanitize_filename};
pub use models::*;
pub use report::{assemble, effective_tool};
pub use traits::*;
