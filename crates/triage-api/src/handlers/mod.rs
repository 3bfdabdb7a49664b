//! HTTP handlers for triage-api.

pub mod health;
pub mod report;
