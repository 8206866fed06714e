//! Infrastructure layer module
//!
//! Cross-cutting plumbing behind the domain and services:
//! - Configuration management (figment merging and validation)
//! - Logging setup (tracing subscriber)
//!
//! Port implementations talking to external systems live in `crate::adapters`.

pub mod config;
pub mod logging;
