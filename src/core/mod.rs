//! Core model for relconf
//!
//! - **config**: the release configuration object, discovery, parsing and writing
//! - **branch**: branch-release rules and channel resolution
//! - **plugin**: ordered plugin entries and typed views over their options
//! - **context**: where to look for the configuration, built once from CLI flags
//! - **error**: error types with contextual help messages and exit codes

pub mod branch;
pub mod config;
pub mod context;
pub mod error;
pub mod plugin;
