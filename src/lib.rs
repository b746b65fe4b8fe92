//! Typed model, loader and validator for release-automation configuration
//!
//! The configuration object names the branches releases are cut from, the
//! channel each branch publishes on, and an ordered plugin pipeline with
//! per-plugin options. relconf reads it from any of the files the release
//! engine discovers, keeps its declared order intact, and checks the
//! structural rules the engine relies on before it ever runs.
//!
//! ```rust,ignore
//! use relconf::checks::{CheckContext, create_default_runner};
//! use relconf::core::config::ReleaseConfig;
//!
//! let loaded = ReleaseConfig::load(Path::new("."))?;
//! let ctx = CheckContext::new(loaded.config);
//! let results = create_default_runner().run_all(&ctx)?;
//! ```

pub mod checks;
pub mod commands;
pub mod core;
pub mod ui;
