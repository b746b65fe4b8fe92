//! Structural validation of the release configuration
//!
//! This module provides a unified interface for running validation checks.
//! All checks implement the `Check` trait and are registered in
//! `create_default_runner()`, which fixes the order they report in.
//!
//! # Built-in Checks
//!
//! - **branch-names**: every branch named, no name declared twice
//! - **release-branches**: one to three release branches
//! - **prerelease-identifiers**: valid semver prerelease identifiers, no clashes
//! - **maintenance-ranges**: maintenance ranges use the `N.x` shorthand and are not shared
//! - **tag-format**: `${version}` exactly once, renders a legal git tag
//! - **plugin-ids**: identifiers present, duplicates flagged
//! - **plugin-order**: a commit analyzer exists, changelog precedes the git step
//! - **commit-types**: every commit-type mapping has a `type` and a `section`
//! - **release-assets**: git asset globs compile and include the changelog
//! - **registry**: the Maven publisher names its registry endpoint
//!
//! # Example
//!
//! ```rust,ignore
//! use relconf::checks::{CheckContext, create_default_runner};
//!
//! let ctx = CheckContext::new(config);
//! let results = create_default_runner().run_all(&ctx)?;
//!
//! for result in results.iter().filter(|r| !r.passed) {
//!   println!("❌ {}: {}", result.check_name, result.message);
//! }
//! ```

mod assets;
mod branches;
mod commit_types;
mod plugins;
mod registry;
mod runner;
mod tag_format;
mod trait_def;

pub use runner::{CheckRunner, create_default_runner};
pub use trait_def::{Check, CheckContext, CheckResult, Severity};
