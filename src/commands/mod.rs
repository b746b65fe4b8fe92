//! CLI commands for relconf
//!
//! ## Setup
//! - **init**: Write the project's release configuration template
//!
//! ## Inspection
//! - **validate**: Run every structural check and report
//! - **show**: Print resolved branches, plugin order and changelog sections
//!
//! ## Maintenance
//! - **convert**: Rewrite the configuration in another format
//!
//! All commands accept `&ConfigContext` so discovery happens in one place.

pub mod convert;
pub mod init;
pub mod show;
pub mod validate;

pub use convert::run_convert;
pub use init::run_init;
pub use show::run_show;
pub use validate::{run_list_checks, run_validate};
