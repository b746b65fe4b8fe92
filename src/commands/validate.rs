//! Validate the release configuration
//!
//! Loads the configuration, runs every registered check and reports. Exits
//! with the validation exit code when a check fails.

use crate::checks::{CheckContext, CheckResult, create_default_runner};
use crate::core::config::LoadedConfig;
use crate::core::context::ConfigContext;
use crate::core::error::{RelconfError, RelconfResult, ValidationError};
use crate::ui::report::{Summary, write_results};
use serde::Serialize;
use std::io;
use tracing::info;

/// A registered check, as listed by `relconf validate --list`
#[derive(Debug, Serialize)]
pub struct CheckInfo {
  pub name: String,
  pub description: String,
}

/// Every registered check in run order
pub fn check_catalog() -> Vec<CheckInfo> {
  create_default_runner()
    .checks()
    .iter()
    .map(|check| CheckInfo {
      name: check.name().to_string(),
      description: check.description().to_string(),
    })
    .collect()
}

/// List the registered checks without loading a configuration
pub fn run_list_checks(json: bool) -> RelconfResult<()> {
  let catalog = check_catalog();

  if json {
    let json_output = serde_json::to_string_pretty(&catalog)
      .map_err(|e| RelconfError::message(format!("Failed to serialize JSON: {}", e)))?;
    println!("{}", json_output);
    return Ok(());
  }

  println!("🔍 {} checks, in run order:\n", catalog.len());
  let width = catalog.iter().map(|c| c.name.len()).max().unwrap_or(0);
  for check in &catalog {
    println!("  {:<width$}  {}", check.name, check.description, width = width);
  }
  Ok(())
}

/// Run every check against a loaded configuration
pub fn check_config(loaded: &LoadedConfig) -> RelconfResult<Vec<CheckResult>> {
  let ctx = CheckContext::new(loaded.config.clone()).with_source(&loaded.path);
  let results = create_default_runner().run_all(&ctx)?;
  Ok(results)
}

/// Run the validate command
pub fn run_validate(ctx: &ConfigContext, json: bool, strict: bool) -> RelconfResult<()> {
  let loaded = ctx.load()?;
  let results = check_config(&loaded)?;

  let summary = if json {
    let json_output = serde_json::to_string_pretty(&results)
      .map_err(|e| RelconfError::message(format!("Failed to serialize JSON: {}", e)))?;
    println!("{}", json_output);
    Summary::from_results(&results)
  } else {
    println!("🔍 Validating {} ({})\n", loaded.path.display(), loaded.format);
    write_results(&mut io::stdout().lock(), &results)?
  };

  info!(
    passed = summary.passed,
    warnings = summary.warnings,
    errors = summary.errors,
    strict,
    "validation finished"
  );

  if summary.failed(strict) {
    return Err(RelconfError::Validation(ValidationError::ChecksFailed {
      errors: summary.errors,
      warnings: summary.warnings,
    }));
  }

  if !json {
    if summary.warnings > 0 {
      println!("\n⚠️  Some warnings found. Consider addressing them.");
    } else {
      println!("\n✨ All checks passed! The configuration is ready for release.");
    }
  }

  Ok(())
}
