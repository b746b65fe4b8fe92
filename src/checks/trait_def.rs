//! Check trait abstraction for configuration validation
//!
//! Every structural rule relconf knows about is a `Check`. Checks are
//! registered with a runner and executed in registration order, so the report
//! reads from branches to plugins to plugin options.

use crate::core::config::ReleaseConfig;
use crate::core::error::RelconfResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Severity level for check results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
  /// Informational message (not an issue)
  Info,
  /// Warning (non-blocking, but should be addressed)
  Warning,
  /// Error (blocking, must be fixed)
  Error,
}

impl fmt::Display for Severity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Severity::Info => write!(f, "INFO"),
      Severity::Warning => write!(f, "WARN"),
      Severity::Error => write!(f, "ERROR"),
    }
  }
}

/// Result of running a check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
  /// Name of the check that ran
  pub check_name: String,
  /// Whether the check passed
  pub passed: bool,
  /// Severity level (if failed)
  pub severity: Severity,
  /// Human-readable message
  pub message: String,
  /// Optional suggested fix
  pub suggestion: Option<String>,
  /// Additional metadata (for JSON output)
  #[serde(skip_serializing_if = "Option::is_none")]
  pub details: Option<serde_json::Value>,
}

impl CheckResult {
  /// Create a passing check result
  pub fn pass(check_name: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      check_name: check_name.into(),
      passed: true,
      severity: Severity::Info,
      message: message.into(),
      suggestion: None,
      details: None,
    }
  }

  /// Create a failing check result with error severity
  pub fn error(
    check_name: impl Into<String>,
    message: impl Into<String>,
    suggestion: Option<impl Into<String>>,
  ) -> Self {
    Self {
      check_name: check_name.into(),
      passed: false,
      severity: Severity::Error,
      message: message.into(),
      suggestion: suggestion.map(|s| s.into()),
      details: None,
    }
  }

  /// Create a failing check result with warning severity
  pub fn warning(
    check_name: impl Into<String>,
    message: impl Into<String>,
    suggestion: Option<impl Into<String>>,
  ) -> Self {
    Self {
      check_name: check_name.into(),
      passed: false,
      severity: Severity::Warning,
      message: message.into(),
      suggestion: suggestion.map(|s| s.into()),
      details: None,
    }
  }

  /// Add details to the check result
  pub fn with_details(mut self, details: serde_json::Value) -> Self {
    self.details = Some(details);
    self
  }

  /// Record the file a failing result was found in
  pub fn with_source(mut self, source: &Path) -> Self {
    let source = serde_json::Value::String(source.display().to_string());
    if let Some(serde_json::Value::Object(details)) = &mut self.details {
      details.insert("source".to_string(), source);
    } else if self.details.is_none() {
      self.details = Some(serde_json::json!({ "source": source }));
    }
    self
  }

  pub fn is_error(&self) -> bool {
    !self.passed && self.severity == Severity::Error
  }

  pub fn is_warning(&self) -> bool {
    !self.passed && self.severity == Severity::Warning
  }
}

/// Context passed to checks
#[derive(Debug, Clone)]
pub struct CheckContext {
  /// The configuration under validation
  pub config: ReleaseConfig,
  /// File the configuration was loaded from, if any
  pub source: Option<PathBuf>,
}

impl CheckContext {
  pub fn new(config: ReleaseConfig) -> Self {
    Self { config, source: None }
  }

  pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
    self.source = Some(source.into());
    self
  }
}

/// Validation check trait
///
/// Each check inspects one structural rule of the configuration object.
/// A check that cannot make sense of its input reports a failing result; an
/// `Err` is reserved for the check itself breaking.
pub trait Check: Send + Sync {
  /// Unique name for this check (kebab-case)
  fn name(&self) -> &str;

  /// Human-readable description of what this check validates
  fn description(&self) -> &str;

  /// Run the check and return a result
  fn run(&self, ctx: &CheckContext) -> RelconfResult<CheckResult>;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_source_merges_into_details() {
    let result = CheckResult::error("tag-format", "bad", Some("fix it"))
      .with_details(serde_json::json!({ "sample": "v 1.0.0" }))
      .with_source(Path::new(".releaserc.json"));
    let details = result.details.unwrap();
    assert_eq!(details["sample"], "v 1.0.0");
    assert_eq!(details["source"], ".releaserc.json");

    let bare = CheckResult::warning("registry", "plain http", None::<String>).with_source(Path::new("package.json"));
    assert_eq!(bare.details.unwrap()["source"], "package.json");
  }
}
