//! Human-readable rendering of check results

use crate::checks::{CheckResult, Severity};
use std::io::{self, Write};

/// Tally of a validation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
  pub passed: usize,
  pub warnings: usize,
  pub errors: usize,
}

impl Summary {
  pub fn from_results(results: &[CheckResult]) -> Self {
    results.iter().fold(Self::default(), |mut acc, result| {
      if result.passed {
        acc.passed += 1;
      } else {
        match result.severity {
          Severity::Error => acc.errors += 1,
          Severity::Warning => acc.warnings += 1,
          Severity::Info => acc.passed += 1,
        }
      }
      acc
    })
  }

  pub fn total(&self) -> usize {
    self.passed + self.warnings + self.errors
  }

  /// Whether the run should fail; `strict` promotes warnings
  pub fn failed(&self, strict: bool) -> bool {
    self.errors > 0 || (strict && self.warnings > 0)
  }
}

/// Print each result followed by a one-line summary
pub fn write_results(out: &mut impl Write, results: &[CheckResult]) -> io::Result<Summary> {
  for result in results {
    let icon = match (result.passed, result.severity) {
      (true, _) => "✅",
      (false, Severity::Warning) => "⚠️ ",
      (false, _) => "❌",
    };
    writeln!(out, "{} {}: {}", icon, result.check_name, result.message)?;

    if !result.passed
      && let Some(ref suggestion) = result.suggestion
    {
      writeln!(out, "   💡 Fix: {}", suggestion)?;
    }
  }

  let summary = Summary::from_results(results);
  writeln!(out)?;
  writeln!(out, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
  writeln!(
    out,
    "Summary: {}/{} checks passed, {} warning(s), {} error(s)",
    summary.passed,
    summary.total(),
    summary.warnings,
    summary.errors
  )?;
  Ok(summary)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn results() -> Vec<CheckResult> {
    vec![
      CheckResult::pass("branch-names", "2 branch(es) declared"),
      CheckResult::warning("plugin-ids", "dup", Some("merge them")),
      CheckResult::error("registry", "no serverId", None::<String>),
    ]
  }

  #[test]
  fn test_summary() {
    let summary = Summary::from_results(&results());
    assert_eq!(
      summary,
      Summary {
        passed: 1,
        warnings: 1,
        errors: 1
      }
    );
    assert!(summary.failed(false));

    let only_warning = Summary::from_results(&results()[..2]);
    assert!(!only_warning.failed(false));
    assert!(only_warning.failed(true));
  }

  #[test]
  fn test_write_results() {
    let mut out = Vec::new();
    write_results(&mut out, &results()).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("✅ branch-names"));
    assert!(text.contains("💡 Fix: merge them"));
    assert!(text.contains("❌ registry: no serverId"));
    assert!(text.contains("Summary: 1/3 checks passed, 1 warning(s), 1 error(s)"));
  }
}
