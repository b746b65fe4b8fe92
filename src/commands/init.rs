//! Scaffold a release configuration

use crate::core::config::{ConfigFormat, ReleaseConfig};
use crate::core::context::ConfigContext;
use crate::core::error::{ConfigError, RelconfError, RelconfResult, ResultExt};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Placeholder registry endpoint written when `--server-id` is not given
pub const PLACEHOLDER_SERVER_ID: &str = "https://maven.pkg.github.com/OWNER/REPO";

/// Run the init command to write the project template
pub fn run_init(ctx: &ConfigContext, format: ConfigFormat, server_id: Option<String>, force: bool) -> RelconfResult<()> {
  let target = ctx.target_path(format);
  debug!(target = %target.display(), %format, force, "scaffolding release configuration");

  if !force && would_clobber(&target, format) {
    return Err(RelconfError::Config(ConfigError::AlreadyExists { path: target }));
  }

  let server_id = server_id.unwrap_or_else(|| PLACEHOLDER_SERVER_ID.to_string());
  let config = ReleaseConfig::project_template(&server_id);
  config
    .save(&target, format)
    .with_context(|| format!("Failed to scaffold {}", target.display()))?;

  println!("✅ Wrote release configuration to {}", target.display());

  if let Some(active) = ReleaseConfig::find_config_path(&ctx.root)
    && ctx.explicit.is_none()
    && active != target
  {
    println!(
      "⚠️  {} is found first during discovery and will be used instead",
      active.display()
    );
  }

  println!("\n🚀 Next steps:");
  if server_id == PLACEHOLDER_SERVER_ID {
    println!("   1. Replace OWNER/REPO in the Maven `serverId` with your registry path");
  } else {
    println!("   1. Review the branches and plugins in {}", target.display());
  }
  println!("   2. Run: relconf validate");

  Ok(())
}

/// Whether writing `format` to `target` would overwrite an existing configuration
pub(crate) fn would_clobber(target: &Path, format: ConfigFormat) -> bool {
  if !target.exists() {
    return false;
  }
  match format {
    // Writing into a manifest only replaces its `release` key
    ConfigFormat::PackageJson => fs::read_to_string(target)
      .ok()
      .and_then(|content| serde_json::from_str::<Value>(&content).ok())
      .is_some_and(|manifest| manifest.get("release").is_some()),
    _ => true,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  #[test]
  fn test_init_writes_template() {
    let dir = TempDir::new().unwrap();
    let ctx = ConfigContext::new(dir.path());

    run_init(&ctx, ConfigFormat::Yaml, Some("https://maven.example.com/r".to_string()), false).unwrap();

    let loaded = ctx.load().unwrap();
    assert_eq!(loaded.format, ConfigFormat::Yaml);
    assert_eq!(loaded.config, ReleaseConfig::project_template("https://maven.example.com/r"));
  }

  #[test]
  fn test_init_refuses_to_clobber() {
    let dir = TempDir::new().unwrap();
    let ctx = ConfigContext::new(dir.path());
    fs::write(dir.path().join(".releaserc.json"), "{}").unwrap();

    let err = run_init(&ctx, ConfigFormat::Json, None, false).unwrap_err();
    assert!(matches!(err, RelconfError::Config(ConfigError::AlreadyExists { .. })));

    run_init(&ctx, ConfigFormat::Json, None, true).unwrap();
    let loaded = ctx.load().unwrap();
    assert!(loaded.config.plugins.is_some());
  }

  #[test]
  fn test_init_into_package_json_without_release_key() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("package.json"), r#"{"name": "demo"}"#).unwrap();
    let ctx = ConfigContext::new(dir.path());

    run_init(&ctx, ConfigFormat::PackageJson, None, false).unwrap();
    assert_eq!(ctx.load().unwrap().format, ConfigFormat::PackageJson);

    assert!(run_init(&ctx, ConfigFormat::PackageJson, None, false).is_err());
  }
}
