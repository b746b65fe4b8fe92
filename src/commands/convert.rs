//! Convert a release configuration between formats
//!
//! Branch and plugin order, plugin entry shapes and unrecognised keys all
//! survive the conversion.

use super::init::would_clobber;
use crate::core::config::{ConfigFormat, ReleaseConfig};
use crate::core::context::ConfigContext;
use crate::core::error::{ConfigError, RelconfError, RelconfResult};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Run the convert command
///
/// Without `output` the converted text goes to stdout. With `output`, an
/// existing configuration is only replaced when `force` is set. A
/// `package.json` without a `release` key is not a configuration yet, so the
/// key is added to it freely.
pub fn run_convert(ctx: &ConfigContext, to: ConfigFormat, output: Option<PathBuf>, force: bool) -> RelconfResult<()> {
  let loaded = ctx.load()?;
  debug!(from = %loaded.format, %to, "converting release configuration");

  let Some(output) = output else {
    print!("{}", loaded.config.to_string(to)?);
    return Ok(());
  };

  let target = if output.is_absolute() {
    output
  } else {
    ctx.root.join(output)
  };

  if target == loaded.path && to == loaded.format {
    return Err(RelconfError::with_help(
      format!("{} is already {}", target.display(), to),
      "Pick a different --to format or --output path",
    ));
  }

  check_output_name(&target, to)?;

  if !force && would_clobber(&target, to) {
    return Err(RelconfError::Config(ConfigError::AlreadyExists { path: target }));
  }

  loaded.config.save(&target, to)?;
  println!(
    "✅ Converted {} ({}) → {} ({})",
    loaded.path.display(),
    loaded.format,
    target.display(),
    to
  );

  if let Some(active) = ReleaseConfig::find_config_path(&ctx.root)
    && active != target
    && ctx.explicit.is_none()
  {
    println!("💡 Discovery still picks {} first; remove it to use the new file", active.display());
  }

  Ok(())
}

/// The output file must be readable back in the format written to it
fn check_output_name(target: &Path, to: ConfigFormat) -> RelconfResult<()> {
  let readable = match ConfigFormat::from_path(target) {
    Ok(Some(format)) => format == to,
    // An extension-less `.releaserc` is sniffed as JSON or YAML
    Ok(None) => matches!(to, ConfigFormat::Json | ConfigFormat::Yaml),
    Err(_) => false,
  };

  if readable {
    return Ok(());
  }
  Err(RelconfError::with_help(
    format!("{} cannot hold a {} configuration", target.display(), to),
    format!("Write to a file named like {} instead", to.default_file_name()),
  ))
}
