//! Where relconf looks for configuration
//!
//! Built once in main.rs from the global flags, then passed by reference to
//! every command.

use crate::core::config::{ConfigFormat, LoadedConfig, ReleaseConfig};
use crate::core::error::RelconfResult;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ConfigContext {
  /// Directory searched for a configuration file (absolute or relative)
  pub root: PathBuf,

  /// Explicit file given with `--config`; skips discovery
  pub explicit: Option<PathBuf>,
}

impl ConfigContext {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self {
      root: root.into(),
      explicit: None,
    }
  }

  pub fn with_config(mut self, path: Option<PathBuf>) -> Self {
    self.explicit = path;
    self
  }

  /// Load the configuration, from the explicit file if one was given
  pub fn load(&self) -> RelconfResult<LoadedConfig> {
    match &self.explicit {
      Some(path) => ReleaseConfig::load_file(&self.resolve(path)),
      None => ReleaseConfig::load(&self.root),
    }
  }

  /// File a new configuration in `format` is written to
  pub fn target_path(&self, format: ConfigFormat) -> PathBuf {
    match &self.explicit {
      Some(path) => self.resolve(path),
      None => self.root.join(format.default_file_name()),
    }
  }

  fn resolve(&self, path: &Path) -> PathBuf {
    if path.is_absolute() {
      path.to_path_buf()
    } else {
      self.root.join(path)
    }
  }
}
