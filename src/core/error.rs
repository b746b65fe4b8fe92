//! Error types for relconf with contextual messages and exit codes
//!
//! Every error maps to an exit code and, where one exists, a short help line
//! telling the user how to get unstuck.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for relconf
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, missing files)
  User = 1,
  /// System error (I/O)
  System = 2,
  /// Validation failure (one or more checks failed)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for relconf
#[derive(Debug)]
pub enum RelconfError {
  /// Configuration discovery and parsing errors
  Config(ConfigError),

  /// Structural validation errors
  Validation(ValidationError),

  /// I/O errors, with the operation that failed when known
  Io { error: io::Error, context: Option<String> },

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl RelconfError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    RelconfError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    RelconfError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  ///
  /// I/O errors keep their variant and exit code. Other typed errors are
  /// folded into a `Message` so the context line is not lost, but their help
  /// text is carried over.
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      RelconfError::Io { error, context } => RelconfError::Io {
        error,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
      },
      RelconfError::Message { message, context, help } => RelconfError::Message {
        message: ctx_str,
        context: Some(context.map(|c| format!("{}\n{}", message, c)).unwrap_or(message)),
        help,
      },
      validation @ RelconfError::Validation(_) => validation,
      RelconfError::Config(err) => RelconfError::Message {
        message: ctx_str,
        context: Some(err.to_string()),
        help: err.help_message(),
      },
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      RelconfError::Config(_) => ExitCode::User,
      RelconfError::Validation(_) => ExitCode::Validation,
      RelconfError::Io { .. } => ExitCode::System,
      RelconfError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      RelconfError::Config(e) => e.help_message(),
      RelconfError::Validation(e) => e.help_message(),
      RelconfError::Message { help, .. } => help.clone(),
      RelconfError::Io { .. } => None,
    }
  }
}

impl fmt::Display for RelconfError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RelconfError::Config(e) => write!(f, "{}", e),
      RelconfError::Validation(e) => write!(f, "{}", e),
      RelconfError::Io { error, context } => {
        if let Some(ctx) = context {
          writeln!(f, "{}", ctx)?;
        }
        write!(f, "I/O error: {}", error)
      }
      RelconfError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for RelconfError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      RelconfError::Io { error, .. } => Some(error),
      _ => None,
    }
  }
}

impl From<io::Error> for RelconfError {
  fn from(err: io::Error) -> Self {
    RelconfError::Io { error: err, context: None }
  }
}

impl From<String> for RelconfError {
  fn from(msg: String) -> Self {
    RelconfError::message(msg)
  }
}

impl From<&str> for RelconfError {
  fn from(msg: &str) -> Self {
    RelconfError::message(msg)
  }
}

impl From<ConfigError> for RelconfError {
  fn from(err: ConfigError) -> Self {
    RelconfError::Config(err)
  }
}

impl From<serde_json::Error> for RelconfError {
  fn from(err: serde_json::Error) -> Self {
    RelconfError::message(format!("JSON error: {}", err))
  }
}

impl From<serde_yaml::Error> for RelconfError {
  fn from(err: serde_yaml::Error) -> Self {
    RelconfError::message(format!("YAML error: {}", err))
  }
}

impl From<toml_edit::de::Error> for RelconfError {
  fn from(err: toml_edit::de::Error) -> Self {
    RelconfError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<toml_edit::ser::Error> for RelconfError {
  fn from(err: toml_edit::ser::Error) -> Self {
    RelconfError::message(format!("TOML serialization error: {}", err))
  }
}

impl From<anyhow::Error> for RelconfError {
  fn from(err: anyhow::Error) -> Self {
    RelconfError::message(err.to_string())
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// No release configuration in the search root
  NotFound { search_root: PathBuf },

  /// Found a configuration file relconf cannot read
  UnsupportedFormat { path: PathBuf },

  /// The configuration file could not be parsed
  Parse { path: PathBuf, reason: String },

  /// Refusing to clobber an existing file
  AlreadyExists { path: PathBuf },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => Some("Run `relconf init` to create a .releaserc.json.".to_string()),
      ConfigError::UnsupportedFormat { .. } => Some(
        "JavaScript config modules cannot be evaluated. Move the exported object into .releaserc.json, \
         or scaffold one with `relconf init`."
          .to_string(),
      ),
      ConfigError::Parse { .. } => None,
      ConfigError::AlreadyExists { .. } => Some("Pass --force to overwrite it.".to_string()),
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { search_root } => {
        write!(
          f,
          "No release configuration found in {}.\nLooked for .releaserc, .releaserc.{{json,yaml,yml,toml}}, release.config.{{js,cjs,mjs}} and a `release` key in package.json",
          search_root.display()
        )
      }
      ConfigError::UnsupportedFormat { path } => {
        write!(f, "Unsupported configuration file: {}", path.display())
      }
      ConfigError::Parse { path, reason } => {
        write!(f, "Failed to parse {}: {}", path.display(), reason)
      }
      ConfigError::AlreadyExists { path } => {
        write!(f, "Configuration already exists: {}", path.display())
      }
    }
  }
}

/// Validation errors
#[derive(Debug)]
pub enum ValidationError {
  /// One or more checks reported a failure
  ChecksFailed { errors: usize, warnings: usize },
}

impl ValidationError {
  fn help_message(&self) -> Option<String> {
    match self {
      ValidationError::ChecksFailed { .. } => Some("Run `relconf validate` for the full report.".to_string()),
    }
  }
}

impl fmt::Display for ValidationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ValidationError::ChecksFailed { errors, warnings } => {
        write!(
          f,
          "Configuration validation failed: {} error(s), {} warning(s)",
          errors, warnings
        )
      }
    }
  }
}

/// Result type alias for relconf
pub type RelconfResult<T> = Result<T, RelconfError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> RelconfResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> RelconfResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<RelconfError>,
{
  fn context(self, ctx: impl Into<String>) -> RelconfResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> RelconfResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &RelconfError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_exit_codes() {
    let not_found = RelconfError::Config(ConfigError::NotFound {
      search_root: PathBuf::from("/tmp"),
    });
    assert_eq!(not_found.exit_code(), ExitCode::User);

    let failed = RelconfError::Validation(ValidationError::ChecksFailed { errors: 1, warnings: 0 });
    assert_eq!(failed.exit_code().as_i32(), 3);

    let io = RelconfError::from(io::Error::other("disk"));
    assert_eq!(io.exit_code(), ExitCode::System);
  }

  #[test]
  fn test_context_keeps_help() {
    let err = RelconfError::Config(ConfigError::AlreadyExists {
      path: PathBuf::from(".releaserc.json"),
    })
    .context("Failed to scaffold configuration");

    let rendered = err.to_string();
    assert!(rendered.starts_with("Failed to scaffold configuration"));
    assert!(rendered.contains(".releaserc.json"));
    assert_eq!(err.help_message().as_deref(), Some("Pass --force to overwrite it."));
  }

  #[test]
  fn test_context_chains_messages() {
    let result: Result<(), RelconfError> = Err(RelconfError::message("inner"));
    let err = result.context("outer").unwrap_err();
    assert_eq!(err.to_string(), "outer\ninner");
  }

  #[test]
  fn test_context_keeps_io_exit_code() {
    let result = std::fs::read_to_string("/nonexistent/relconf/dir/.releaserc.json");
    let err = result.with_context(|| "Failed to read config".to_string()).unwrap_err();

    assert_eq!(err.exit_code(), ExitCode::System);
    assert!(matches!(err, RelconfError::Io { .. }));
    assert!(err.to_string().starts_with("Failed to read config\nI/O error:"));

    let err = err.context("Failed to load");
    assert_eq!(err.exit_code().as_i32(), 2);
    assert!(err.to_string().starts_with("Failed to load\nFailed to read config"));
  }
}
