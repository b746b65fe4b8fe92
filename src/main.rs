use clap::{Parser, Subcommand};
use relconf::commands;
use relconf::core::config::ConfigFormat;
use relconf::core::context::ConfigContext;
use relconf::core::error::{RelconfError, print_error};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (`RELCONF_LOG=debug`)
const LOG_ENV: &str = "RELCONF_LOG";

/// Scaffold, validate and inspect semantic-release configuration
#[derive(Parser)]
#[command(name = "relconf")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  /// Use this configuration file instead of searching for one
  #[arg(long, global = true, value_name = "PATH")]
  config: Option<PathBuf>,

  /// Directory to search for configuration (default: current directory)
  #[arg(long, global = true, value_name = "PATH")]
  dir: Option<PathBuf>,

  /// Log debug output to stderr
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  // ============================================================================
  // Setup
  // ============================================================================
  /// Write the release configuration template for this project
  Init {
    /// File format to write
    #[arg(long, value_enum, default_value_t = ConfigFormat::Json)]
    format: ConfigFormat,
    /// Maven registry endpoint for the publish step
    #[arg(long, value_name = "URL")]
    server_id: Option<String>,
    /// Overwrite an existing configuration
    #[arg(long)]
    force: bool,
  },

  // ============================================================================
  // Inspection
  // ============================================================================
  /// Run structural checks against the configuration
  Validate {
    /// Output results in JSON format
    #[arg(long)]
    json: bool,
    /// Treat warnings as failures
    #[arg(long)]
    strict: bool,
    /// List the checks with their descriptions instead of running them
    #[arg(long, conflicts_with = "strict")]
    list: bool,
  },

  /// Show resolved branches, plugin order and changelog sections
  Show {
    /// Output in JSON format
    #[arg(long)]
    json: bool,
  },

  // ============================================================================
  // Maintenance
  // ============================================================================
  /// Convert the configuration to another format
  Convert {
    /// Target format
    #[arg(long, value_enum)]
    to: ConfigFormat,
    /// Write to this file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
    /// Overwrite the output file if it exists
    #[arg(long)]
    force: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

/// Logs go to stderr so `--json` output on stdout stays parseable
fn init_logging(verbose: bool) {
  let filter = if verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
  };

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();
}

fn main() {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  let root = match cli.dir {
    Some(dir) => dir,
    None => match std::env::current_dir() {
      Ok(dir) => dir,
      Err(e) => handle_error(RelconfError::message(format!("Failed to get current directory: {}", e))),
    },
  };
  let ctx = ConfigContext::new(root).with_config(cli.config);

  let result = match cli.command {
    Commands::Init {
      format,
      server_id,
      force,
    } => commands::run_init(&ctx, format, server_id, force),
    Commands::Validate { json, strict, list } => {
      if list {
        commands::run_list_checks(json)
      } else {
        commands::run_validate(&ctx, json, strict)
      }
    }
    Commands::Show { json } => commands::run_show(&ctx, json),
    Commands::Convert { to, output, force } => commands::run_convert(&ctx, to, output, force),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: RelconfError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
