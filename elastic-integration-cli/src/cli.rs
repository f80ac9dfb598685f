//! CLI argument parsing using clap derive API
//!
//! Purely declarative: no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// elastic-integration -- validate and inspect `elastic_integration` filter settings.
///
/// Use `elastic-integration <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "elastic-integration", version, about, long_about = None)]
pub struct Cli {
    /// Path to the filter configuration file.
    #[arg(short, long, default_value = "elastic-integration.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate or display the connection configuration.
    Config(ConfigArgs),

    /// List every recognized filter option.
    Options(OptionsArgs),
}

// ---- config ----

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Run the connection validator and report the first error or any warnings.
    Validate,
    /// Show the validated, normalized configuration with secrets redacted.
    Show {
        /// Show only one part of the configuration.
        #[arg(long, value_enum, default_value = "all")]
        section: Section,
    },
}

/// Parts of the validated configuration that `config show` can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Section {
    /// Normalized hosts or cloud identifier.
    Target,
    /// Resolved TLS settings.
    Tls,
    /// Resolved authentication.
    Auth,
    /// Everything.
    All,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Target => "target",
            Self::Tls => "tls",
            Self::Auth => "auth",
            Self::All => "all",
        }
    }
}

// ---- options ----

#[derive(Args, Debug)]
pub struct OptionsArgs {
    /// Only list options that require TLS.
    #[arg(long)]
    pub tls_only: bool,
}
