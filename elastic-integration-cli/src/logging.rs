//! Logging initialization for the CLI.
//!
//! Log records go to stderr so that command output on stdout stays parseable.
//! The filter is taken from `RUST_LOG` first, then `--log-level`, then
//! `[general].log_level`.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use elastic_integration_core::config::GeneralConfig;

use crate::error::CliError;

/// Resolve the effective filter directive without consulting the environment.
pub fn effective_level<'a>(config: &'a GeneralConfig, override_level: Option<&'a str>) -> &'a str {
    override_level.unwrap_or(&config.log_level)
}

/// Initialize the global tracing subscriber.
///
/// Must be called at most once per process.
///
/// # Formats
///
/// * `"json"` - JSON lines
/// * `"pretty"` - human-readable multi-line output
pub fn init_tracing(config: &GeneralConfig, override_level: Option<&str>) -> Result<(), CliError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(effective_level(config, override_level)));

    match config.log_format.as_str() {
        "json" => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .map_err(|e| {
                CliError::Config(format!("failed to initialize JSON tracing subscriber: {e}"))
            }),
        "pretty" => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .map_err(|e| {
                CliError::Config(format!(
                    "failed to initialize pretty tracing subscriber: {e}"
                ))
            }),
        other => Err(CliError::Config(format!(
            "unknown log format '{other}', expected 'json' or 'pretty'"
        ))),
    }
}
