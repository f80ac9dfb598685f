//! CLI-specific error types and exit code mapping

use elastic_integration_connection::ValidationError;
use elastic_integration_core::error::IntegrationError;

/// CLI-specific error type.
///
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from elastic-integration-core.
    #[error("{0}")]
    Core(#[from] IntegrationError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                 |
    /// |------|-------------------------|
    /// | 0    | Success                 |
    /// | 1    | General error           |
    /// | 2    | Configuration error     |
    /// | 10   | IO error                |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Core(IntegrationError::Config(_)) => 2,
            Self::Io(_) | Self::Core(IntegrationError::Io(_)) => 10,
            Self::JsonSerialize(_) | Self::Core(_) => 1,
        }
    }
}

impl From<ValidationError> for CliError {
    fn from(e: ValidationError) -> Self {
        Self::Core(e.into())
    }
}
