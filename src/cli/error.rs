//! CLI-level errors (wraps the parser and driver errors)

use thiserror::Error;

use crate::errors::{ParseError, ToolError};
use crate::util::bytes::ParseBytesError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Tool(#[from] ToolError),

    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("{0}")]
    Threshold(#[from] ParseBytesError),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("failed to render configuration: {0}")]
    ConfigRender(#[from] toml::ser::Error),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) | CliError::Threshold(_) => crate::exitcode::USAGE,
            CliError::Config(_) | CliError::ConfigRender(_) => crate::exitcode::CONFIG,
            CliError::Io(_) => crate::exitcode::NOINPUT,
            CliError::Parse(_) => crate::exitcode::DATAERR,
            CliError::Tool(e) => match e {
                ToolError::Spawn { .. } | ToolError::Failed { .. } => crate::exitcode::UNAVAILABLE,
                ToolError::NonReadablePom(_)
                | ToolError::ArtifactNotFound(_)
                | ToolError::PathResolution { .. } => crate::exitcode::NOINPUT,
                ToolError::MissingProjectDetails | ToolError::Parse(_) => crate::exitcode::DATAERR,
            },
        }
    }
}
