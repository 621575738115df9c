use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors raised while turning report text into a forest.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("malformed tree: line {line:?} claims depth {depth}, deepest available ancestor level is {max_depth}")]
    MalformedTree {
        line: String,
        depth: usize,
        max_depth: usize,
    },
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Errors raised by the build-tool drivers.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("failed to run {command}: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("{command} exited with {status}")]
    Failed {
        command: String,
        status: ExitStatus,
        output: String,
    },

    #[error("POM is not readable: {0}")]
    NonReadablePom(PathBuf),

    #[error("artifact not found in local repository: {0}")]
    ArtifactNotFound(PathBuf),

    #[error("could not determine project name and version from build output")]
    MissingProjectDetails,

    #[error("invalid path: {path}: {reason}")]
    PathResolution { path: PathBuf, reason: String },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

pub type ToolResult<T> = Result<T, ToolError>;
