//! Build-tool drivers: run the external tool, buffer its output, and hand
//! the tree region to the parser with a tool-specific leaf extractor.

pub mod gradle;
pub mod maven;

pub use gradle::Gradle;
pub use maven::Maven;

use std::process::{Command, ExitStatus};
use tracing::{debug, instrument};

use crate::errors::{ToolError, ToolResult};
use crate::forest::Forest;

/// Analyzed project: coordinates from the build output plus the parsed
/// dependency forest.
#[derive(Debug)]
pub struct Project {
    pub name: String,
    pub version: String,
    pub forest: Forest,
}

pub(crate) struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
    pub status: ExitStatus,
}

/// Runs the command to completion and returns the fully buffered output.
/// The parser only ever sees finished text, never a live pipe.
#[instrument(level = "debug", skip(cmd))]
pub(crate) fn run_captured(cmd: &mut Command) -> ToolResult<ToolOutput> {
    let command = cmd.get_program().to_string_lossy().into_owned();
    debug!(command, "running build tool");

    let output = cmd.output().map_err(|source| ToolError::Spawn {
        command: command.clone(),
        source,
    })?;

    Ok(ToolOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        status: output.status,
    })
}
