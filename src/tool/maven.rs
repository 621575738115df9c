//! Maven driver: `mvn dependency:tree` plus local-repository size lookup.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use regex::Regex;
use tracing::{debug, info, instrument, trace};

use crate::errors::{ToolError, ToolResult};
use crate::forest::{Forest, Leaf};
use crate::parse::{parse, TreeDialect};
use crate::tool::{run_captured, Project, ToolOutput};

pub struct Maven {
    pom_file: PathBuf,
    command: String,
    repo: PathBuf,
    details: Regex,
    non_readable_pom: Regex,
    dialect: TreeDialect,
}

impl Maven {
    pub fn new(pom_file: PathBuf, command: String, repo: PathBuf) -> Self {
        Self {
            pom_file,
            command,
            repo,
            details: Regex::new(r"\[INFO\] Building ([^\s]+) ([^\s]+)").unwrap(),
            non_readable_pom: Regex::new(r".* Non-readable POM.*").unwrap(),
            dialect: Self::dialect(),
        }
    }

    /// Tree text shape of `dependency:tree`: `+-` marks an entry, `\-` the
    /// last entry at a level, depth is the number of three-character
    /// continuation units before the marker.
    fn dialect() -> TreeDialect {
        TreeDialect {
            start: Regex::new(r"\[INFO\] --- maven-dependency-plugin:.+:tree").unwrap(),
            end: Regex::new(r"\[INFO\] BUILD SUCCESS").unwrap(),
            structural: Regex::new(r"^(\|\s\s|\s{3})*(\+-|\\-) (.+)$").unwrap(),
            unit_width: 3,
        }
    }

    /// Runs `dependency:tree` and parses the buffered output.
    #[instrument(level = "debug", skip(self))]
    pub fn analyze(&self) -> ToolResult<Project> {
        info!("Running Maven command ({})", self.command);
        let mut cmd = Command::new(&self.command);
        cmd.arg("dependency:tree").arg("-f").arg(&self.pom_file);

        let out = run_captured(&mut cmd)?;
        if !out.status.success() {
            return Err(self.describe_error(out));
        }

        info!("Parsing output");
        self.parse_report(&out.stdout)
    }

    fn describe_error(&self, out: ToolOutput) -> ToolError {
        let combined = format!("{}{}", out.stdout, out.stderr);
        trace!("error message: {}", combined);

        if self.non_readable_pom.is_match(&combined) {
            ToolError::NonReadablePom(self.pom_file.clone())
        } else {
            ToolError::Failed {
                command: self.command.clone(),
                status: out.status,
                output: combined,
            }
        }
    }

    /// Parses a complete `dependency:tree` output blob into a project.
    pub fn parse_report(&self, output: &str) -> ToolResult<Project> {
        let (name, version) = self.project_details(output)?;
        let forest = self.parse_tree(output)?;
        Ok(Project {
            name,
            version,
            forest,
        })
    }

    fn project_details(&self, output: &str) -> ToolResult<(String, String)> {
        let caps = self
            .details
            .captures(output)
            .ok_or(ToolError::MissingProjectDetails)?;
        Ok((caps[1].to_string(), caps[2].to_string()))
    }

    fn parse_tree(&self, output: &str) -> ToolResult<Forest> {
        let lines: Vec<&str> = output.lines().collect();
        let region = self.dialect.extract_region(&lines);
        // The `[INFO] ` log prefix is not part of the tree text.
        let stripped: Vec<&str> = region
            .iter()
            .filter_map(|line| line.strip_prefix("[INFO] "))
            .collect();

        let mut lookup_error = None;
        let forest = parse(stripped.iter().copied(), &self.dialect, |payload| {
            match self.leaf(payload) {
                Ok(leaf) => leaf,
                Err(e) => {
                    lookup_error.get_or_insert(e);
                    None
                }
            }
        })?;

        match lookup_error {
            Some(e) => Err(e),
            None => Ok(forest),
        }
    }

    /// Maps a `group:artifact:extension:version[:scope]` coordinate to a
    /// leaf weighted by the artifact's size in the local repository.
    /// Payloads with fewer than four fields are dropped.
    fn leaf(&self, payload: &str) -> ToolResult<Option<Leaf>> {
        let parts: Vec<&str> = payload.split(':').collect();
        let [group, artifact, extension, version, ..] = parts.as_slice() else {
            debug!(payload, "ignoring entry without full coordinates");
            return Ok(None);
        };

        let path = self.artifact_path(group, artifact, extension, version);
        let size = fs::metadata(&path)
            .map_err(|_| ToolError::ArtifactNotFound(path.clone()))?
            .len();

        Ok(Some(Leaf {
            label: format!("{group}:{artifact}:{version}"),
            weight: size,
        }))
    }

    fn artifact_path(&self, group: &str, artifact: &str, extension: &str, version: &str) -> PathBuf {
        self.repo
            .join(group.replace('.', "/"))
            .join(artifact)
            .join(version)
            .join(format!("{artifact}-{version}.{extension}"))
    }
}
