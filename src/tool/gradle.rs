//! Gradle driver: `gradle dependencies --configuration <conf>`.
//!
//! Gradle reports no artifact paths, so every dependency weighs 1 and the
//! totals count entries rather than bytes.

use std::path::{Path, PathBuf};
use std::process::Command;

use regex::Regex;
use tracing::{debug, info, instrument, warn};

use crate::errors::{ToolError, ToolResult};
use crate::forest::{Forest, Leaf};
use crate::parse::{parse_report, TreeDialect};
use crate::tool::{run_captured, Project};

pub struct Gradle {
    build_file: PathBuf,
    command: Option<String>,
    configuration: String,
    child_module: String,
    coordinate: Regex,
    name_regex: Regex,
    version_regex: Regex,
}

impl Gradle {
    pub fn new(
        build_file: PathBuf,
        command: Option<String>,
        configuration: String,
        child_module: String,
    ) -> Self {
        Self {
            build_file,
            command,
            configuration,
            child_module,
            coordinate: Regex::new(r"([^:\s]+):([^:\s]+):([^:\s]+)$").unwrap(),
            name_regex: Regex::new(r"name: (.+)").unwrap(),
            version_regex: Regex::new(r"version: (.+)").unwrap(),
        }
    }

    /// Tree text shape of the `dependencies` task: `+---` marks an entry,
    /// `\---` the last entry at a level, depth is the number of
    /// five-character continuation units before the marker.
    fn dialect(&self) -> TreeDialect {
        TreeDialect {
            start: Regex::new(&format!("{} - .+", regex::escape(&self.configuration))).unwrap(),
            end: Regex::new(r"\(c\) - dependency constraint").unwrap(),
            structural: Regex::new(r"^(\|\s{4}|\s{5})*(\+---|\\---) (.+)$").unwrap(),
            unit_width: 5,
        }
    }

    /// Runs the `dependencies` task and parses the buffered output.
    #[instrument(level = "debug", skip(self))]
    pub fn analyze(&self) -> ToolResult<Project> {
        let command = self.executable();
        info!("Running Gradle command ({})", command);

        let mut cmd = Command::new(&command);
        cmd.arg("-p")
            .arg(&self.build_file)
            .arg("-q")
            .arg(format!("{}:dependencies", self.child_module))
            .arg("--configuration")
            .arg(&self.configuration);

        let out = run_captured(&mut cmd)?;
        if !out.status.success() {
            // The report may have been printed before the failing task.
            warn!("{} exited with {}", command, out.status);
            debug!("{}", out.stderr);
        }

        let forest = self.parse_dependencies(&out.stdout)?;
        let (name, version) = self.project_details(&command)?;
        Ok(Project {
            name,
            version,
            forest,
        })
    }

    /// Parses a complete `dependencies` output blob into a forest.
    pub fn parse_dependencies(&self, output: &str) -> ToolResult<Forest> {
        let dialect = self.dialect();
        Ok(parse_report(output, &dialect, |payload| self.leaf(payload))?)
    }

    /// Gradle entries come in several forms; only plain
    /// `group:artifact:version` coordinates denote dependencies the build
    /// actually uses. Version-forced (`-> 1.2`), previously-listed (`(*)`)
    /// and constraint (`(c)`) entries are dropped.
    fn leaf(&self, payload: &str) -> Option<Leaf> {
        let caps = self.coordinate.captures(payload)?;
        Some(Leaf {
            label: format!("{}:{}:{}", &caps[1], &caps[2], &caps[3]),
            weight: 1,
        })
    }

    /// Prefers a gradlew wrapper next to the build file over a PATH-wide
    /// `gradle`.
    fn executable(&self) -> String {
        if let Some(command) = &self.command {
            return command.clone();
        }

        let project_dir = if self.build_file.is_dir() {
            self.build_file.as_path()
        } else {
            self.build_file.parent().unwrap_or(Path::new("."))
        };

        let wrapper = if cfg!(windows) { "gradlew.bat" } else { "gradlew" };
        let candidate = project_dir.join(wrapper);
        if candidate.is_file() {
            debug!("Found {} to run build", candidate.display());
            return candidate.to_string_lossy().into_owned();
        }

        debug!("No wrapper found, assuming gradle is available on the PATH");
        "gradle".to_string()
    }

    fn project_details(&self, command: &str) -> ToolResult<(String, String)> {
        let mut cmd = Command::new(command);
        cmd.arg("-p").arg(&self.build_file).arg("properties");

        let out = run_captured(&mut cmd)?;
        let combined = format!("{}{}", out.stdout, out.stderr);
        debug!("{}", combined);

        let name = self.name_regex.captures(&combined).map(|c| c[1].to_string());
        let version = self
            .version_regex
            .captures(&combined)
            .map(|c| c[1].to_string());
        match (name, version) {
            (Some(name), Some(version)) => Ok((name, version)),
            _ => Err(ToolError::MissingProjectDetails),
        }
    }
}
