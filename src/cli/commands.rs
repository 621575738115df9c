use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::instrument;

use crate::aggregate::aggregate;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::errors::ToolError;
use crate::render::render;
use crate::tool::{Gradle, Maven, Project};
use crate::util::bytes::parse_bytes;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Maven {
            pom_file,
            cmd,
            repo,
        }) => _maven(cli, pom_file, cmd.as_deref(), repo.as_deref()),
        Some(Commands::Gradle {
            build_file,
            cmd,
            configuration,
            child,
        }) => _gradle(cli, build_file, cmd.as_deref(), configuration.as_deref(), child),
        Some(Commands::Config { command }) => _config(command),
        Some(Commands::Completion { shell }) => {
            generate(*shell, &mut Cli::command(), "depsift", &mut io::stdout());
            Ok(())
        }
        None => Ok(()),
    }
}

#[instrument(skip(cli))]
fn _maven(cli: &Cli, pom_file: &Path, cmd: Option<&str>, repo: Option<&str>) -> CliResult<()> {
    let settings = Settings::load()?;
    let pom_file = resolve_path(pom_file)?;
    let repo = expand_path(repo.unwrap_or(&settings.maven.repo));
    let command = cmd.unwrap_or(&settings.maven.command).to_string();

    let maven = Maven::new(pom_file, command, repo);
    let mut project = maven.analyze()?;
    print_project(cli, &settings, &mut project)
}

#[instrument(skip(cli))]
fn _gradle(
    cli: &Cli,
    build_file: &Path,
    cmd: Option<&str>,
    configuration: Option<&str>,
    child: &str,
) -> CliResult<()> {
    let settings = Settings::load()?;
    let build_file = resolve_path(build_file)?;
    let command = cmd.map(str::to_string).or_else(|| settings.gradle.command.clone());
    let configuration = configuration
        .unwrap_or(&settings.gradle.configuration)
        .to_string();

    let gradle = Gradle::new(build_file, command, configuration, child.to_string());
    let mut project = gradle.analyze()?;
    print_project(cli, &settings, &mut project)
}

/// Aggregates the forest and prints the decorated tree plus summary.
fn print_project(cli: &Cli, settings: &Settings, project: &mut Project) -> CliResult<()> {
    let threshold = parse_bytes(
        cli.large_threshold
            .as_deref()
            .unwrap_or(&settings.large_threshold),
    )?;
    let large_only = cli.large_deps_only || settings.large_deps_only;

    output::header(&format!("Project: {} ({})", project.name, project.version));

    aggregate(&mut project.forest);
    let rendered = render(&project.forest, threshold, large_only);
    for line in &rendered.lines {
        output::info(line);
    }
    output::info(&rendered.summary());
    Ok(())
}

fn _config(command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load()?;
            output::info(&toml::to_string_pretty(&settings)?);
        }
        ConfigCommands::Init => {
            let Some(path) = Settings::global_path() else {
                return Err(CliError::InvalidArgs(
                    "cannot determine config directory".to_string(),
                ));
            };
            if path.exists() {
                return Err(CliError::InvalidArgs(format!(
                    "config already exists: {}",
                    path.display()
                )));
            }
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir)?;
            }
            fs::write(&path, Settings::template())?;
            output::info(&format!("Created {}", path.display()));
        }
        ConfigCommands::Path => match Settings::global_path() {
            Some(path) => output::info(&path.display()),
            None => output::warning("cannot determine config directory"),
        },
    }
    Ok(())
}

/// Expands `~` and canonicalizes; the target must exist.
fn resolve_path(path: &Path) -> CliResult<PathBuf> {
    expand_path(&path.to_string_lossy())
        .canonicalize()
        .map_err(|e| {
            CliError::Tool(ToolError::PathResolution {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
        })
}

fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}
