//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Dependency weight analyzer for JVM projects
#[derive(Parser, Debug)]
#[command(name = "depsift")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug output (repeat for more detail)
    #[arg(short = 'd', long = "debug", action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Highlight threshold, e.g. 3MB
    #[arg(long, global = true)]
    pub large_threshold: Option<String>,

    /// Only show dependency trees that exceed the threshold
    #[arg(long, global = true)]
    pub large_deps_only: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a Maven project's dependencies
    Maven {
        /// Path to pom.xml
        #[arg(value_hint = ValueHint::FilePath)]
        pom_file: PathBuf,

        /// Path to the Maven command
        #[arg(long)]
        cmd: Option<String>,

        /// Location of the local Maven repository
        #[arg(long)]
        repo: Option<String>,
    },

    /// Analyze a Gradle project's dependencies
    Gradle {
        /// Path to build.gradle or the project directory
        #[arg(value_hint = ValueHint::AnyPath)]
        build_file: PathBuf,

        /// Path to the Gradle command (default: gradlew if present, else gradle)
        #[arg(long)]
        cmd: Option<String>,

        /// Dependency configuration to analyze
        #[arg(long)]
        configuration: Option<String>,

        /// Child module in a multi-module project
        #[arg(long, default_value = "")]
        child: String,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init,

    /// Show config path
    Path,
}
