//! Configuration with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/depsift/depsift.toml`
//! 3. Environment variables: `DEPSIFT_*` prefix (e.g. `DEPSIFT_MAVEN__REPO`)

use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Threshold above which a dependency is highlighted, e.g. "3MB"
    pub large_threshold: String,
    /// Only show dependency trees that exceed the threshold
    pub large_deps_only: bool,
    pub maven: MavenSettings,
    pub gradle: GradleSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MavenSettings {
    /// Path to the Maven command
    pub command: String,
    /// Location of the local Maven repository (`~` is expanded)
    pub repo: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GradleSettings {
    /// Path to the Gradle command; unset means autodetect gradlew
    pub command: Option<String>,
    /// Dependency configuration to analyze
    pub configuration: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            large_threshold: "3MB".to_string(),
            large_deps_only: false,
            maven: MavenSettings::default(),
            gradle: GradleSettings::default(),
        }
    }
}

impl Default for MavenSettings {
    fn default() -> Self {
        Self {
            command: "mvn".to_string(),
            repo: "~/.m2/repository".to_string(),
        }
    }
}

impl Default for GradleSettings {
    fn default() -> Self {
        Self {
            command: None,
            configuration: "runtimeClasspath".to_string(),
        }
    }
}

impl Settings {
    /// Loads the layered configuration.
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder().add_source(Config::try_from(&Settings::default())?);

        if let Some(path) = Self::global_path().filter(|p| p.exists()) {
            builder = builder.add_source(File::from(path));
        }

        builder
            .add_source(Environment::with_prefix("DEPSIFT").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// `$XDG_CONFIG_HOME/depsift/depsift.toml`
    pub fn global_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "depsift").map(|dirs| dirs.config_dir().join("depsift.toml"))
    }

    /// Config file template with the compiled defaults.
    pub fn template() -> String {
        toml::to_string_pretty(&Settings::default())
            .unwrap_or_else(|_| String::from("# failed to serialize defaults\n"))
    }
}
