//! Configuration file support for pod-xcconfig.
//!
//! Two configuration file locations are read:
//! - Global: `~/.pod-xcconfig/config.toml` - User-wide defaults
//! - Project: `.pod-xcconfig/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default directory generated xcconfigs are written to.
pub const DEFAULT_OUTPUT_DIR: &str = "Target Support Files";

/// pod-xcconfig configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output settings
    pub output: OutputConfig,

    /// Generation settings
    pub generate: GenerateConfig,
}

/// Where and how xcconfig files are written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory (None = `Target Support Files`)
    pub dir: Option<PathBuf>,

    /// Lowercase the configuration in file names (None = true)
    pub lowercase_configuration: Option<bool>,
}

/// Generation-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// Number of parallel jobs (None = auto-detect)
    pub jobs: Option<usize>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.output.dir.is_some() {
            self.output.dir = other.output.dir;
        }
        if other.output.lowercase_configuration.is_some() {
            self.output.lowercase_configuration = other.output.lowercase_configuration;
        }

        if other.generate.jobs.is_some() {
            self.generate.jobs = other.generate.jobs;
        }
    }

    /// Whether file names use the lowercased configuration (`Pods-App.debug.xcconfig`).
    pub fn lowercase_configuration(&self) -> bool {
        self.output.lowercase_configuration.unwrap_or(true)
    }

    /// The output directory, relative paths resolved against `project_root`.
    pub fn output_dir(&self, project_root: &Path) -> PathBuf {
        let dir = self
            .output
            .dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
        if dir.is_relative() {
            project_root.join(dir)
        } else {
            dir
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.pod-xcconfig/config.toml)
/// 2. Global config (~/.pod-xcconfig/config.toml)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    // Load global config first
    if global_path.exists() {
        let global = Config::load_or_default(global_path);
        config.merge(global);
    }

    // Project config overrides global
    if project_path.exists() {
        let project = Config::load_or_default(project_path);
        config.merge(project);
    }

    config
}
