//! Global context for pod-xcconfig operations.
//!
//! Provides centralized access to configuration paths and the working
//! directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use crate::util::config::{load_config, Config};

/// Default facts manifest file name searched for from the working directory.
pub const FACTS_FILE_NAME: &str = "Pods.facts.toml";

/// Name of the per-user and per-project configuration directories.
pub const CONFIG_DIR_NAME: &str = ".pod-xcconfig";

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("could not find `Pods.facts.toml` in `{}` or any parent directory", dir.display())]
    FactsNotFound { dir: PathBuf },
}

/// Global context containing configuration paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Directory for user-wide settings (~/.pod-xcconfig/)
    home: PathBuf,
}

impl GlobalContext {
    /// Create a new GlobalContext with defaults.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(GlobalContext::with_cwd(cwd))
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Self {
        let home = directories::BaseDirs::new()
            .map(|b| b.home_dir().join(CONFIG_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR_NAME));
        GlobalContext { cwd, home }
    }

    /// Override the user-wide settings directory.
    pub fn with_home(mut self, home: PathBuf) -> Self {
        self.home = home;
        self
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the user-wide settings directory.
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Get the global configuration file path.
    pub fn config_path(&self) -> PathBuf {
        self.home.join("config.toml")
    }

    /// Get the project configuration file path.
    pub fn project_config_path(&self) -> PathBuf {
        self.cwd.join(CONFIG_DIR_NAME).join("config.toml")
    }

    /// Global config merged with the project config.
    pub fn config(&self) -> Config {
        load_config(&self.config_path(), &self.project_config_path())
    }

    /// Resolve a facts manifest path given on the command line, or search
    /// upward from the working directory for `Pods.facts.toml`.
    pub fn facts_path(&self, explicit: Option<&Path>) -> Result<PathBuf, ContextError> {
        if let Some(path) = explicit {
            return Ok(self.cwd.join(path));
        }

        let mut current = self.cwd.clone();
        loop {
            let candidate = current.join(FACTS_FILE_NAME);
            if candidate.is_file() {
                return Ok(candidate);
            }
            if !current.pop() {
                return Err(ContextError::FactsNotFound {
                    dir: self.cwd.clone(),
                });
            }
        }
    }
}
