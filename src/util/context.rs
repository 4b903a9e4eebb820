//! Global context for Slipway operations.
//!
//! Provides centralized access to configuration paths and descriptor
//! discovery. The descriptor file (`Slipway.toml`) is located by walking
//! up from the current directory, so commands work from any subdirectory
//! of the package tree.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;

/// The descriptor file name searched for in each ancestor directory.
pub const DESCRIPTOR_FILE: &str = "Slipway.toml";

/// Global context for a Slipway invocation.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory at startup
    cwd: PathBuf,

    /// Global configuration directory, if resolvable
    config_dir: Option<PathBuf>,
}

impl GlobalContext {
    /// Create a context from the current working directory.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(Self::from_cwd(cwd))
    }

    /// Create a context from an explicit working directory.
    pub fn from_cwd(cwd: PathBuf) -> Self {
        let config_dir = ProjectDirs::from("", "", "slipway")
            .map(|dirs| dirs.config_dir().to_path_buf());
        GlobalContext { cwd, config_dir }
    }

    /// The working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Find the package descriptor by walking up from the working directory.
    pub fn find_descriptor(&self) -> Result<PathBuf> {
        let mut dir = self.cwd.as_path();
        loop {
            let candidate = dir.join(DESCRIPTOR_FILE);
            if candidate.is_file() {
                return Ok(candidate);
            }
            match dir.parent() {
                Some(parent) => dir = parent,
                None => bail!(
                    "could not find `{}` in `{}` or any parent directory",
                    DESCRIPTOR_FILE,
                    self.cwd.display()
                ),
            }
        }
    }

    /// The package root (directory containing the descriptor).
    pub fn package_root(&self) -> Result<PathBuf> {
        let descriptor = self.find_descriptor()?;
        Ok(descriptor
            .parent()
            .expect("descriptor path has a parent")
            .to_path_buf())
    }

    /// Path to the project-local state directory (`.slipway/`).
    pub fn project_slipway_dir(&self) -> Result<PathBuf> {
        Ok(self.package_root()?.join(".slipway"))
    }

    /// Path to the project configuration file.
    pub fn project_config_path(&self) -> Result<PathBuf> {
        Ok(self.project_slipway_dir()?.join("config.toml"))
    }

    /// Path to the global configuration file.
    pub fn global_config_path(&self) -> Option<PathBuf> {
        self.config_dir.as_ref().map(|d| d.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_descriptor_walks_up() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(DESCRIPTOR_FILE), "[package]\nname = \"utils\"\n")
            .unwrap();
        let nested = tmp.path().join("lib/detail");
        std::fs::create_dir_all(&nested).unwrap();

        let ctx = GlobalContext::from_cwd(nested);
        let found = ctx.find_descriptor().unwrap();
        assert!(found.ends_with(DESCRIPTOR_FILE));
        assert_eq!(found.parent().unwrap(), tmp.path());
    }

    #[test]
    fn test_find_descriptor_missing() {
        let tmp = TempDir::new().unwrap();
        let ctx = GlobalContext::from_cwd(tmp.path().to_path_buf());
        assert!(ctx.find_descriptor().is_err());
    }
}
