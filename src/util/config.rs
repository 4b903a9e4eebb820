//! Configuration file support for Slipway.
//!
//! Slipway supports two configuration file locations:
//! - Global: `~/.config/slipway/config.toml` - User-wide defaults
//! - Project: `.slipway/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config. The install
//! prefix is resolved with a further override chain on top of this:
//! `--prefix` flag > `SLIPWAY_PREFIX` env var > config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Slipway configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Install settings
    pub install: InstallConfig,

    /// Dependency probe settings
    pub probe: ProbeConfig,
}

/// Install settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallConfig {
    /// Default install prefix
    pub prefix: Option<PathBuf>,
}

/// Dependency probe settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Extra include directories searched for probe headers,
    /// ahead of the system defaults.
    pub include_dirs: Vec<PathBuf>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.install.prefix.is_some() {
            self.install.prefix = other.install.prefix;
        }
        if !other.probe.include_dirs.is_empty() {
            self.probe.include_dirs = other.probe.include_dirs;
        }
    }

    /// Resolve the install prefix.
    ///
    /// Order of precedence (highest to lowest):
    /// 1. `--prefix` flag
    /// 2. `SLIPWAY_PREFIX` environment variable
    /// 3. Config files
    pub fn resolve_prefix(&self, flag: Option<&Path>) -> Option<PathBuf> {
        if let Some(p) = flag {
            return Some(p.to_path_buf());
        }
        if let Ok(p) = std::env::var("SLIPWAY_PREFIX") {
            if !p.is_empty() {
                return Some(PathBuf::from(p));
            }
        }
        self.install.prefix.clone()
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.slipway/config.toml)
/// 2. Global config (~/.config/slipway/config.toml)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    if global_path.exists() {
        let global = Config::load_or_default(global_path);
        config.merge(global);
    }

    if project_path.exists() {
        let project = Config::load_or_default(project_path);
        config.merge(project);
    }

    config
}
