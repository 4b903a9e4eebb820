//! Package descriptor parsing.
//!
//! The descriptor (`Slipway.toml`) declares the whole pipeline for one
//! package: its name and version tag, the external dependencies to
//! probe, the ordered subdirectories to build, the install manifest,
//! and the clean/ignore pattern sets. Each built subdirectory carries
//! its own nested descriptor with the concrete build steps.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::dependency::{Dependency, DependencySpec};
use crate::core::patterns::{CleanPatterns, IgnorePatterns};
use crate::util::fs::read_to_string;

/// One copy instruction in the install manifest.
///
/// `src` is relative to the package root and may be a file, a
/// directory (copied recursively), or a glob such as `ups/*.table`.
/// `dst` is relative to the install prefix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallEntry {
    pub src: String,
    pub dst: PathBuf,
}

/// The `[package]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageSection {
    /// Package name
    pub name: String,

    /// Opaque version/source tag, kept for provenance only
    #[serde(default)]
    pub version: Option<String>,

    /// One-line description shown by `slipway info`
    #[serde(default)]
    pub help: Option<String>,
}

/// The `[build]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSection {
    /// Subdirectories built in declared order
    pub subdirs: Vec<PathBuf>,
}

/// The `[install]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallSection {
    /// Manifest entries, written as `[[install.entry]]`
    pub entry: Vec<InstallEntry>,
}

/// The `[patterns]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternsSection {
    /// Clean patterns; defaults apply when omitted
    pub clean: Option<Vec<String>>,

    /// Ignore patterns; defaults apply when omitted
    pub ignore: Option<Vec<String>>,
}

/// Raw descriptor as parsed from Slipway.toml.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescriptorToml {
    pub package: PackageSection,

    #[serde(default, rename = "dependency")]
    pub dependencies: Vec<DependencySpec>,

    #[serde(default)]
    pub build: BuildSection,

    #[serde(default)]
    pub install: InstallSection,

    #[serde(default)]
    pub patterns: PatternsSection,
}

/// A validated package descriptor.
#[derive(Debug, Clone)]
pub struct PackageDescriptor {
    name: String,
    version: String,
    help: String,
    dependencies: Vec<Dependency>,
    subdirs: Vec<PathBuf>,
    install: Vec<InstallEntry>,
    clean: CleanPatterns,
    ignore: IgnorePatterns,
}

impl PackageDescriptor {
    /// Load and validate a descriptor from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = read_to_string(path)?;
        let raw: DescriptorToml = toml::from_str(&contents)
            .with_context(|| format!("failed to parse descriptor: {}", path.display()))?;
        Self::from_toml(raw)
            .with_context(|| format!("invalid descriptor: {}", path.display()))
    }

    /// Validate a parsed descriptor.
    pub fn from_toml(raw: DescriptorToml) -> Result<Self> {
        if raw.package.name.is_empty() {
            bail!("package name must not be empty");
        }

        for subdir in &raw.build.subdirs {
            if subdir.is_absolute() {
                bail!(
                    "subdirectory `{}` must be a relative path",
                    subdir.display()
                );
            }
        }

        let dependencies = raw
            .dependencies
            .iter()
            .map(|spec| spec.to_dependency())
            .collect::<Result<Vec<_>>>()?;

        let clean = match raw.patterns.clean {
            Some(ref patterns) => CleanPatterns::new(patterns)?,
            None => CleanPatterns::default_set(),
        };
        let ignore = match raw.patterns.ignore {
            Some(ref patterns) => IgnorePatterns::new(patterns)?,
            None => IgnorePatterns::default_set(),
        };

        let overlap = clean.as_set().overlapping(ignore.as_set());
        if !overlap.is_empty() {
            tracing::debug!(
                "clean and ignore sets share patterns: {}",
                overlap.join(", ")
            );
        }

        Ok(PackageDescriptor {
            name: raw.package.name,
            version: raw.package.version.unwrap_or_else(|| "unversioned".to_string()),
            help: raw.package.help.unwrap_or_default(),
            dependencies,
            subdirs: raw.build.subdirs,
            install: raw.install.entry,
            clean,
            ignore,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    pub fn subdirs(&self) -> &[PathBuf] {
        &self.subdirs
    }

    pub fn install_entries(&self) -> &[InstallEntry] {
        &self.install
    }

    pub fn clean_patterns(&self) -> &CleanPatterns {
        &self.clean
    }

    pub fn ignore_patterns(&self) -> &IgnorePatterns {
        &self.ignore
    }
}

/// The `[build]` section of a nested descriptor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubdirBuildSection {
    /// Command lines run in the subdirectory, in order
    pub steps: Vec<String>,
}

/// A nested descriptor for one built subdirectory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubdirDescriptor {
    pub build: SubdirBuildSection,
}

impl SubdirDescriptor {
    /// Load a nested descriptor from a subdirectory's Slipway.toml.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = read_to_string(path)?;
        toml::from_str(&contents)
            .with_context(|| format!("failed to parse nested descriptor: {}", path.display()))
    }

    /// The build steps, in declared order.
    pub fn steps(&self) -> &[String] {
        &self.build.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UTILS_DESCRIPTOR: &str = r#"
[package]
name = "utils"
version = "14.0-2-gd1e3e2a"
help = "Utility classes and functions, with a Python bridge"

[[dependency]]
name = "boost"
header = "boost/regex.hpp"
libs = ["boost_regex:C++"]

[[dependency]]
name = "python"
header = "Python.h"

[build]
subdirs = ["lib", "python/utils", "doc"]

[[install.entry]]
src = "python"
dst = "python"

[[install.entry]]
src = "include"
dst = "include"

[[install.entry]]
src = "lib"
dst = "lib"

[[install.entry]]
src = "doc/htmlDir"
dst = "doc/doxygen"

[[install.entry]]
src = "ups/*.table"
dst = "ups"
"#;

    #[test]
    fn test_parse_full_descriptor() {
        let raw: DescriptorToml = toml::from_str(UTILS_DESCRIPTOR).unwrap();
        let desc = PackageDescriptor::from_toml(raw).unwrap();

        assert_eq!(desc.name(), "utils");
        assert_eq!(desc.version(), "14.0-2-gd1e3e2a");
        assert_eq!(desc.dependencies().len(), 2);
        assert_eq!(desc.dependencies()[0].libs()[0].name(), "boost_regex");
        assert_eq!(desc.subdirs().len(), 3);
        assert_eq!(desc.subdirs()[0], PathBuf::from("lib"));
        assert_eq!(desc.install_entries().len(), 5);
        assert_eq!(desc.install_entries()[4].src, "ups/*.table");
    }

    #[test]
    fn test_defaults_when_sections_omitted() {
        let raw: DescriptorToml = toml::from_str("[package]\nname = \"utils\"\n").unwrap();
        let desc = PackageDescriptor::from_toml(raw).unwrap();

        assert_eq!(desc.version(), "unversioned");
        assert!(desc.subdirs().is_empty());
        assert!(desc.clean_patterns().matches_name("a.o"));
        assert!(desc.ignore_patterns().matches_name(".svn"));
    }

    #[test]
    fn test_empty_name_rejected() {
        let raw: DescriptorToml = toml::from_str("[package]\nname = \"\"\n").unwrap();
        assert!(PackageDescriptor::from_toml(raw).is_err());
    }

    #[test]
    fn test_absolute_subdir_rejected() {
        let raw: DescriptorToml =
            toml::from_str("[package]\nname = \"utils\"\n[build]\nsubdirs = [\"/lib\"]\n")
                .unwrap();
        assert!(PackageDescriptor::from_toml(raw).is_err());
    }

    #[test]
    fn test_bad_clean_pattern_rejected() {
        let raw: DescriptorToml = toml::from_str(
            "[package]\nname = \"utils\"\n[patterns]\nclean = [\"*.cpp\"]\n",
        )
        .unwrap();
        assert!(PackageDescriptor::from_toml(raw).is_err());
    }

    #[test]
    fn test_subdir_descriptor_steps() {
        let nested: SubdirDescriptor = toml::from_str(
            "[build]\nsteps = [\"g++ -c regex.cc -o regex.o\", \"ar rcs libutils.a regex.o\"]\n",
        )
        .unwrap();
        assert_eq!(nested.steps().len(), 2);
    }
}
