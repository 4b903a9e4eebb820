//! The build environment.
//!
//! The environment is built in two phases: a mutable
//! [`EnvironmentBuilder`] accumulates configuration during the single
//! configuration pass, then [`EnvironmentBuilder::finalize`] freezes it
//! into an immutable [`Environment`] that the pipeline operations read.
//! Nothing mutates the environment after finalization.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::core::dependency::{Dependency, LinkLib};
use crate::core::descriptor::{InstallEntry, PackageDescriptor};
use crate::core::patterns::{CleanPatterns, IgnorePatterns};
use crate::probe::ProbeReport;

/// Mutable accumulator for one package's build configuration.
#[derive(Debug)]
pub struct EnvironmentBuilder {
    name: String,
    version: String,
    root: PathBuf,
    libs: Vec<LinkLib>,
    subdirs: Vec<PathBuf>,
    install: Vec<InstallEntry>,
    clean: CleanPatterns,
    ignore: IgnorePatterns,
    prefix: Option<PathBuf>,
}

impl EnvironmentBuilder {
    /// Create a builder for a package rooted at `root`.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        root: impl Into<PathBuf>,
    ) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            bail!("package name must not be empty");
        }

        Ok(EnvironmentBuilder {
            name,
            version: version.into(),
            root: root.into(),
            libs: Vec::new(),
            subdirs: Vec::new(),
            install: Vec::new(),
            clean: CleanPatterns::default_set(),
            ignore: IgnorePatterns::default_set(),
            prefix: None,
        })
    }

    /// Append a probed dependency's link libraries.
    ///
    /// Duplicates are kept; the linker tolerates repeats and no
    /// deduplication is attempted.
    pub fn merge_libs(&mut self, dependency: &Dependency) {
        self.libs.extend(dependency.libs().iter().cloned());
    }

    /// Declare a subdirectory build, in order.
    pub fn declare_subdir(&mut self, path: impl Into<PathBuf>) {
        self.subdirs.push(path.into());
    }

    /// Declare the install manifest.
    pub fn declare_install(&mut self, entries: Vec<InstallEntry>) {
        self.install = entries;
    }

    /// Declare the clean pattern set.
    pub fn declare_clean(&mut self, patterns: CleanPatterns) {
        self.clean = patterns;
    }

    /// Set the ignore pattern set used by tree walks.
    pub fn set_ignore_patterns(&mut self, patterns: IgnorePatterns) {
        self.ignore = patterns;
    }

    /// Set the install prefix.
    pub fn set_prefix(&mut self, prefix: Option<PathBuf>) {
        self.prefix = prefix;
    }

    /// Freeze the builder into an immutable environment, attaching the
    /// package help text.
    pub fn finalize(self, help: impl Into<String>) -> Environment {
        Environment {
            name: self.name,
            version: self.version,
            root: self.root,
            libs: self.libs,
            subdirs: self.subdirs,
            install: self.install,
            clean: self.clean,
            ignore: self.ignore,
            prefix: self.prefix,
            help: help.into(),
        }
    }
}

/// Immutable build configuration for one package.
#[derive(Debug)]
pub struct Environment {
    name: String,
    version: String,
    root: PathBuf,
    libs: Vec<LinkLib>,
    subdirs: Vec<PathBuf>,
    install: Vec<InstallEntry>,
    clean: CleanPatterns,
    ignore: IgnorePatterns,
    prefix: Option<PathBuf>,
    help: String,
}

impl Environment {
    /// Build an environment from a descriptor and a completed probe.
    ///
    /// Probing has already succeeded or failed by the time this runs;
    /// only the libraries of found dependencies are merged in.
    pub fn create(
        descriptor: &PackageDescriptor,
        root: &Path,
        probe: &ProbeReport,
        prefix: Option<PathBuf>,
    ) -> Result<Self> {
        let mut builder =
            EnvironmentBuilder::new(descriptor.name(), descriptor.version(), root)?;

        for dep in probe.found() {
            builder.merge_libs(dep);
        }

        for subdir in descriptor.subdirs() {
            builder.declare_subdir(subdir.clone());
        }

        builder.declare_install(descriptor.install_entries().to_vec());
        builder.declare_clean(descriptor.clean_patterns().clone());
        builder.set_ignore_patterns(descriptor.ignore_patterns().clone());
        builder.set_prefix(prefix);

        Ok(builder.finalize(descriptor.help()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Libraries to link, in merge order, duplicates included.
    pub fn libs(&self) -> &[LinkLib] {
        &self.libs
    }

    pub fn subdirs(&self) -> &[PathBuf] {
        &self.subdirs
    }

    pub fn install_manifest(&self) -> &[InstallEntry] {
        &self.install
    }

    pub fn clean_patterns(&self) -> &CleanPatterns {
        &self.clean
    }

    pub fn ignore_patterns(&self) -> &IgnorePatterns {
        &self.ignore
    }

    pub fn prefix(&self) -> Option<&Path> {
        self.prefix.as_deref()
    }

    pub fn help(&self) -> &str {
        &self.help
    }
}
