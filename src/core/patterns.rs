//! Typed glob-pattern sets for cleaning and ignoring files.
//!
//! The clean set and the ignore set are deliberately distinct: clean
//! patterns name generated files that `slipway clean` deletes, while
//! ignore patterns name files the tag-index collector and other tree
//! walks skip. They may overlap (both mention object files); overlap is
//! reported, never silently merged.

use std::path::Path;

use anyhow::{bail, Context, Result};
use glob::Pattern;

/// File name extensions treated as source files.
///
/// Clean patterns must never match these; deleting sources is ruled out
/// structurally rather than by runtime checks.
pub const SOURCE_EXTENSIONS: &[&str] = &["c", "cc", "cpp", "h", "hpp", "py"];

/// A set of glob patterns matched against file and directory names.
#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
    raw: Vec<String>,
}

impl PatternSet {
    /// Compile a set from raw glob strings.
    pub fn new(raw: &[String]) -> Result<Self> {
        let patterns = raw
            .iter()
            .map(|p| Pattern::new(p).with_context(|| format!("invalid glob pattern: `{}`", p)))
            .collect::<Result<Vec<_>>>()?;

        Ok(PatternSet {
            patterns,
            raw: raw.to_vec(),
        })
    }

    /// Check whether a file or directory name matches any pattern.
    pub fn matches_name(&self, name: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(name))
    }

    /// Check whether any component of a path matches any pattern.
    pub fn matches_path(&self, path: &Path) -> bool {
        path.components().any(|c| {
            c.as_os_str()
                .to_str()
                .map(|name| self.matches_name(name))
                .unwrap_or(false)
        })
    }

    /// The raw pattern strings.
    pub fn raw(&self) -> &[String] {
        &self.raw
    }

    /// Patterns present in both sets, by raw string equality.
    pub fn overlapping(&self, other: &PatternSet) -> Vec<String> {
        self.raw
            .iter()
            .filter(|p| other.raw.contains(p))
            .cloned()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

/// Patterns naming generated files that the clean action deletes.
#[derive(Debug, Clone)]
pub struct CleanPatterns(PatternSet);

impl CleanPatterns {
    /// Compile and validate a clean set.
    ///
    /// Rejects any pattern that would match a source file name.
    pub fn new(raw: &[String]) -> Result<Self> {
        let set = PatternSet::new(raw)?;

        for pattern in &set.patterns {
            for ext in SOURCE_EXTENSIONS {
                let sample = format!("sample.{}", ext);
                if pattern.matches(&sample) {
                    bail!(
                        "clean pattern `{}` would delete source files (matches `{}`)",
                        pattern.as_str(),
                        sample
                    );
                }
            }
            if pattern.matches("Slipway.toml") {
                bail!(
                    "clean pattern `{}` would delete the package descriptor",
                    pattern.as_str()
                );
            }
        }

        Ok(CleanPatterns(set))
    }

    /// The default clean set: editor backups, object files, shared
    /// objects, and core dumps.
    pub fn default_set() -> Self {
        let raw = ["*~", "*.o", "*.os", "*.so", "core"]
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>();
        CleanPatterns::new(&raw).expect("default clean patterns are valid")
    }

    /// Check whether a file name is cleanable.
    pub fn matches_name(&self, name: &str) -> bool {
        self.0.matches_name(name)
    }

    pub fn raw(&self) -> &[String] {
        self.0.raw()
    }

    pub fn as_set(&self) -> &PatternSet {
        &self.0
    }
}

/// Patterns naming files and directories skipped by tree walks.
#[derive(Debug, Clone)]
pub struct IgnorePatterns(PatternSet);

impl IgnorePatterns {
    /// Compile an ignore set.
    pub fn new(raw: &[String]) -> Result<Self> {
        Ok(IgnorePatterns(PatternSet::new(raw)?))
    }

    /// The default ignore set: editor backups, compiled bytecode,
    /// version-control metadata, and object files.
    pub fn default_set() -> Self {
        let raw = ["*~", "*.pyc", ".svn", "*.o"]
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>();
        IgnorePatterns::new(&raw).expect("default ignore patterns are valid")
    }

    /// Check whether a file or directory name is ignored.
    pub fn matches_name(&self, name: &str) -> bool {
        self.0.matches_name(name)
    }

    pub fn raw(&self) -> &[String] {
        self.0.raw()
    }

    pub fn as_set(&self) -> &PatternSet {
        &self.0
    }
}
