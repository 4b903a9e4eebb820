//! External dependency specification.
//!
//! A Dependency describes what the package requires from the host system:
//! a probe header used to verify the development files are present, and
//! the native libraries to link once they are.

use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Language qualifier for a link library token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    C,
    Cxx,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::C => write!(f, "C"),
            Language::Cxx => write!(f, "C++"),
        }
    }
}

impl FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "C" | "c" => Ok(Language::C),
            "C++" | "c++" | "cxx" => Ok(Language::Cxx),
            _ => bail!("unknown language tag `{}`; expected `C` or `C++`", s),
        }
    }
}

/// A native library to link, optionally qualified with a language tag.
///
/// Written in descriptors as `name` or `name:lang`, e.g. `boost_regex:C++`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkLib {
    name: String,
    language: Option<Language>,
}

impl LinkLib {
    /// Get the library name (the linker token, without `-l`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the language qualifier, if any.
    pub fn language(&self) -> Option<Language> {
        self.language
    }
}

impl FromStr for LinkLib {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (name, language) = match s.split_once(':') {
            Some((name, lang)) => (name, Some(lang.parse()?)),
            None => (s, None),
        };
        if name.is_empty() {
            bail!("empty library token");
        }
        Ok(LinkLib {
            name: name.to_string(),
            language,
        })
    }
}

impl fmt::Display for LinkLib {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.language {
            Some(lang) => write!(f, "{}:{}", self.name, lang),
            None => write!(f, "{}", self.name),
        }
    }
}

/// A dependency on external development files.
#[derive(Debug, Clone)]
pub struct Dependency {
    /// Dependency name
    name: String,

    /// Header whose presence verifies the dependency is usable
    header: Option<String>,

    /// Libraries to merge into the package's link list when found
    libs: Vec<LinkLib>,

    /// Whether a failed probe aborts the build
    required: bool,
}

impl Dependency {
    /// Create a new required dependency with no probe header.
    pub fn new(name: impl Into<String>) -> Self {
        Dependency {
            name: name.into(),
            header: None,
            libs: Vec::new(),
            required: true,
        }
    }

    /// Set the probe header.
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Set the link libraries.
    pub fn with_libs(mut self, libs: Vec<LinkLib>) -> Self {
        self.libs = libs;
        self
    }

    /// Set whether the dependency is required.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Get the dependency name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the probe header, if any.
    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    /// Get the link libraries.
    pub fn libs(&self) -> &[LinkLib] {
        &self.libs
    }

    /// Check if a failed probe is fatal.
    pub fn is_required(&self) -> bool {
        self.required
    }
}

/// Dependency specification as it appears in Slipway.toml.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencySpec {
    /// Dependency name
    pub name: String,

    /// Probe header, checked against the include search paths
    #[serde(default)]
    pub header: Option<String>,

    /// Library tokens, each optionally `name:lang`
    #[serde(default)]
    pub libs: Vec<String>,

    /// Whether a failed probe aborts the build (default true)
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_required() -> bool {
    true
}

impl DependencySpec {
    /// Convert to a runtime Dependency, parsing library tokens.
    pub fn to_dependency(&self) -> Result<Dependency> {
        if self.name.is_empty() {
            bail!("dependency name must not be empty");
        }

        let libs = self
            .libs
            .iter()
            .map(|token| token.parse())
            .collect::<Result<Vec<LinkLib>>>()?;

        Ok(Dependency {
            name: self.name.clone(),
            header: self.header.clone(),
            libs,
            required: self.required,
        })
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(ref header) = self.header {
            write!(f, " ({})", header)?;
        }
        Ok(())
    }
}
