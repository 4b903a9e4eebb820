//! Dependency probing.
//!
//! Before anything is built, every declared dependency with a probe
//! header is checked against the include search paths. A required
//! dependency that cannot be located aborts the run before the first
//! subdirectory build; an optional one is skipped with a warning.

use std::path::PathBuf;

use crate::core::dependency::Dependency;
use crate::error::PipelineError;

/// Environment variable holding extra include directories, colon-separated.
pub const INCLUDE_PATH_VAR: &str = "SLIPWAY_INCLUDE_PATH";

/// Outcome of probing one descriptor's dependency list.
#[derive(Debug, Default)]
pub struct ProbeReport {
    found: Vec<Dependency>,
    skipped: Vec<Dependency>,
}

impl ProbeReport {
    /// Dependencies whose probe succeeded (or that declare no probe).
    pub fn found(&self) -> &[Dependency] {
        &self.found
    }

    /// Optional dependencies whose probe failed.
    pub fn skipped(&self) -> &[Dependency] {
        &self.skipped
    }

    /// Treat every dependency as found, without touching the host.
    ///
    /// Used by `slipway plan` and `slipway info`, which describe the
    /// pipeline rather than run it.
    pub fn assume_all(deps: &[Dependency]) -> Self {
        ProbeReport {
            found: deps.to_vec(),
            skipped: Vec::new(),
        }
    }
}

/// The include directories searched for probe headers.
///
/// Order: configured extra directories, then `SLIPWAY_INCLUDE_PATH`,
/// then the system defaults.
pub fn search_paths(extra: &[PathBuf]) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = extra.to_vec();

    if let Ok(var) = std::env::var(INCLUDE_PATH_VAR) {
        paths.extend(
            var.split(':')
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
        );
    }

    paths.push(PathBuf::from("/usr/include"));
    paths.push(PathBuf::from("/usr/local/include"));
    paths
}

/// Probe every dependency against the given search paths.
pub fn probe(deps: &[Dependency], paths: &[PathBuf]) -> Result<ProbeReport, PipelineError> {
    let mut report = ProbeReport::default();

    for dep in deps {
        let header = match dep.header() {
            Some(h) => h,
            None => {
                // No probe declared; trust the dependency is linkable.
                tracing::debug!("dependency `{}` has no probe header", dep.name());
                report.found.push(dep.clone());
                continue;
            }
        };

        match locate_header(header, paths) {
            Some(path) => {
                tracing::debug!(
                    "found `{}` for dependency `{}` at {}",
                    header,
                    dep.name(),
                    path.display()
                );
                report.found.push(dep.clone());
            }
            None if dep.is_required() => {
                return Err(PipelineError::DependencyNotFound {
                    dependency: dep.name().to_string(),
                    header: header.to_string(),
                    searched: paths.to_vec(),
                });
            }
            None => {
                tracing::warn!(
                    "optional dependency `{}` not found (probe header `{}`), skipping",
                    dep.name(),
                    header
                );
                report.skipped.push(dep.clone());
            }
        }
    }

    Ok(report)
}

fn locate_header(header: &str, paths: &[PathBuf]) -> Option<PathBuf> {
    paths
        .iter()
        .map(|dir| dir.join(header))
        .find(|candidate| candidate.is_file())
}

/// Probe against the default search paths plus `extra`.
pub fn probe_with_defaults(
    deps: &[Dependency],
    extra: &[PathBuf],
) -> Result<ProbeReport, PipelineError> {
    let paths = search_paths(extra);
    probe(deps, &paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dependency::DependencySpec;
    use tempfile::TempDir;

    fn dep(name: &str, header: Option<&str>, libs: &[&str], required: bool) -> Dependency {
        DependencySpec {
            name: name.to_string(),
            header: header.map(|s| s.to_string()),
            libs: libs.iter().map(|s| s.to_string()).collect(),
            required,
        }
        .to_dependency()
        .unwrap()
    }

    fn fake_include(tmp: &TempDir, header: &str) -> PathBuf {
        let include = tmp.path().join("include");
        let path = include.join(header);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "#pragma once\n").unwrap();
        include
    }

    #[test]
    fn test_probe_finds_header_and_merges_libs() {
        let tmp = TempDir::new().unwrap();
        let include = fake_include(&tmp, "boost/regex.hpp");

        let deps = vec![dep(
            "boost",
            Some("boost/regex.hpp"),
            &["boost_regex:C++"],
            true,
        )];
        let report = probe(&deps, &[include]).unwrap();

        assert_eq!(report.found().len(), 1);
        assert_eq!(report.found()[0].libs()[0].name(), "boost_regex");
    }

    #[test]
    fn test_probe_required_missing_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let deps = vec![dep("boost", Some("boost/regex.hpp"), &[], true)];

        let err = probe(&deps, &[tmp.path().to_path_buf()]).unwrap_err();
        match err {
            PipelineError::DependencyNotFound { dependency, .. } => {
                assert_eq!(dependency, "boost");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_probe_optional_missing_is_skipped() {
        let tmp = TempDir::new().unwrap();
        let deps = vec![dep("doxygen", Some("doxygen.h"), &[], false)];

        let report = probe(&deps, &[tmp.path().to_path_buf()]).unwrap();
        assert!(report.found().is_empty());
        assert_eq!(report.skipped().len(), 1);
    }

    #[test]
    fn test_probe_without_header_trusted() {
        let deps = vec![dep("m", None, &["m"], true)];
        let report = probe(&deps, &[]).unwrap();
        assert_eq!(report.found().len(), 1);
    }

    #[test]
    fn test_search_paths_order() {
        let extra = vec![PathBuf::from("/opt/boost/include")];
        let paths = search_paths(&extra);

        assert_eq!(paths[0], PathBuf::from("/opt/boost/include"));
        assert!(paths.contains(&PathBuf::from("/usr/include")));
    }
}
