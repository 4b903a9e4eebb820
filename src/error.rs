//! Pipeline error types and diagnostics.

use std::path::PathBuf;

use thiserror::Error;

use crate::util::diagnostic::Diagnostic;

/// Error during pipeline execution.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("required dependency `{dependency}` not found")]
    DependencyNotFound {
        dependency: String,
        header: String,
        searched: Vec<PathBuf>,
    },

    #[error("build failed in `{subdir}`")]
    CompileFailure { subdir: PathBuf, message: String },

    // thiserror reserves a field named `source` for error chaining, so
    // the missing path is called `artifact`.
    #[error("install artifact missing: `{artifact}`")]
    MissingArtifact { artifact: PathBuf },

    #[error("install prefix is not writable: `{prefix}`")]
    InstallTargetUnwritable {
        prefix: PathBuf,
        #[source]
        cause: std::io::Error,
    },

    #[error("no descriptor found for subdirectory `{subdir}`")]
    MissingDescriptor { subdir: PathBuf },
}

impl PipelineError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            PipelineError::DependencyNotFound {
                dependency,
                header,
                searched,
            } => {
                let mut diag = Diagnostic::error(format!(
                    "required dependency `{}` not found (probe header `{}`)",
                    dependency, header
                ));

                if !searched.is_empty() {
                    diag = diag.with_context(format!(
                        "searched: {}",
                        searched
                            .iter()
                            .map(|p| p.display().to_string())
                            .collect::<Vec<_>>()
                            .join(", ")
                    ));
                }

                diag = diag
                    .with_suggestion(format!(
                        "Install the development files for `{}`",
                        dependency
                    ))
                    .with_suggestion(
                        "Add its include directory to `probe.include_dirs` in .slipway/config.toml"
                            .to_string(),
                    );

                diag
            }

            PipelineError::CompileFailure { subdir, message } => {
                Diagnostic::error(format!("build failed in `{}`", subdir.display()))
                    .with_context(message.clone())
                    .with_suggestion("Run `slipway build --verbose` for more details".to_string())
            }

            PipelineError::MissingArtifact { artifact } => {
                Diagnostic::error(format!("install artifact missing: `{}`", artifact.display()))
                    .with_suggestion("Run `slipway build` before `slipway install`".to_string())
            }

            PipelineError::InstallTargetUnwritable { prefix, cause } => {
                Diagnostic::error(format!(
                    "install prefix is not writable: `{}`",
                    prefix.display()
                ))
                .with_context(cause.to_string())
                .with_suggestion("Choose a writable prefix with `--prefix`".to_string())
            }

            PipelineError::MissingDescriptor { subdir } => Diagnostic::error(format!(
                "subdirectory `{}` has no Slipway.toml",
                subdir.display()
            ))
            .with_suggestion(format!(
                "Create `{}/Slipway.toml` with a [build] section",
                subdir.display()
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dependency_not_found_diagnostic() {
        let err = PipelineError::DependencyNotFound {
            dependency: "boost".to_string(),
            header: "boost/regex.hpp".to_string(),
            searched: vec![PathBuf::from("/usr/include")],
        };

        let diag = err.to_diagnostic();
        let output = diag.format(false);

        assert!(output.contains("boost"));
        assert!(output.contains("boost/regex.hpp"));
        assert!(output.contains("/usr/include"));
        assert!(output.contains("help: consider:"));
    }

    #[test]
    fn test_missing_artifact_diagnostic() {
        let err = PipelineError::MissingArtifact {
            artifact: PathBuf::from("doc/htmlDir"),
        };

        let output = err.to_diagnostic().format(false);
        assert!(output.contains("doc/htmlDir"));
        assert!(output.contains("slipway build"));
    }

    #[test]
    fn test_missing_artifact_message_names_the_path() {
        let err = PipelineError::MissingArtifact {
            artifact: PathBuf::from("ups/*.table"),
        };
        assert_eq!(err.to_string(), "install artifact missing: `ups/*.table`");
    }
}
