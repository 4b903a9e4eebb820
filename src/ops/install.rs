//! Install action: copy built artifacts into the prefix.
//!
//! Install never triggers a build; every manifest source must already
//! exist in the tree. Destination directories are created as needed.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::environment::Environment;
use crate::error::PipelineError;
use crate::util::fs::{copy_dir_all, ensure_dir, glob_files, relative_path};

/// Copy every manifest entry into `prefix`, returning the files written.
pub fn install(env: &Environment, prefix: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(prefix).map_err(|cause| PipelineError::InstallTargetUnwritable {
        prefix: prefix.to_path_buf(),
        cause,
    })?;

    let mut installed = Vec::new();

    for entry in env.install_manifest() {
        let dst = prefix.join(&entry.dst);

        if is_glob(&entry.src) {
            let matches = glob_files(env.root(), &entry.src)?;
            if matches.is_empty() {
                return Err(PipelineError::MissingArtifact {
                    artifact: PathBuf::from(&entry.src),
                }
                .into());
            }

            ensure_dir(&dst)?;
            for file in matches {
                let Some(name) = file.file_name() else {
                    continue;
                };
                let target = dst.join(name);
                fs::copy(&file, &target).map_err(|cause| {
                    PipelineError::InstallTargetUnwritable {
                        prefix: prefix.to_path_buf(),
                        cause,
                    }
                })?;
                installed.push(target);
            }
        } else {
            let src = env.root().join(&entry.src);
            if src.is_dir() {
                copy_dir_all(&src, &dst).map_err(|err| {
                    PipelineError::InstallTargetUnwritable {
                        prefix: prefix.to_path_buf(),
                        cause: std::io::Error::new(std::io::ErrorKind::Other, err),
                    }
                })?;
                installed.extend(installed_files_under(&dst));
            } else if src.is_file() {
                if let Some(parent) = dst.parent() {
                    ensure_dir(parent)?;
                }
                fs::copy(&src, &dst).map_err(|cause| {
                    PipelineError::InstallTargetUnwritable {
                        prefix: prefix.to_path_buf(),
                        cause,
                    }
                })?;
                installed.push(dst);
            } else {
                return Err(PipelineError::MissingArtifact {
                    artifact: PathBuf::from(&entry.src),
                }
                .into());
            }
        }
    }

    for path in &installed {
        tracing::debug!("installed {}", relative_path(prefix, path).display());
    }
    eprintln!(
        "   Installed {} file(s) to {}",
        installed.len(),
        prefix.display()
    );

    Ok(installed)
}

fn is_glob(src: &str) -> bool {
    src.contains(['*', '?', '['])
}

fn installed_files_under(dir: &Path) -> Vec<PathBuf> {
    walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .collect()
}
