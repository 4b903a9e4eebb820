//! Clean action: delete generated files matching the clean patterns.
//!
//! Only file names matching a clean pattern are deleted; everything
//! else is left alone. Running clean on an already-clean tree deletes
//! nothing and is not an error.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use walkdir::WalkDir;

use crate::core::environment::Environment;

/// List the files that the clean patterns match, without deleting.
pub fn collect_cleanable(env: &Environment) -> Result<Vec<PathBuf>> {
    let patterns = env.clean_patterns();
    let mut matched = Vec::new();

    for entry in WalkDir::new(env.root()) {
        let entry = entry.with_context(|| {
            format!("failed to walk tree under {}", env.root().display())
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let name = match entry.file_name().to_str() {
            Some(name) => name,
            None => continue,
        };

        if patterns.matches_name(name) {
            matched.push(entry.into_path());
        }
    }

    Ok(matched)
}

/// Delete matching files under the package root, returning what was removed.
pub fn clean(env: &Environment) -> Result<Vec<PathBuf>> {
    let removed = collect_cleanable(env)?;

    for path in &removed {
        fs::remove_file(path)
            .with_context(|| format!("failed to remove {}", path.display()))?;
        tracing::debug!("removed {}", path.display());
    }

    eprintln!("     Removed {} file(s)", removed.len());
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::environment::EnvironmentBuilder;
    use tempfile::TempDir;

    fn env_for(tmp: &TempDir) -> Environment {
        EnvironmentBuilder::new("utils", "1.0", tmp.path())
            .unwrap()
            .finalize("")
    }

    #[test]
    fn test_clean_removes_only_matching_files() {
        let tmp = TempDir::new().unwrap();
        for name in ["a.o", "b.pyc", "c.cpp", "core"] {
            fs::write(tmp.path().join(name), "").unwrap();
        }

        let env = env_for(&tmp);
        let mut removed: Vec<_> = clean(&env)
            .unwrap()
            .into_iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        removed.sort();

        assert_eq!(removed, vec!["a.o", "core"]);
        assert!(!tmp.path().join("a.o").exists());
        assert!(!tmp.path().join("core").exists());

        // Ignore-set patterns are not clean patterns.
        assert!(tmp.path().join("b.pyc").exists());
        assert!(tmp.path().join("c.cpp").exists());
    }

    #[test]
    fn test_clean_recurses() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("lib/detail");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("impl.o"), "").unwrap();
        fs::write(nested.join("impl.cc"), "").unwrap();

        let env = env_for(&tmp);
        clean(&env).unwrap();

        assert!(!nested.join("impl.o").exists());
        assert!(nested.join("impl.cc").exists());
    }

    #[test]
    fn test_clean_twice_is_noop() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.o"), "").unwrap();

        let env = env_for(&tmp);
        let first = clean(&env).unwrap();
        assert_eq!(first.len(), 1);

        let second = clean(&env).unwrap();
        assert!(second.is_empty());
    }
}
