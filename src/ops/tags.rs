//! Tag-index action: a cross-reference file for editor navigation.
//!
//! Collects the taggable sources across the tree (skipping the ignore
//! patterns), and regenerates a single `TAGS` file when an input is
//! newer than the existing index. An empty taggable set registers no
//! action at all.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::SystemTime;

use anyhow::{Context, Result};
use regex::Regex;
use walkdir::WalkDir;

use crate::core::environment::Environment;
use crate::core::patterns::SOURCE_EXTENSIONS;
use crate::util::fs::relative_path;

/// Name of the generated index file at the package root.
pub const TAGS_FILE: &str = "TAGS";

static PY_DEF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:def|class)\s+([A-Za-z_][A-Za-z0-9_]*)").unwrap()
});

static C_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:class|struct|enum)\s+([A-Za-z_][A-Za-z0-9_]*)").unwrap()
});

// Function definitions: a name followed by an argument list on a line
// that is not a declaration (no trailing semicolon).
static C_FUNC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_:<>,*&\s]*?\b([A-Za-z_][A-Za-z0-9_]*)\s*\([^;]*$").unwrap()
});

/// Result of a tag-index run.
#[derive(Debug, PartialEq, Eq)]
pub enum TagIndexOutcome {
    /// No taggable files anywhere; no index is registered or written.
    NoTaggableFiles,

    /// The index is newer than every input; nothing to do.
    Fresh,

    /// The index was rewritten.
    Regenerated { files: usize, symbols: usize },
}

/// Regenerate the index if any taggable input changed.
pub fn update_tag_index(env: &Environment) -> Result<TagIndexOutcome> {
    let inputs = collect_taggable(env);

    if inputs.is_empty() {
        tracing::debug!("no taggable files, skipping tag index");
        return Ok(TagIndexOutcome::NoTaggableFiles);
    }

    let tags_path = env.root().join(TAGS_FILE);
    if is_fresh(&tags_path, &inputs) {
        return Ok(TagIndexOutcome::Fresh);
    }

    let mut records: Vec<String> = Vec::new();
    for input in &inputs {
        let rel = relative_path(env.root(), input);
        let contents = fs::read_to_string(input)
            .with_context(|| format!("failed to read {}", input.display()))?;

        for (lineno, line) in contents.lines().enumerate() {
            if let Some(symbol) = extract_symbol(input, line) {
                records.push(format!("{}\t{}\t{}", symbol, rel.display(), lineno + 1));
            }
        }
    }
    records.sort();
    records.dedup();

    let symbols = records.len();
    let mut body = records.join("\n");
    body.push('\n');
    crate::util::fs::write_string(&tags_path, &body)?;

    eprintln!(
        "   Reindexed {} symbol(s) from {} file(s)",
        symbols,
        inputs.len()
    );

    Ok(TagIndexOutcome::Regenerated {
        files: inputs.len(),
        symbols,
    })
}

/// Collect taggable source files, skipping ignored names.
pub fn collect_taggable(env: &Environment) -> Vec<PathBuf> {
    let ignore = env.ignore_patterns();

    let mut files: Vec<PathBuf> = WalkDir::new(env.root())
        .into_iter()
        .filter_entry(|e| {
            e.file_name()
                .to_str()
                .map(|name| !ignore.matches_name(name))
                .unwrap_or(true)
        })
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| SOURCE_EXTENSIONS.contains(&ext))
                .unwrap_or(false)
        })
        .map(|e| e.into_path())
        .collect();

    files.sort();
    files
}

fn is_fresh(tags_path: &Path, inputs: &[PathBuf]) -> bool {
    let tags_mtime = match fs::metadata(tags_path).and_then(|m| m.modified()) {
        Ok(t) => t,
        Err(_) => return false,
    };

    let newest_input = inputs
        .iter()
        .filter_map(|p| fs::metadata(p).and_then(|m| m.modified()).ok())
        .max()
        .unwrap_or(SystemTime::UNIX_EPOCH);

    tags_mtime >= newest_input
}

fn extract_symbol(path: &Path, line: &str) -> Option<String> {
    let ext = path.extension()?.to_str()?;

    if ext == "py" {
        return PY_DEF
            .captures(line)
            .map(|c| c[1].to_string());
    }

    if let Some(c) = C_TYPE.captures(line) {
        return Some(c[1].to_string());
    }
    C_FUNC
        .captures(line)
        .map(|c| c[1].to_string())
        .filter(|s| !is_keyword(s))
}

fn is_keyword(symbol: &str) -> bool {
    matches!(
        symbol,
        "if" | "else" | "while" | "for" | "switch" | "return" | "sizeof" | "catch"
    )
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
    fn test_empty_tree_registers_nothing() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("README.md"), "# utils").unwrap();

        let env = env_for(&tmp);
        let outcome = update_tag_index(&env).unwrap();

        assert_eq!(outcome, TagIndexOutcome::NoTaggableFiles);
        assert!(!tmp.path().join(TAGS_FILE).exists());
    }

    #[test]
    fn test_index_contains_symbols() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("python/utils")).unwrap();
        std::fs::write(
            tmp.path().join("python/utils/timer.py"),
            "class Timer:\n    def elapsed(self):\n        pass\n",
        )
        .unwrap();
        std::fs::create_dir_all(tmp.path().join("lib")).unwrap();
        std::fs::write(
            tmp.path().join("lib/regex.cc"),
            "int matchAll(const std::string& s)\n{\n    return 0;\n}\n",
        )
        .unwrap();

        let env = env_for(&tmp);
        let outcome = update_tag_index(&env).unwrap();

        match outcome {
            TagIndexOutcome::Regenerated { files, symbols } => {
                assert_eq!(files, 2);
                assert!(symbols >= 3);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }

        let tags = std::fs::read_to_string(tmp.path().join(TAGS_FILE)).unwrap();
        assert!(tags.contains("Timer\tpython/utils/timer.py\t1"));
        assert!(tags.contains("elapsed\tpython/utils/timer.py\t2"));
        assert!(tags.contains("matchAll\tlib/regex.cc\t1"));
    }

    #[test]
    fn test_fresh_index_is_noop() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("module.py"), "def f():\n    pass\n").unwrap();

        let env = env_for(&tmp);
        assert!(matches!(
            update_tag_index(&env).unwrap(),
            TagIndexOutcome::Regenerated { .. }
        ));
        assert_eq!(update_tag_index(&env).unwrap(), TagIndexOutcome::Fresh);
    }

    #[test]
    fn test_ignored_files_not_collected() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join(".svn")).unwrap();
        std::fs::write(tmp.path().join(".svn/entries.py"), "def hidden(): pass\n").unwrap();
        std::fs::write(tmp.path().join("module.py~"), "def backup(): pass\n").unwrap();
        std::fs::write(tmp.path().join("module.py"), "def visible(): pass\n").unwrap();

        let env = env_for(&tmp);
        let files = collect_taggable(&env);

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("module.py"));
    }

    #[test]
    fn test_declarations_not_tagged() {
        assert_eq!(
            extract_symbol(Path::new("x.h"), "int matchAll(const char* s);"),
            None
        );
        assert_eq!(
            extract_symbol(Path::new("x.cc"), "int matchAll(const char* s)"),
            Some("matchAll".to_string())
        );
        assert_eq!(
            extract_symbol(Path::new("x.hpp"), "class RegexWrapper {"),
            Some("RegexWrapper".to_string())
        );
    }
}
