//! Architectural Enforcement
//!
//! Source-scanning helpers for the workspace rules checked under `tests/`:
//! - The core crate stays headless (no terminal crates, no console output)
//! - No blocking sleeps; the animator waits on deadlines only
//! - The animation path performs no I/O
//!
//! Production code is everything in a file before its `#[cfg(test)]`
//! module. Comment lines are ignored.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Workspace root, two levels above this crate
#[must_use]
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
}

/// Every `.rs` file under `dir`, sorted
#[must_use]
pub fn rust_sources(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("rs"))
        .map(walkdir::DirEntry::into_path)
        .collect();
    files.sort();
    files
}

/// A rule broken on one line
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    /// File, relative to the workspace root where possible
    pub path: PathBuf,
    /// 1-based line number
    pub line: usize,
    /// The offending line, trimmed
    pub text: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} - {}", self.path.display(), self.line, self.text)
    }
}

/// Code part of a line, without any trailing `//` comment
#[must_use]
pub fn code_part(line: &str) -> &str {
    line.split("//").next().unwrap_or(line)
}

/// Lines of `content` that belong to production code
///
/// Stops at the first `#[cfg(test)]`.
#[must_use]
pub fn production_lines(content: &str) -> Vec<(usize, &str)> {
    content
        .lines()
        .enumerate()
        .take_while(|(_, line)| line.trim() != "#[cfg(test)]")
        .filter(|(_, line)| !line.trim_start().starts_with("//"))
        .map(|(idx, line)| (idx + 1, line))
        .collect()
}

/// Production lines in `files` whose code part contains any of `patterns`
#[must_use]
pub fn find_patterns(files: &[PathBuf], patterns: &[&str]) -> Vec<Violation> {
    let root = workspace_root();
    let mut violations = Vec::new();

    for path in files {
        let Ok(content) = fs::read_to_string(path) else {
            continue;
        };
        for (line, text) in production_lines(&content) {
            let code = code_part(text);
            if patterns.iter().any(|p| code.contains(p)) {
                violations.push(Violation {
                    path: path.strip_prefix(&root).unwrap_or(path).to_path_buf(),
                    line,
                    text: text.trim().to_string(),
                });
            }
        }
    }

    violations
}

/// Print `violations` under `title` and panic if there are any
pub fn report(title: &str, violations: &[Violation]) {
    if violations.is_empty() {
        return;
    }

    eprintln!("\n❌ {title}\n");
    for violation in violations {
        eprintln!("  ❌ {violation}");
    }
    panic!("\nFound {} violation(s): {title}", violations.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_lines_stop_at_test_module() {
        let content = "fn a() {}\n// sleep(1)\nfn b() {}\n#[cfg(test)]\nmod tests {}\n";
        let lines: Vec<usize> = production_lines(content).iter().map(|(n, _)| *n).collect();
        assert_eq!(lines, vec![1, 3]);
    }

    #[test]
    fn test_code_part_drops_trailing_comment() {
        assert_eq!(code_part("let x = 1; // sleep(2)"), "let x = 1; ");
    }

    #[test]
    fn test_workspace_root_has_core() {
        assert!(workspace_root().join("core").join("Cargo.toml").exists());
    }
}
