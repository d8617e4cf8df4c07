//! # Directory Enumeration
//!
//! Lists fixture candidates in a directory. The listing is not recursive and
//! keeps the filesystem's own order; callers must not assume it is sorted.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ValidationError;

/// Substring a file name must contain to be treated as a fixture.
pub const FIXTURE_MARKER: &str = "json";

/// A directory entry selected for validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// File name, lossily converted to UTF-8.
    pub name: String,
    /// Full path to the entry.
    pub path: PathBuf,
}

/// Returns the entries of `dir` whose name contains `marker`, in listing
/// order.
///
/// Entries that resolve to directories are skipped. Symlinks are followed,
/// so a dangling link is still returned and fails when read.
///
/// # Errors
///
/// [`ValidationError::DirectoryRead`] if `dir` is missing, unreadable, or
/// not a directory.
pub fn list_candidates(dir: &Path, marker: &str) -> Result<Vec<Candidate>, ValidationError> {
    let directory_error = |source| ValidationError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    };

    let mut candidates = Vec::new();
    for entry in fs::read_dir(dir).map_err(directory_error)? {
        let entry = entry.map_err(directory_error)?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.contains(marker) {
            continue;
        }
        let path = entry.path();
        if path.is_dir() {
            tracing::debug!(path = %path.display(), "skipping directory");
            continue;
        }
        candidates.push(Candidate { name, path });
    }
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn names(candidates: &[Candidate]) -> Vec<&str> {
        let mut names: Vec<&str> = candidates.iter().map(|c| c.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    #[test]
    fn keeps_only_marked_names() {
        let dir = TempDir::new().unwrap();
        for name in ["a.json", "notes.txt", "b.jsonl", "README"] {
            fs::write(dir.path().join(name), "{}").unwrap();
        }
        let found = list_candidates(dir.path(), FIXTURE_MARKER).unwrap();
        assert_eq!(names(&found), vec!["a.json", "b.jsonl"]);
        assert!(found.iter().all(|c| c.path.starts_with(dir.path())));
    }

    #[test]
    fn skips_directories_named_like_fixtures() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("nested.json")).unwrap();
        fs::write(dir.path().join("real.json"), "{}").unwrap();
        let found = list_candidates(dir.path(), FIXTURE_MARKER).unwrap();
        assert_eq!(names(&found), vec!["real.json"]);
    }

    #[cfg(unix)]
    #[test]
    fn keeps_dangling_symlink() {
        let dir = TempDir::new().unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("link.json")).unwrap();
        let found = list_candidates(dir.path(), FIXTURE_MARKER).unwrap();
        assert_eq!(names(&found), vec!["link.json"]);
    }

    #[test]
    fn missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent");
        let err = list_candidates(&missing, FIXTURE_MARKER).unwrap_err();
        assert!(matches!(&err, ValidationError::DirectoryRead { path, .. } if path == &missing));
    }

    #[test]
    fn file_instead_of_directory_fails() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("x.json");
        fs::write(&file, "{}").unwrap();
        assert!(matches!(
            list_candidates(&file, FIXTURE_MARKER),
            Err(ValidationError::DirectoryRead { .. })
        ));
    }

    #[test]
    fn listing_order_matches_read_dir() {
        let dir = TempDir::new().unwrap();
        for i in 0..8 {
            fs::write(dir.path().join(format!("f{i}.json")), "{}").unwrap();
        }
        let expected: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        let found: Vec<String> = list_candidates(dir.path(), FIXTURE_MARKER)
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(found, expected);
    }
}
