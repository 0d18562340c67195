//! Input discovery: turn a directory into a list of candidate PDFs.
//!
//! Two traversal modes, matching the two shapes of batch run:
//!
//! * flat — `glob` over `<dir>/*.pdf`, top-level files only;
//! * recursive — `walkdir` over the whole tree, keeping `.pdf` files at
//!   any depth.
//!
//! Files come back in whatever order the underlying traversal yields.
//! No sorting is applied; callers that need a deterministic order must
//! impose it themselves.

use crate::error::RunError;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// A candidate input file, discovered at run start and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    /// Full path to the PDF.
    pub path: PathBuf,
    /// Base name without the `.pdf` extension; artifact names derive
    /// from this (`<stem>_processed.json`).
    pub stem: String,
}

impl InputFile {
    fn new(path: PathBuf) -> Self {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, stem }
    }

    /// File name including extension, for log lines.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// List the PDF files under `dir`.
///
/// # Errors
///
/// * [`RunError::InputDirNotFound`] — `dir` does not exist.
/// * [`RunError::NotADirectory`] — `dir` exists but is not a directory.
/// * [`RunError::DiscoveryFailed`] — the traversal itself failed.
pub fn discover(dir: &Path, recursive: bool) -> Result<Vec<InputFile>, RunError> {
    if !dir.exists() {
        return Err(RunError::InputDirNotFound {
            path: dir.to_path_buf(),
        });
    }
    if !dir.is_dir() {
        return Err(RunError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let files = if recursive {
        discover_recursive(dir)?
    } else {
        discover_flat(dir)?
    };

    debug!("Discovered {} PDF files under {}", files.len(), dir.display());
    Ok(files)
}

/// Top-level `*.pdf` glob, like the non-recursive scripts.
fn discover_flat(dir: &Path) -> Result<Vec<InputFile>, RunError> {
    let pattern = dir.join("*.pdf");
    let pattern = pattern.to_string_lossy();

    let paths = glob::glob(&pattern).map_err(|e| RunError::DiscoveryFailed {
        path: dir.to_path_buf(),
        detail: e.to_string(),
    })?;

    let mut files = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) if path.is_file() => files.push(InputFile::new(path)),
            Ok(_) => {}
            // A single unreadable entry is not worth failing the run over.
            Err(e) => debug!("Skipping unreadable entry: {}", e),
        }
    }
    Ok(files)
}

/// Full tree walk keeping `.pdf` files at any depth.
fn discover_recursive(dir: &Path) -> Result<Vec<InputFile>, RunError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(|e| RunError::DiscoveryFailed {
            path: dir.to_path_buf(),
            detail: e.to_string(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.into_path();
        if path.extension().is_some_and(|ext| ext == "pdf") {
            files.push(InputFile::new(path));
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"%PDF-1.4\n").unwrap();
    }

    #[test]
    fn flat_discovery_sees_only_top_level_pdfs() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("a.pdf"));
        touch(&dir.path().join("b.pdf"));
        touch(&dir.path().join("notes.txt"));
        touch(&dir.path().join("nested/deep.pdf"));

        let mut stems: Vec<String> = discover(dir.path(), false)
            .unwrap()
            .into_iter()
            .map(|f| f.stem)
            .collect();
        stems.sort();
        assert_eq!(stems, vec!["a", "b"]);
    }

    #[test]
    fn recursive_discovery_sees_all_depths() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("top.pdf"));
        touch(&dir.path().join("one/mid.pdf"));
        touch(&dir.path().join("one/two/deep.pdf"));
        touch(&dir.path().join("one/two/readme.md"));

        let mut stems: Vec<String> = discover(dir.path(), true)
            .unwrap()
            .into_iter()
            .map(|f| f.stem)
            .collect();
        stems.sort();
        assert_eq!(stems, vec!["deep", "mid", "top"]);
    }

    #[test]
    fn empty_directory_discovers_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover(dir.path(), false).unwrap().is_empty());
        assert!(discover(dir.path(), true).unwrap().is_empty());
    }

    #[test]
    fn missing_directory_is_a_run_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        match discover(&missing, false) {
            Err(RunError::InputDirNotFound { path }) => assert_eq!(path, missing),
            other => panic!("expected InputDirNotFound, got {other:?}"),
        }
    }

    #[test]
    fn file_as_input_dir_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.pdf");
        touch(&file);
        assert!(matches!(
            discover(&file, false),
            Err(RunError::NotADirectory { .. })
        ));
    }

    #[test]
    fn stem_strips_only_the_extension() {
        let f = InputFile::new(PathBuf::from("/data/EN_12464-1.pdf"));
        assert_eq!(f.stem, "EN_12464-1");
        assert_eq!(f.name(), "EN_12464-1.pdf");
    }
}
