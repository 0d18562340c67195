//! Error types for the pdfbatch library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`RunError`] — **Fatal**: the run cannot proceed at all (input
//!   directory missing, consolidated output file unwritable, invalid
//!   configuration). Returned as `Err(RunError)` from [`crate::run::run`].
//!
//! * [`FileError`] — **Non-fatal**: a single input file failed (the
//!   processor errored, returned nothing, or its artifact could not be
//!   written) but every other file is still attempted. Stored inside
//!   [`crate::summary::FileOutcome`] so callers can inspect partial
//!   success rather than losing the whole batch to one bad PDF.
//!
//! There are no retries at either tier: a failed file is terminal for
//! that run, and a fatal error ends the run with whatever summary exists.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the pdfbatch library.
///
/// Per-file failures use [`FileError`] and are stored in
/// [`crate::summary::FileOutcome`] rather than propagated here.
#[derive(Debug, Error)]
pub enum RunError {
    /// The configured input directory does not exist.
    #[error("Input directory not found: '{path}'\nCheck the path exists and is readable.")]
    InputDirNotFound { path: PathBuf },

    /// The configured input path exists but is not a directory.
    #[error("Input path is not a directory: '{path}'")]
    NotADirectory { path: PathBuf },

    /// Listing the input directory failed (bad glob, unreadable dir).
    #[error("Failed to list PDF files under '{path}': {detail}")]
    DiscoveryFailed { path: PathBuf, detail: String },

    /// Could not create or write a run-level output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// A non-fatal error for a single input file.
///
/// Stored in [`crate::summary::FileOutcome`] when a file fails.
/// The run continues with the next file regardless.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum FileError {
    /// The processor returned an error for this file.
    #[error("Error processing {file}: {detail}")]
    ProcessorFailed { file: String, detail: String },

    /// The processor returned no result ("could not process").
    #[error("Failed to process: {file} (processor returned no result)")]
    EmptyResult { file: String },

    /// The result was produced but its JSON artifact could not be written.
    #[error("Failed to write artifact for {file}: {detail}")]
    ArtifactWriteFailed { file: String, detail: String },
}

impl FileError {
    /// The name of the input file this failure belongs to.
    pub fn file(&self) -> &str {
        match self {
            FileError::ProcessorFailed { file, .. }
            | FileError::EmptyResult { file }
            | FileError::ArtifactWriteFailed { file, .. } => file,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_dir_not_found_display() {
        let e = RunError::InputDirNotFound {
            path: PathBuf::from("/no/such/dir"),
        };
        let msg = e.to_string();
        assert!(msg.contains("/no/such/dir"), "got: {msg}");
    }

    #[test]
    fn processor_failed_display_names_file_and_cause() {
        let e = FileError::ProcessorFailed {
            file: "b.pdf".into(),
            detail: "corrupt".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("b.pdf"));
        assert!(msg.contains("corrupt"));
    }

    #[test]
    fn empty_result_display() {
        let e = FileError::EmptyResult {
            file: "scan.pdf".into(),
        };
        assert!(e.to_string().contains("scan.pdf"));
    }

    #[test]
    fn file_error_exposes_file_name() {
        let e = FileError::ArtifactWriteFailed {
            file: "a.pdf".into(),
            detail: "disk full".into(),
        };
        assert_eq!(e.file(), "a.pdf");
    }

    #[test]
    fn file_error_round_trips_through_json() {
        let e = FileError::ProcessorFailed {
            file: "x.pdf".into(),
            detail: "bad xref".into(),
        };
        let json = serde_json::to_string(&e).unwrap();
        let back: FileError = serde_json::from_str(&json).unwrap();
        assert_eq!(back.file(), "x.pdf");
    }
}
