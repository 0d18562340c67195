//! Run outcomes: per-file results and the aggregate summary.
//!
//! A [`RunSummary`] is built incrementally as the runner works through the
//! batch and returned when the run ends. It is the whole observable
//! product of a non-persisting run, and serializable so the CLI can dump
//! it as JSON.

use crate::error::FileError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What happened to one input file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// The processor produced a result.
    Processed {
        /// JSON artifact written for this file, if the run persists
        /// per-file artifacts.
        artifact: Option<PathBuf>,
    },
    /// The file failed; the error says how.
    Failed { error: FileError },
}

/// One entry per discovered file, in processing order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub stem: String,
    #[serde(flatten)]
    pub status: OutcomeStatus,
}

impl FileOutcome {
    pub fn is_processed(&self) -> bool {
        matches!(self.status, OutcomeStatus::Processed { .. })
    }
}

/// Aggregate counts and artifact list for one run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    /// Files matched by discovery.
    pub discovered: usize,
    /// Files the processor handled successfully.
    pub processed: usize,
    /// Files that failed (processor error, absent result, or artifact
    /// write failure). `processed + failed == discovered` once the run
    /// has completed.
    pub failed: usize,
    /// Every artifact written during the run, in write order.
    pub artifacts: Vec<PathBuf>,
    /// Per-file detail, in processing order.
    pub files: Vec<FileOutcome>,
    /// Wall-clock duration of the whole run.
    pub duration_ms: u64,
}

impl RunSummary {
    /// Record a successful file, with its artifact path when one was written.
    pub(crate) fn record_success(
        &mut self,
        path: PathBuf,
        stem: String,
        artifact: Option<PathBuf>,
    ) {
        self.processed += 1;
        if let Some(ref a) = artifact {
            self.artifacts.push(a.clone());
        }
        self.files.push(FileOutcome {
            path,
            stem,
            status: OutcomeStatus::Processed { artifact },
        });
    }

    /// Record a failed file.
    pub(crate) fn record_failure(&mut self, path: PathBuf, stem: String, error: FileError) {
        self.failed += 1;
        self.files.push(FileOutcome {
            path,
            stem,
            status: OutcomeStatus::Failed { error },
        });
    }

    /// The failures of this run, in processing order.
    pub fn failures(&self) -> impl Iterator<Item = &FileError> {
        self.files.iter().filter_map(|f| match &f.status {
            OutcomeStatus::Failed { error } => Some(error),
            OutcomeStatus::Processed { .. } => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_track_recorded_outcomes() {
        let mut s = RunSummary {
            discovered: 3,
            ..Default::default()
        };
        s.record_success(
            PathBuf::from("a.pdf"),
            "a".into(),
            Some(PathBuf::from("a_processed.json")),
        );
        s.record_success(PathBuf::from("c.pdf"), "c".into(), None);
        s.record_failure(
            PathBuf::from("b.pdf"),
            "b".into(),
            FileError::EmptyResult { file: "b.pdf".into() },
        );

        assert_eq!(s.processed, 2);
        assert_eq!(s.failed, 1);
        assert_eq!(s.processed + s.failed, s.discovered);
        assert_eq!(s.artifacts, vec![PathBuf::from("a_processed.json")]);
        assert_eq!(s.failures().count(), 1);
    }

    #[test]
    fn summary_serializes_with_tagged_outcomes() {
        let mut s = RunSummary {
            discovered: 1,
            ..Default::default()
        };
        s.record_failure(
            PathBuf::from("b.pdf"),
            "b".into(),
            FileError::ProcessorFailed {
                file: "b.pdf".into(),
                detail: "corrupt".into(),
            },
        );

        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["failed"], 1);
        assert_eq!(json["files"][0]["status"], "failed");
        assert_eq!(
            json["files"][0]["error"]["ProcessorFailed"]["detail"],
            "corrupt"
        );
    }

    #[test]
    fn empty_summary_is_all_zeroes() {
        let s = RunSummary::default();
        assert_eq!(s.discovered, 0);
        assert_eq!(s.processed, 0);
        assert_eq!(s.failed, 0);
        assert!(s.artifacts.is_empty());
    }
}
