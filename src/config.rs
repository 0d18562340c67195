//! Configuration for a batch run.
//!
//! Everything a run needs is resolved once, up front, into a [`RunConfig`]
//! and passed explicitly to [`crate::run::run`] — there is no ambient
//! process-wide state. Built via [`RunConfigBuilder`] so callers set only
//! the knobs they care about.

use crate::error::RunError;
use crate::processor::PdfProcessor;
use crate::progress::ProgressCallback;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Where the results of a run go.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Log and tally only; nothing is written to disk.
    #[default]
    Report,
    /// One `<stem>_processed.json` artifact per successful file, written
    /// into the given directory (created if absent).
    Artifacts(PathBuf),
    /// One JSON document collecting every successful result, written to
    /// the given file at the end of the run.
    Consolidated(PathBuf),
}

/// Configuration for one batch run.
///
/// # Example
/// ```rust
/// use pdfbatch::{OutputMode, RunConfig};
///
/// let config = RunConfig::builder("base")
///     .recursive(true)
///     .output(OutputMode::Artifacts("uploads".into()))
///     .build()
///     .unwrap();
/// # let _ = config;
/// ```
#[derive(Clone)]
pub struct RunConfig {
    /// Directory holding the input PDFs.
    pub input_dir: PathBuf,

    /// Search subdirectories too. Default: false (top-level glob only).
    pub recursive: bool,

    /// Result destination. Default: [`OutputMode::Report`].
    pub output: OutputMode,

    /// Injected processor. When `None` the built-in
    /// [`crate::processor::HeaderScan`] is used.
    pub processor: Option<Arc<dyn PdfProcessor>>,

    /// Optional per-file progress observer.
    pub progress: Option<ProgressCallback>,
}

impl fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunConfig")
            .field("input_dir", &self.input_dir)
            .field("recursive", &self.recursive)
            .field("output", &self.output)
            .field("processor", &self.processor.as_ref().map(|_| "<dyn PdfProcessor>"))
            .field("progress", &self.progress.as_ref().map(|_| "<dyn RunProgressCallback>"))
            .finish()
    }
}

impl RunConfig {
    /// Create a new builder rooted at the given input directory.
    pub fn builder(input_dir: impl Into<PathBuf>) -> RunConfigBuilder {
        RunConfigBuilder {
            config: RunConfig {
                input_dir: input_dir.into(),
                recursive: false,
                output: OutputMode::default(),
                processor: None,
                progress: None,
            },
        }
    }
}

/// Builder for [`RunConfig`].
pub struct RunConfigBuilder {
    config: RunConfig,
}

impl RunConfigBuilder {
    pub fn recursive(mut self, v: bool) -> Self {
        self.config.recursive = v;
        self
    }

    pub fn output(mut self, mode: OutputMode) -> Self {
        self.config.output = mode;
        self
    }

    pub fn processor(mut self, processor: Arc<dyn PdfProcessor>) -> Self {
        self.config.processor = Some(processor);
        self
    }

    pub fn progress(mut self, callback: ProgressCallback) -> Self {
        self.config.progress = Some(callback);
        self
    }

    /// Build the configuration, validating constraints.
    ///
    /// Existence of `input_dir` is checked at run time, not here, so a
    /// config can be built before the directory does.
    pub fn build(self) -> Result<RunConfig, RunError> {
        let c = &self.config;
        if c.input_dir.as_os_str().is_empty() {
            return Err(RunError::InvalidConfig("input_dir must not be empty".into()));
        }
        match &c.output {
            OutputMode::Artifacts(dir) if dir.as_os_str().is_empty() => {
                return Err(RunError::InvalidConfig(
                    "artifact directory must not be empty".into(),
                ));
            }
            OutputMode::Consolidated(path) if path.as_os_str().is_empty() => {
                return Err(RunError::InvalidConfig(
                    "consolidated output path must not be empty".into(),
                ));
            }
            _ => {}
        }
        Ok(self.config)
    }
}
