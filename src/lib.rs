//! # pdfbatch
//!
//! Batch-process a directory of PDF documents into JSON artifacts.
//!
//! ## Why this crate?
//!
//! Every team that accumulates a folder of PDFs ends up writing the same
//! throwaway script: find `*.pdf`, call some extraction routine on each
//! file, dump the result next to the input, print a tally. This crate is
//! that script done once, properly: discovery, per-file error isolation,
//! artifact persistence, and a run summary — with the actual PDF
//! processing kept behind an injectable trait so any extraction backend
//! plugs in.
//!
//! ## Run Overview
//!
//! ```text
//! directory of PDFs
//!  │
//!  ├─ 1. Discover  glob *.pdf (or walk the whole tree with --recursive)
//!  ├─ 2. Process   one file at a time, behind the PdfProcessor trait
//!  ├─ 3. Persist   <stem>_processed.json per file, or one consolidated file
//!  └─ 4. Summary   discovered / processed / failed counts + artifact list
//! ```
//!
//! A failing file never stops the batch: the failure is logged with the
//! file name and cause, counted, and the runner moves on.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdfbatch::{run, OutputMode, RunConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RunConfig::builder("base")
//!         .output(OutputMode::Artifacts("uploads".into()))
//!         .build()?;
//!     let summary = run(&config)?;
//!     println!(
//!         "processed {}/{} files ({} failed)",
//!         summary.processed, summary.discovered, summary.failed
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdfbatch` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! pdfbatch = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod discover;
pub mod error;
pub mod processor;
pub mod progress;
pub mod run;
pub mod summary;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{OutputMode, RunConfig, RunConfigBuilder};
pub use discover::{discover, InputFile};
pub use error::{FileError, RunError};
pub use processor::{BoxError, HeaderScan, PdfProcessor};
pub use progress::{NoopRunCallback, ProgressCallback, RunProgressCallback};
pub use run::run;
pub use summary::{FileOutcome, OutcomeStatus, RunSummary};
