//! The batch run: discover → process each file → persist → summarise.
//!
//! The loop is strictly sequential and never aborts on a per-file
//! failure: every failure is folded into the [`RunSummary`] and the next
//! file is attempted. Only run-level problems (input directory missing,
//! consolidated output unwritable) surface as `Err`.

use crate::config::{OutputMode, RunConfig};
use crate::discover::{discover, InputFile};
use crate::error::{FileError, RunError};
use crate::processor::{HeaderScan, PdfProcessor};
use crate::summary::RunSummary;
use chrono::Utc;
use serde_json::{json, Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Run one batch over the configured input directory.
///
/// # Returns
/// `Ok(RunSummary)` on completion, even when every file failed — check
/// `summary.failed`. A directory with no matching files yields an empty
/// summary, not an error.
///
/// # Errors
/// Returns `Err(RunError)` only for run-level problems:
/// - input directory missing or not a directory
/// - discovery itself failed
/// - the consolidated output file could not be written
pub fn run(config: &RunConfig) -> Result<RunSummary, RunError> {
    let start = Instant::now();
    info!("Starting batch run over {}", config.input_dir.display());

    let files = discover(&config.input_dir, config.recursive)?;
    info!("Found {} PDF files", files.len());

    let mut summary = RunSummary {
        discovered: files.len(),
        ..Default::default()
    };

    if let Some(ref cb) = config.progress {
        cb.on_run_start(files.len());
    }

    let processor: Arc<dyn PdfProcessor> = config
        .processor
        .clone()
        .unwrap_or_else(|| Arc::new(HeaderScan));

    // Create the artifact directory before the loop so the first write
    // cannot race a missing parent.
    if let OutputMode::Artifacts(ref dir) = config.output {
        std::fs::create_dir_all(dir).map_err(|e| RunError::OutputWriteFailed {
            path: dir.clone(),
            source: e,
        })?;
    }

    // Successful results keyed by stem, only filled in consolidated mode.
    let mut documents = Map::new();

    let total = files.len();
    for (i, file) in files.iter().enumerate() {
        let num = i + 1;
        if let Some(ref cb) = config.progress {
            cb.on_file_start(num, total, &file.path);
        }
        info!("Processing: {}", file.name());

        match processor.process_pdf(&file.path) {
            Ok(Some(result)) => {
                process_success(config, file, result, &mut documents, &mut summary, num, total);
            }
            Ok(None) => {
                let err = FileError::EmptyResult { file: file.name() };
                fail_file(config, file, err, &mut summary, num, total);
            }
            Err(e) => {
                let err = FileError::ProcessorFailed {
                    file: file.name(),
                    detail: e.to_string(),
                };
                fail_file(config, file, err, &mut summary, num, total);
            }
        }
    }

    if let OutputMode::Consolidated(ref path) = config.output {
        write_consolidated(path, config, &summary, documents)?;
        summary.artifacts.push(path.clone());
        info!("Wrote consolidated results to {}", path.display());
    }

    summary.duration_ms = start.elapsed().as_millis() as u64;
    info!(
        "Run complete: {}/{} files processed, {} failed, {}ms",
        summary.processed, summary.discovered, summary.failed, summary.duration_ms
    );
    if let Some(ref cb) = config.progress {
        cb.on_run_complete(summary.discovered, summary.processed);
    }

    Ok(summary)
}

/// Handle a file the processor succeeded on: persist per the output mode
/// and record the outcome. An artifact write failure demotes the file to
/// a failure.
fn process_success(
    config: &RunConfig,
    file: &InputFile,
    result: Value,
    documents: &mut Map<String, Value>,
    summary: &mut RunSummary,
    num: usize,
    total: usize,
) {
    // The payload is opaque; the key set is the only thing worth logging.
    if let Some(map) = result.as_object() {
        debug!(
            "{}: result keys: {:?}",
            file.name(),
            map.keys().collect::<Vec<_>>()
        );
    }

    let artifact = match config.output {
        OutputMode::Report => None,
        OutputMode::Consolidated(_) => {
            // Later files win on stem collisions (possible in recursive
            // runs); the per-file list still records every occurrence.
            documents.insert(file.stem.clone(), result);
            None
        }
        OutputMode::Artifacts(ref dir) => {
            let path = dir.join(format!("{}_processed.json", file.stem));
            match write_json(&path, &result) {
                Ok(()) => {
                    info!("Saved: {}", path.display());
                    Some(path)
                }
                Err(e) => {
                    let err = FileError::ArtifactWriteFailed {
                        file: file.name(),
                        detail: e.to_string(),
                    };
                    fail_file(config, file, err, summary, num, total);
                    return;
                }
            }
        }
    };

    if let Some(ref cb) = config.progress {
        cb.on_file_complete(num, total, &file.path, artifact.as_deref());
    }
    summary.record_success(file.path.clone(), file.stem.clone(), artifact);
}

/// Record a per-file failure and keep going.
fn fail_file(
    config: &RunConfig,
    file: &InputFile,
    error: FileError,
    summary: &mut RunSummary,
    num: usize,
    total: usize,
) {
    warn!("{}", error);
    if let Some(ref cb) = config.progress {
        cb.on_file_error(num, total, &file.path, &error.to_string());
    }
    summary.record_failure(file.path.clone(), file.stem.clone(), error);
}

/// Assemble and write the single consolidated results document.
fn write_consolidated(
    path: &Path,
    config: &RunConfig,
    summary: &RunSummary,
    documents: Map<String, Value>,
) -> Result<(), RunError> {
    let doc = json!({
        "generated_at": Utc::now().to_rfc3339(),
        "source_dir": config.input_dir.display().to_string(),
        "recursive": config.recursive,
        "summary": {
            "discovered": summary.discovered,
            "processed": summary.processed,
            "failed": summary.failed,
        },
        "documents": Value::Object(documents),
    });

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| RunError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
    }
    write_json(path, &doc).map_err(|e| RunError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Pretty-printed (2-space) UTF-8 JSON, written atomically via a temp
/// file and rename so an interrupted run never leaves a half-written
/// document. Overwrites any existing file of the same name.
fn write_json(path: &Path, value: &Value) -> std::io::Result<()> {
    let bytes = serde_json::to_vec_pretty(value)?;
    let tmp = tmp_path(path);
    std::fs::write(&tmp, bytes)?;
    std::fs::rename(&tmp, path)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tmp_path_appends_suffix() {
        assert_eq!(
            tmp_path(Path::new("/out/a_processed.json")),
            PathBuf::from("/out/a_processed.json.tmp")
        );
    }

    #[test]
    fn write_json_is_pretty_printed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        write_json(&path, &json!({"pages": 3})).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "{\n  \"pages\": 3\n}");
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn write_json_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        write_json(&path, &json!({"v": 1})).unwrap();
        write_json(&path, &json!({"v": 2})).unwrap();

        let value: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["v"], 2);
    }
}
