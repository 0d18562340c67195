//! The external-processor boundary.
//!
//! The actual PDF processing — parsing, text extraction, analysis — lives
//! outside this crate. The runner only needs one operation from it:
//! "process one file path into a result, or tell me you couldn't".
//! [`PdfProcessor`] pins that contract down and nothing more, so any
//! extraction backend can be injected via
//! [`crate::config::RunConfigBuilder::processor`].
//!
//! The result payload is an opaque [`serde_json::Value`]. The runner never
//! looks inside it beyond "is it a JSON object, and what are its keys"
//! (for diagnostic logging); imposing a schema here would couple the
//! runner to one particular backend.
//!
//! # The three outcomes
//!
//! | Return value       | Meaning                                        |
//! |--------------------|------------------------------------------------|
//! | `Ok(Some(value))`  | Processed; `value` is the extracted document   |
//! | `Ok(None)`         | Could not process (e.g. no text in the file)   |
//! | `Err(e)`           | Processing blew up (malformed input, I/O, …)   |
//!
//! Both `Ok(None)` and `Err(_)` are folded into a per-file failure by the
//! runner; neither stops the batch.

use chrono::Utc;
use serde_json::{json, Value};
use std::io::Read;
use std::path::Path;

/// Boxed error type processors may return.
///
/// Errors are only ever surfaced as human-readable text in logs and in
/// the run summary, so a trait object is all the structure needed.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// One-file entry point of an external PDF processor.
///
/// Implementations must be `Send + Sync`; the runner itself is strictly
/// sequential, but configs holding an `Arc<dyn PdfProcessor>` may be
/// shared across threads by the embedding application.
pub trait PdfProcessor: Send + Sync {
    /// Process a single PDF file.
    ///
    /// See the module docs for the meaning of the three outcomes.
    fn process_pdf(&self, path: &Path) -> Result<Option<Value>, BoxError>;
}

/// Any `Fn(&Path) -> Result<Option<Value>, BoxError>` is a processor.
///
/// This is the injection point tests use:
///
/// ```rust
/// use pdfbatch::{BoxError, PdfProcessor, RunConfig};
/// use serde_json::{json, Value};
/// use std::sync::Arc;
///
/// let processor = |_path: &std::path::Path| -> Result<Option<Value>, BoxError> {
///     Ok(Some(json!({"pages": 3})))
/// };
/// let config = RunConfig::builder("input")
///     .processor(Arc::new(processor))
///     .build()
///     .unwrap();
/// # let _ = config;
/// ```
impl<F> PdfProcessor for F
where
    F: Fn(&Path) -> Result<Option<Value>, BoxError> + Send + Sync,
{
    fn process_pdf(&self, path: &Path) -> Result<Option<Value>, BoxError> {
        self(path)
    }
}

/// Built-in fallback processor used when no processor is injected.
///
/// Does a shallow scan that needs no PDF parser: validates the `%PDF`
/// magic bytes, reads the declared PDF version out of the header line,
/// and records file name, size, and a processing timestamp. Deployments
/// that want real content extraction inject their own [`PdfProcessor`];
/// this one exists so the CLI does something useful out of the box.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeaderScan;

impl PdfProcessor for HeaderScan {
    fn process_pdf(&self, path: &Path) -> Result<Option<Value>, BoxError> {
        let mut file = std::fs::File::open(path)?;

        // "%PDF-1.7" plus slack; the header must sit at byte 0.
        let mut header = [0u8; 16];
        let read = file.read(&mut header)?;
        if read < 5 || &header[..5] != b"%PDF-" {
            let magic: Vec<u8> = header[..read.min(4)].to_vec();
            return Err(format!("not a PDF file (first bytes: {magic:?})").into());
        }

        let version: String = header[5..read]
            .iter()
            .take_while(|b| b.is_ascii_digit() || **b == b'.')
            .map(|&b| b as char)
            .collect();
        if version.is_empty() {
            return Ok(None);
        }

        let size_bytes = file.metadata()?.len();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Some(json!({
            "file_name": file_name,
            "file_path": path.to_string_lossy(),
            "pdf_version": version,
            "size_bytes": size_bytes,
            "processing_info": {
                "processed_at": Utc::now().to_rfc3339(),
                "processing_method": "header_scan",
            },
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(bytes).unwrap();
        path
    }

    #[test]
    fn header_scan_reads_version_and_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "doc.pdf", b"%PDF-1.7\n1 0 obj\nendobj\n");

        let result = HeaderScan.process_pdf(&path).unwrap().unwrap();
        assert_eq!(result["file_name"], "doc.pdf");
        assert_eq!(result["pdf_version"], "1.7");
        assert_eq!(result["size_bytes"], 24);
        assert_eq!(
            result["processing_info"]["processing_method"],
            "header_scan"
        );
    }

    #[test]
    fn header_scan_rejects_non_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "notes.pdf", b"hello world, definitely not a pdf");

        let err = HeaderScan.process_pdf(&path).unwrap_err();
        assert!(err.to_string().contains("not a PDF"));
    }

    #[test]
    fn header_scan_rejects_truncated_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "tiny.pdf", b"%P");

        assert!(HeaderScan.process_pdf(&path).is_err());
    }

    #[test]
    fn header_scan_returns_none_for_versionless_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "odd.pdf", b"%PDF-xyz rest of file");

        assert!(HeaderScan.process_pdf(&path).unwrap().is_none());
    }

    #[test]
    fn header_scan_errors_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ghost.pdf");

        assert!(HeaderScan.process_pdf(&path).is_err());
    }

    #[test]
    fn closures_are_processors() {
        let processor = |_: &Path| -> Result<Option<Value>, BoxError> { Ok(Some(json!({"pages": 1}))) };
        let out = processor
            .process_pdf(Path::new("whatever.pdf"))
            .unwrap()
            .unwrap();
        assert_eq!(out["pages"], 1);
    }
}
