//! Progress-callback trait for per-file run events.
//!
//! Inject an [`Arc<dyn RunProgressCallback>`] via
//! [`crate::config::RunConfigBuilder::progress`] to receive events as the
//! runner works through the discovered files.
//!
//! The callback approach is the least-invasive integration point: callers
//! can forward events to a terminal progress bar, a log file, or a web
//! UI without the library knowing anything about how the host application
//! communicates. All methods have default no-op implementations so
//! callers only override what they care about.

use std::path::Path;
use std::sync::Arc;

/// Called by the runner as it works through the batch.
///
/// The runner is strictly sequential, so callbacks are never invoked
/// concurrently; the `Send + Sync` bound exists only so the containing
/// config can be shared across threads by the host application.
pub trait RunProgressCallback: Send + Sync {
    /// Called once after discovery, before any file is processed.
    fn on_run_start(&self, discovered: usize) {
        let _ = discovered;
    }

    /// Called just before the processor is invoked for a file.
    ///
    /// `num` is 1-indexed within the run.
    fn on_file_start(&self, num: usize, total: usize, file: &Path) {
        let _ = (num, total, file);
    }

    /// Called when a file was processed successfully.
    ///
    /// `artifact` is the path of the JSON artifact written for this file,
    /// when the run is persisting per-file artifacts.
    fn on_file_complete(&self, num: usize, total: usize, file: &Path, artifact: Option<&Path>) {
        let _ = (num, total, file, artifact);
    }

    /// Called when a file failed (processor error, absent result, or
    /// artifact write failure).
    fn on_file_error(&self, num: usize, total: usize, file: &Path, error: &str) {
        let _ = (num, total, file, error);
    }

    /// Called once after every file has been attempted.
    fn on_run_complete(&self, discovered: usize, processed: usize) {
        let _ = (discovered, processed);
    }
}

/// A no-op implementation for callers that don't need progress events.
///
/// This is the default when no callback is configured.
pub struct NoopRunCallback;

impl RunProgressCallback for NoopRunCallback {}

/// Convenience alias matching the type stored in [`crate::config::RunConfig`].
pub type ProgressCallback = Arc<dyn RunProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct TrackingCallback {
        starts: AtomicUsize,
        completes: AtomicUsize,
        errors: AtomicUsize,
        final_processed: AtomicUsize,
    }

    impl RunProgressCallback for TrackingCallback {
        fn on_file_start(&self, _num: usize, _total: usize, _file: &Path) {
            self.starts.fetch_add(1, Ordering::SeqCst);
        }

        fn on_file_complete(&self, _n: usize, _t: usize, _f: &Path, _a: Option<&Path>) {
            self.completes.fetch_add(1, Ordering::SeqCst);
        }

        fn on_file_error(&self, _n: usize, _t: usize, _f: &Path, _e: &str) {
            self.errors.fetch_add(1, Ordering::SeqCst);
        }

        fn on_run_complete(&self, _discovered: usize, processed: usize) {
            self.final_processed.store(processed, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopRunCallback;
        cb.on_run_start(2);
        cb.on_file_start(1, 2, Path::new("a.pdf"));
        cb.on_file_complete(1, 2, Path::new("a.pdf"), None);
        cb.on_file_error(2, 2, Path::new("b.pdf"), "corrupt");
        cb.on_run_complete(2, 1);
    }

    #[test]
    fn tracking_callback_receives_events() {
        let cb = TrackingCallback::default();

        cb.on_run_start(3);
        cb.on_file_start(1, 3, Path::new("a.pdf"));
        cb.on_file_complete(1, 3, Path::new("a.pdf"), None);
        cb.on_file_start(2, 3, Path::new("b.pdf"));
        cb.on_file_error(2, 3, Path::new("b.pdf"), "corrupt");
        cb.on_file_start(3, 3, Path::new("c.pdf"));
        cb.on_file_complete(3, 3, Path::new("c.pdf"), None);
        cb.on_run_complete(3, 2);

        assert_eq!(cb.starts.load(Ordering::SeqCst), 3);
        assert_eq!(cb.completes.load(Ordering::SeqCst), 2);
        assert_eq!(cb.errors.load(Ordering::SeqCst), 1);
        assert_eq!(cb.final_processed.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: Arc<dyn RunProgressCallback> = Arc::new(NoopRunCallback);
        cb.on_run_start(10);
        cb.on_file_start(1, 10, Path::new("x.pdf"));
    }
}
