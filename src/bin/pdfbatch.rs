//! CLI binary for pdfbatch.
//!
//! A thin shim over the library crate that maps CLI flags to `RunConfig`
//! and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdfbatch::{run, OutputMode, ProgressCallback, RunConfig, RunProgressCallback};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

/// Truncate long messages to keep output tidy. Counts chars, not bytes:
/// error text embeds file names, which may be non-ASCII.
fn truncate_msg(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let cut: String = s.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{cut}\u{2026}")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: renders a live progress bar and per-file
/// log lines using [indicatif].
struct CliProgress {
    /// The single progress bar anchored at the bottom of the terminal.
    bar: ProgressBar,
    /// Per-file wall-clock start times for elapsed reporting.
    start_times: Mutex<HashMap<usize, Instant>>,
    /// Count of files that errored out.
    errors: AtomicUsize,
}

impl CliProgress {
    /// Create a callback whose progress-bar length is set by
    /// `on_run_start` (called once discovery knows the file count).
    fn new_dynamic() -> Arc<Self> {
        let bar = ProgressBar::new(0); // length set in on_run_start

        // Initial style: spinner only (no counter until we know the total).
        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(spinner_style);
        bar.set_prefix("Discovering");
        bar.set_message("Scanning for PDF files…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            start_times: Mutex::new(HashMap::new()),
            errors: AtomicUsize::new(0),
        })
    }

    /// Switch to the full progress-bar style once we know `total`.
    fn activate_bar(&self, total: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} files  \
             ⏱ {elapsed_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        self.bar.set_length(total as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Processing");
    }

    /// Drop the bar without a summary line, leaving the terminal clean
    /// for whatever gets printed next.
    fn abandon(&self) {
        self.bar.finish_and_clear();
    }

    fn elapsed_secs(&self, num: usize) -> f64 {
        self.start_times
            .lock()
            .unwrap()
            .remove(&num)
            .map(|t| t.elapsed().as_millis() as f64 / 1000.0)
            .unwrap_or(0.0)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

impl RunProgressCallback for CliProgress {
    fn on_run_start(&self, discovered: usize) {
        self.activate_bar(discovered);
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Found {discovered} PDF files"))
        ));
    }

    fn on_file_start(&self, num: usize, _total: usize, file: &Path) {
        self.start_times.lock().unwrap().insert(num, Instant::now());
        self.bar.set_message(file_name(file));
    }

    fn on_file_complete(&self, num: usize, total: usize, file: &Path, artifact: Option<&Path>) {
        let secs = self.elapsed_secs(num);
        let dest = artifact
            .map(|a| format!("→ {}", file_name(a)))
            .unwrap_or_default();
        self.bar.println(format!(
            "  {} {:>3}/{:<3}  {}  {}  {}",
            green("✓"),
            num,
            total,
            file_name(file),
            dim(&dest),
            dim(&format!("{secs:.1}s")),
        ));
        self.bar.inc(1);
    }

    fn on_file_error(&self, num: usize, total: usize, file: &Path, error: &str) {
        let secs = self.elapsed_secs(num);
        self.errors.fetch_add(1, Ordering::SeqCst);

        let msg = truncate_msg(error, 80);

        self.bar.println(format!(
            "  {} {:>3}/{:<3}  {}  {}  {}",
            red("✗"),
            num,
            total,
            file_name(file),
            red(&msg),
            dim(&format!("{secs:.1}s")),
        ));
        self.bar.inc(1);
    }

    fn on_run_complete(&self, discovered: usize, processed: usize) {
        let failed = discovered.saturating_sub(processed);
        self.bar.finish_and_clear();

        if failed == 0 {
            eprintln!(
                "{} {} files processed successfully",
                green("✔"),
                bold(&processed.to_string())
            );
        } else {
            eprintln!(
                "{} {}/{} files processed  ({} failed)",
                if processed == 0 { red("✘") } else { cyan("⚠") },
                bold(&processed.to_string()),
                discovered,
                red(&failed.to_string()),
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Process base/ into per-file artifacts under uploads/
  pdfbatch base

  # Choose the artifact directory
  pdfbatch base --out-dir processed

  # Whole tree, one consolidated result file
  pdfbatch reports --recursive --output analysis.json

  # Tally only, write nothing
  pdfbatch base --report-only

  # Machine-readable run summary on stdout
  pdfbatch base --json --no-progress

OUTPUT:
  Each successfully processed input produces one JSON artifact named
  <stem>_processed.json (UTF-8, 2-space indentation) in the artifact
  directory, overwriting any previous run's file. With --output a single
  consolidated JSON document is written instead, keyed by file stem.

  Per-file failures are reported and counted but never stop the run;
  the exit code is 0 regardless.

ENVIRONMENT VARIABLES:
  PDFBATCH_INPUT_DIR   Default input directory
  PDFBATCH_OUT_DIR     Default artifact directory
"#;

/// Batch-process a directory of PDF documents into JSON artifacts.
#[derive(Parser, Debug)]
#[command(
    name = "pdfbatch",
    version,
    about = "Batch-process a directory of PDF documents into JSON artifacts",
    long_about = "Discover the PDF files in a directory (optionally recursively), run each one \
through a PDF processor, and persist the results as JSON — one artifact per file or one \
consolidated document. Per-file failures are reported and counted without stopping the run.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Directory containing the input PDFs.
    #[arg(env = "PDFBATCH_INPUT_DIR")]
    input_dir: PathBuf,

    /// Search subdirectories too.
    #[arg(short, long, env = "PDFBATCH_RECURSIVE")]
    recursive: bool,

    /// Write one consolidated JSON result file instead of per-file artifacts.
    #[arg(short, long, conflicts_with_all = ["out_dir", "report_only"])]
    output: Option<PathBuf>,

    /// Directory for per-file `<stem>_processed.json` artifacts.
    #[arg(long, env = "PDFBATCH_OUT_DIR", default_value = "uploads")]
    out_dir: PathBuf,

    /// Process and tally only; write nothing to disk.
    #[arg(long, conflicts_with = "output")]
    report_only: bool,

    /// Print the run summary as JSON on stdout.
    #[arg(long)]
    json: bool,

    /// Disable the progress bar.
    #[arg(long)]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the progress bar is active;
    // the bar provides all the feedback that matters to the user.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let output_mode = if cli.report_only {
        OutputMode::Report
    } else if let Some(ref path) = cli.output {
        OutputMode::Consolidated(path.clone())
    } else {
        OutputMode::Artifacts(cli.out_dir.clone())
    };

    let mut builder = RunConfig::builder(&cli.input_dir)
        .recursive(cli.recursive)
        .output(output_mode);

    let progress = show_progress.then(CliProgress::new_dynamic);
    if let Some(ref cb) = progress {
        builder = builder.progress(Arc::clone(cb) as ProgressCallback);
    }

    let config = builder.build().context("Invalid configuration")?;

    // ── Run ──────────────────────────────────────────────────────────────
    let summary = match run(&config) {
        Ok(summary) => summary,
        Err(e) => {
            // A run-level problem (missing directory, unwritable output)
            // is reported once; the tool still exits 0, like the batch
            // scripts it replaces. The bar goes first so the error is
            // not printed under a live spinner line.
            if let Some(ref cb) = progress {
                cb.abandon();
            }
            eprintln!("{} {}", red("✘"), e);
            return Ok(());
        }
    };

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("Failed to serialise summary")?
        );
        return Ok(());
    }

    // ── Summary ──────────────────────────────────────────────────────────
    // The progress callback already printed per-file lines and the final
    // tick; without it, print the tally here.
    if !cli.quiet && !show_progress {
        eprintln!(
            "Processed {}/{} files in {}ms",
            summary.processed, summary.discovered, summary.duration_ms
        );
        if summary.failed > 0 {
            eprintln!("  {} files failed", summary.failed);
        }
    }

    if !cli.quiet {
        for failure in summary.failures() {
            eprintln!("  {} {}", red("✗"), failure);
        }
        match config.output {
            OutputMode::Artifacts(ref dir) if !summary.artifacts.is_empty() => {
                eprintln!(
                    "{} {} artifacts in {}",
                    dim("→"),
                    summary.artifacts.len(),
                    bold(&dir.display().to_string())
                );
            }
            OutputMode::Consolidated(ref path) => {
                eprintln!("{} results written to {}", dim("→"), bold(&path.display().to_string()));
            }
            _ => {}
        }
    }

    Ok(())
}
