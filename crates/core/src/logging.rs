//! Structured JSON logging for a software center session.
//!
//! Logs are written by a `tracing_subscriber` registry with:
//! - an `EnvFilter` taken from `RUST_LOG`, or from `LoggingSettings::level`
//! - a JSON `fmt` layer writing through a non-blocking `tracing_appender` file
//!
//! Each run gets its own file, `softcenter-<run_id>.json`, where the run ID is
//! a UUID v7. Older run files beyond `max_files` are removed at startup.
//!
//! ```bash
//! RUST_LOG=softcenter_core::view=debug,info ./softcenter
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use softcenter_core::settings::LoggingSettings;
//! use softcenter_core::logging::{init_logging, shutdown_logging};
//!
//! init_logging(&LoggingSettings::default())?;
//! tracing::info!("Application started");
//! shutdown_logging();
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::settings::LoggingSettings;
use anyhow::{Context, Error};
use std::fs;
use std::fs::DirEntry;
use std::path::Path;
use std::sync::mpsc;
use std::sync::{Mutex, OnceLock};
use std::thread;
use std::time::Duration;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const LOG_FILE_PREFIX: &str = "softcenter-";
const LOG_FILE_SUFFIX: &str = "json";

static LOG_GUARD: OnceLock<Mutex<Option<WorkerGuard>>> = OnceLock::new();
static RUN_ID: OnceLock<String> = OnceLock::new();

/// Returns the run ID of this process, generated on first access.
///
/// ```
/// use softcenter_core::logging::get_run_id;
///
/// assert_eq!(get_run_id(), get_run_id());
/// ```
pub fn get_run_id() -> &'static str {
    RUN_ID.get_or_init(|| Uuid::now_v7().to_string()).as_str()
}

/// Deletes the oldest run logs so that at most `max_files` remain.
///
/// Run IDs are UUID v7, so file names sort chronologically.
/// A `max_files` of 0 keeps everything.
fn cleanup_run_logs(log_dir: &Path, max_files: usize) -> Result<(), Error> {
    if max_files == 0 {
        return Ok(());
    }

    let mut entries = collect_run_log_entries(log_dir)?;
    if entries.len() <= max_files {
        return Ok(());
    }

    entries.sort_by_key(|entry| entry.file_name());
    let remove_count = entries.len().saturating_sub(max_files);
    for entry in entries.into_iter().take(remove_count) {
        fs::remove_file(entry.path())
            .with_context(|| format!("can't remove old log file {}", entry.path().display()))?;
    }

    Ok(())
}

fn collect_run_log_entries(log_dir: &Path) -> Result<Vec<DirEntry>, Error> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(log_dir)
        .with_context(|| format!("can't read log directory {}", log_dir.display()))?
    {
        let entry = entry.context("can't read log directory entry")?;
        if is_run_log_entry(&entry) {
            entries.push(entry);
        }
    }

    Ok(entries)
}

fn is_run_log_entry(entry: &DirEntry) -> bool {
    is_run_log_name(&entry.file_name().to_string_lossy())
}

fn is_run_log_name(file_name: &str) -> bool {
    file_name.starts_with(LOG_FILE_PREFIX) && file_name.ends_with(LOG_FILE_SUFFIX)
}

/// Name of the log file written for `run_id`.
fn run_log_file_name(run_id: &str) -> String {
    format!("{}{}.{}", LOG_FILE_PREFIX, run_id, LOG_FILE_SUFFIX)
}

/// Sets up the global subscriber. Call once, at startup.
///
/// Does nothing when logging is disabled in `settings`.
///
/// # Errors
///
/// Returns an error if the log directory can't be created or cleaned up, if
/// the appender can't be built, if the level is not a valid filter, or if a
/// global subscriber is already installed.
pub fn init_logging(settings: &LoggingSettings) -> Result<(), Error> {
    if !settings.enabled {
        return Ok(());
    }

    let current_working_dir =
        std::env::current_dir().context("can't get current working directory")?;
    let log_dir = current_working_dir.join(&settings.directory);
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("can't create log directory {}", &log_dir.display()))?;

    cleanup_run_logs(&log_dir, settings.max_files)?;

    let appender = tracing_appender::rolling::Builder::new()
        .rotation(tracing_appender::rolling::Rotation::NEVER)
        .filename_prefix(format!("{}{}", LOG_FILE_PREFIX, get_run_id()))
        .filename_suffix(LOG_FILE_SUFFIX)
        .build(&log_dir)
        .context("can't initialize log file appender")?;

    let (non_blocking, guard) = tracing_appender::non_blocking(appender);
    let _ = LOG_GUARD.set(Mutex::new(Some(guard)));

    let filter = build_filter(settings)?;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_ansi(false)
        .with_writer(non_blocking)
        .with_current_span(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .context("can't initialize tracing subscriber")?;

    tracing::info!(
        run_id = get_run_id(),
        version = VERSION,
        log_file = %log_dir.join(run_log_file_name(get_run_id())).display(),
        "Logging initialized"
    );

    Ok(())
}

/// Flushes buffered log lines, waiting at most five seconds.
pub fn shutdown_logging() {
    tracing::info!(run_id = get_run_id(), "Flushing logs");

    if let Some(mutex) = LOG_GUARD.get() {
        if let Ok(mut guard_opt) = mutex.lock() {
            if let Some(guard) = guard_opt.take() {
                let (tx, rx) = mpsc::channel();

                thread::spawn(move || {
                    drop(guard);
                    let _ = tx.send(());
                });

                let _ = rx.recv_timeout(Duration::from_secs(5));
            }
        }
    }
}

/// `RUST_LOG` wins; otherwise the configured level, defaulting to `info`.
fn build_filter(settings: &LoggingSettings) -> Result<EnvFilter, Error> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    parse_level(&settings.level)
}

fn parse_level(level: &str) -> Result<EnvFilter, Error> {
    let level = level.trim();
    let level = if level.is_empty() { "info" } else { level };

    EnvFilter::builder()
        .parse(level)
        .context("invalid logging level")
}
