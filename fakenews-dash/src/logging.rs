//! Tracing setup.
//!
//! The dashboard owns the terminal, so log output goes to a per-launch file
//! under the user's local data directory. One-shot commands also mirror
//! log lines to stderr.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::SystemTime;

use chrono::{DateTime, Local};
use thiserror::Error;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

use crate::config::APP_NAME;

const MAX_LOG_FILES: usize = 10;

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("no local data directory available for logs")]
    NoDataDir,
    #[error("failed to prepare log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to read log directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to remove old log file {path}: {source}")]
    RemoveFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to create log file at {path}: {source}")]
    CreateLogFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to install global tracing subscriber: {0}")]
    SetGlobal(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Install the global subscriber. Later calls are no-ops.
///
/// Returns the path of the log file for this launch.
pub fn init(mirror_to_stderr: bool) -> Result<PathBuf, LoggingError> {
    let log_dir = log_directory()?;
    init_in(&log_dir, mirror_to_stderr)
}

fn init_in(log_dir: &Path, mirror_to_stderr: bool) -> Result<PathBuf, LoggingError> {
    fs::create_dir_all(log_dir).map_err(|source| LoggingError::CreateDir {
        path: log_dir.to_path_buf(),
        source,
    })?;

    let file_name = log_file_name(Local::now());
    let log_path = log_dir.join(&file_name);
    if LOG_GUARD.get().is_some() {
        return Ok(log_path);
    }
    ensure_file_exists(&log_path)?;

    let (file_writer, guard) = tracing_appender::non_blocking(rolling::never(log_dir, &file_name));
    prune_old_logs(log_dir, MAX_LOG_FILES)?;

    let file_layer = fmt::layer().with_ansi(false).with_writer(file_writer);
    let stderr_layer = mirror_to_stderr.then(|| fmt::layer().with_writer(std::io::stderr));

    let subscriber = Registry::default()
        .with(build_env_filter())
        .with(file_layer)
        .with(stderr_layer);
    tracing::subscriber::set_global_default(subscriber)?;
    let _ = LOG_GUARD.set(guard);

    tracing::info!("Logging initialized; log file at {}", log_path.display());
    Ok(log_path)
}

pub fn log_directory() -> Result<PathBuf, LoggingError> {
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_NAME).join("logs"))
        .ok_or(LoggingError::NoDataDir)
}

fn build_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn log_file_name(now: DateTime<Local>) -> String {
    format!("{APP_NAME}_{}.log", now.format("%Y-%m-%d_%H-%M-%S"))
}

fn ensure_file_exists(path: &Path) -> Result<(), LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(|_| ())
        .map_err(|source| LoggingError::CreateLogFile {
            path: path.to_path_buf(),
            source,
        })
}

fn prune_old_logs(dir: &Path, max_files: usize) -> Result<(), LoggingError> {
    let mut entries = fs::read_dir(dir)
        .map_err(|source| LoggingError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|ft| ft.is_file()).unwrap_or(false))
        .filter(|entry| entry.path().extension().and_then(|ext| ext.to_str()) == Some("log"))
        .map(|entry| {
            let modified = entry
                .metadata()
                .and_then(|meta| meta.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            (modified, entry.path())
        })
        .collect::<Vec<_>>();

    if entries.len() <= max_files {
        return Ok(());
    }
    entries.sort_by_key(|(modified, _)| *modified);
    let excess = entries.len() - max_files;
    for (_, path) in entries.into_iter().take(excess) {
        fs::remove_file(&path).map_err(|source| LoggingError::RemoveFile { path, source })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::{thread, time::Duration};
    use tempfile::tempdir;

    #[test]
    fn test_log_file_name_has_timestamp_and_prefix() {
        let fixed = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 2).unwrap();
        assert_eq!(log_file_name(fixed), "fakenews-dash_2024-03-09_07-05-02.log");
    }

    #[test]
    fn test_prune_removes_oldest_files_beyond_limit() {
        let dir = tempdir().unwrap();
        for idx in 0..12 {
            ensure_file_exists(&dir.path().join(format!("fakenews-dash_{idx}.log"))).unwrap();
            thread::sleep(Duration::from_millis(10));
        }
        fs::write(dir.path().join("notes.txt"), "keep me").unwrap();

        prune_old_logs(dir.path(), 10).unwrap();

        let remaining: Vec<PathBuf> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok().map(|e| e.path()))
            .collect();
        let logs = remaining
            .iter()
            .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("log"))
            .count();
        assert_eq!(logs, 10);
        assert!(remaining.iter().any(|p| p.ends_with("notes.txt")));
        assert!(!dir.path().join("fakenews-dash_0.log").exists());
        assert!(!dir.path().join("fakenews-dash_1.log").exists());
    }
}
