//! Append-only file logger with per-instance locking.
//!
//! Each `FileLogger` owns a mutex-guarded file handle. Clones share the
//! handle and the lock, so concurrent callers serialize their writes;
//! loggers opened on different paths never contend with each other.

use std::fs::{File, OpenOptions};
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::utils::console::Console;
use crate::utils::constants::LOG_TIME_FORMAT;

#[derive(Error, Debug)]
pub enum LogError {
    #[error("log I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, LogError>;

/// What to do when an append or truncate fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureMode {
    /// Return the error to the caller.
    #[default]
    Propagate,
    /// Report the error on stderr and terminate the process with a nonzero
    /// exit code.
    Fatal,
}

#[derive(Clone)]
pub struct FileLogger {
    path: Arc<PathBuf>,
    file: Arc<Mutex<File>>,
    mode: FailureMode,
}

impl FileLogger {
    /// Open (or create) the log file for appending. Errors propagate.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_mode(path, FailureMode::Propagate)
    }

    /// Open the log file with an explicit failure mode.
    pub fn with_mode<P: AsRef<Path>>(path: P, mode: FailureMode) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| LogError::Io {
                path: path.clone(),
                source,
            })?;

        Ok(Self {
            path: Arc::new(path),
            file: Arc::new(Mutex::new(file)),
            mode,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `"<HH:MM:SS>: <message>"` as one line, under the lock.
    pub fn log(&self, message: &str) -> Result<()> {
        let line = format!(
            "{}: {}\n",
            chrono::Local::now().format(LOG_TIME_FORMAT),
            message
        );
        self.guarded(|file| file.write_all(line.as_bytes()))
    }

    /// Truncate the log file, under the same lock as [`log`](Self::log).
    pub fn clear(&self) -> Result<()> {
        self.guarded(|file| file.set_len(0))
    }

    fn guarded(&self, op: impl FnOnce(&mut File) -> std::io::Result<()>) -> Result<()> {
        let mut file = match self.file.lock() {
            Ok(guard) => guard,
            // A panicked writer cannot leave a partial line behind; keep going.
            Err(poisoned) => poisoned.into_inner(),
        };

        match op(&mut file) {
            Ok(()) => Ok(()),
            Err(source) => self.fail(LogError::Io {
                path: (*self.path).clone(),
                source,
            }),
        }
    }

    fn fail(&self, err: LogError) -> Result<()> {
        match self.mode {
            FailureMode::Propagate => Err(err),
            FailureMode::Fatal => {
                Console::error(&format!("fatal: {}", err));
                std::process::exit(1);
            }
        }
    }
}
