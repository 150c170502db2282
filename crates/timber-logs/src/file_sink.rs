//! Rotating file sink.
//!
//! This module provides:
//! - [`FileSinkConfig`] — directory, base name, retention, and threshold
//!   settings
//! - [`RotatingFileSink`] — append-only sink that archives the previous
//!   run's file on the first write of the process and bounds the number of
//!   archives kept
//!
//! The active file is `<directory>/<base_name>.log`; archives are
//! `<directory>/<base_name>-<N>.log` with the highest `N` being the most
//! recent. At most `save_count` archives survive a rotation.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use parking_lot::Mutex;
use regex::Regex;

use crate::error::{LogError, Result};
use crate::format;
use crate::traits::Sink;
use crate::types::LogRecord;

/// Configuration for a rotating file sink.
#[derive(Debug, Clone)]
pub struct FileSinkConfig {
    /// Directory holding the active and archived files.
    pub directory: PathBuf,
    /// Base name for the active file (`<base_name>.log`).
    pub base_name: String,
    /// Number of archived files retained; zero disables rotation entirely.
    pub save_count: usize,
    /// When set, writes succeed without touching disk.
    pub silent: bool,
    /// Minimum rank a record needs to be written.
    pub min_rank: u32,
}

impl Default for FileSinkConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            base_name: "default".to_string(),
            save_count: 3,
            silent: false,
            min_rank: 0,
        }
    }
}

impl FileSinkConfig {
    /// Creates a config with the given directory.
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            ..Default::default()
        }
    }

    /// Sets the base name.
    #[must_use]
    pub fn with_base_name(mut self, base_name: impl Into<String>) -> Self {
        self.base_name = base_name.into();
        self
    }

    /// Sets the retained-archive count.
    #[must_use]
    pub const fn with_save_count(mut self, save_count: usize) -> Self {
        self.save_count = save_count;
        self
    }

    /// Sets the silent flag.
    #[must_use]
    pub const fn with_silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Sets the minimum rank.
    #[must_use]
    pub const fn with_min_rank(mut self, min_rank: u32) -> Self {
        self.min_rank = min_rank;
        self
    }
}

/// State guarded by the sink's lock.
struct SinkState {
    /// Flips false → true exactly once, on the first write attempt of this
    /// sink instance, even when that rotation fails. A failed rename is
    /// reported once and not retried.
    rotated_this_process: bool,
}

/// Append-only file sink that rotates the previous run's file forward.
///
/// The first write of the sink's lifetime archives any existing active file
/// under the next numbered name, then trims the oldest archives down to the
/// retention bound. Writes and the rotation step serialize on an internal
/// lock, so the sink is safe to share across threads.
///
/// Two sink instances (or two processes) targeting the same directory and
/// base name are unsupported; that arrangement is not guarded against.
pub struct RotatingFileSink {
    config: FileSinkConfig,
    active_path: PathBuf,
    suffix_pattern: Regex,
    state: Mutex<SinkState>,
}

impl RotatingFileSink {
    /// Creates the sink, resolving the directory to an absolute path and
    /// creating it if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(config: FileSinkConfig) -> Result<Self> {
        let directory = if config.directory.is_absolute() {
            config.directory.clone()
        } else {
            std::env::current_dir()?.join(&config.directory)
        };
        fs::create_dir_all(&directory)?;

        let suffix_pattern = Regex::new(&format!(
            r"^{}-(\d+)\.log$",
            regex::escape(&config.base_name)
        ))
        .map_err(|source| LogError::InvalidPattern {
            pattern: config.base_name.clone(),
            source,
        })?;

        let active_path = directory.join(format!("{}.log", config.base_name));
        let config = FileSinkConfig {
            directory,
            ..config
        };

        Ok(Self {
            config,
            active_path,
            suffix_pattern,
            state: Mutex::new(SinkState {
                rotated_this_process: false,
            }),
        })
    }

    /// Returns the path of the active file.
    #[must_use]
    pub fn active_path(&self) -> &std::path::Path {
        &self.active_path
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &FileSinkConfig {
        &self.config
    }

    /// Path of the archive with the given suffix number.
    fn archive_path(&self, suffix: u64) -> PathBuf {
        self.config
            .directory
            .join(format!("{}-{suffix}.log", self.config.base_name))
    }

    /// Numeric suffixes of existing archives, ascending. Files matching the
    /// base name but not the `-<N>.log` grammar are ignored.
    fn archive_suffixes(&self) -> Result<Vec<u64>> {
        let mut suffixes = Vec::new();
        for entry in fs::read_dir(&self.config.directory)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            let Some(capture) = self
                .suffix_pattern
                .captures(name)
                .and_then(|captures| captures.get(1))
            else {
                continue;
            };
            if let Ok(suffix) = capture.as_str().parse::<u64>() {
                suffixes.push(suffix);
            }
        }
        suffixes.sort_unstable();
        Ok(suffixes)
    }

    /// Archives the active file under the next numbered name, then trims
    /// the oldest archives beyond the retention bound.
    ///
    /// A missing active file makes this a no-op. A rename failure
    /// propagates untouched; trim failures are diagnostics only, since the
    /// rename has already succeeded.
    fn rotate(&self) -> Result<()> {
        if !self.active_path.exists() {
            return Ok(());
        }

        let mut suffixes = self.archive_suffixes()?;
        let max = suffixes.last().copied().unwrap_or(0);
        fs::rename(&self.active_path, self.archive_path(max + 1))?;

        let keep = self.config.save_count.saturating_sub(1);
        while suffixes.len() > keep {
            let oldest = suffixes.remove(0);
            let path = self.archive_path(oldest);
            if let Err(error) = fs::remove_file(&path) {
                tracing::warn!(
                    path = %path.display(),
                    %error,
                    "failed to remove expired log archive"
                );
            }
        }

        Ok(())
    }

    /// Appends one formatted line to the active file, creating it if
    /// absent.
    fn append_line(&self, line: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.active_path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }
}

impl Sink for RotatingFileSink {
    fn write(&self, record: &LogRecord) -> Result<()> {
        if self.config.silent || record.rank < self.config.min_rank {
            return Ok(());
        }

        let mut state = self.state.lock();
        if !state.rotated_this_process {
            let rotation = if self.config.save_count == 0 {
                Ok(())
            } else {
                self.rotate()
            };
            state.rotated_this_process = true;
            rotation?;
        }

        self.append_line(&format::format_line(record))
    }

    fn name(&self) -> &str {
        "file"
    }
}
