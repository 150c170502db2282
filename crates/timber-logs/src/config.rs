//! Resolved configuration consumed by the router.
//!
//! Configuration discovery and file parsing live outside this crate; callers
//! hand the router one [`LogConfig`] that has already been resolved. The
//! defaults here mirror the built-in fallback configuration: four levels,
//! a wildcard include filter, and a console plus file sink pair.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::format::TimestampSettings;

/// A filter rule as it appears in configuration.
///
/// `pattern` is the wildcard `*` or a regular expression; `levels` lists the
/// level names the rule applies to. Rules compile into
/// [`FilterRule`](crate::filter::FilterRule) when the router is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRuleConfig {
    /// Wildcard `*` or a regular expression matched against module ids.
    pub pattern: String,
    /// Level names the rule applies to; empty means the rule never matches.
    #[serde(default)]
    pub levels: Vec<String>,
}

impl FilterRuleConfig {
    /// Creates a rule from a pattern and level names.
    #[must_use]
    pub fn new(pattern: impl Into<String>, levels: &[&str]) -> Self {
        Self {
            pattern: pattern.into(),
            levels: levels.iter().map(|level| (*level).to_string()).collect(),
        }
    }
}

/// The kind of sink a [`SinkConfig`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// Rotating file sink.
    File,
    /// Console sink.
    Console,
}

/// Per-sink settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SinkConfig {
    /// Which sink to build.
    pub kind: SinkKind,
    /// Directory for log files; defaults to the current working directory.
    /// File sinks only.
    pub directory: Option<PathBuf>,
    /// Number of archived files retained; zero disables rotation. File
    /// sinks only.
    pub save_count: usize,
    /// When set, writes succeed without any output.
    pub silent: bool,
    /// Minimum threshold level name; defaults to the lowest configured rank.
    pub level: Option<String>,
    /// Whether to color the level name. Console sinks only.
    pub colorize: bool,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            kind: SinkKind::File,
            directory: None,
            save_count: 3,
            silent: false,
            level: None,
            colorize: true,
        }
    }
}

impl SinkConfig {
    /// A file sink with default settings.
    #[must_use]
    pub fn file() -> Self {
        Self::default()
    }

    /// A console sink with default settings.
    #[must_use]
    pub fn console() -> Self {
        Self {
            kind: SinkKind::Console,
            ..Default::default()
        }
    }

    /// Sets the directory.
    #[must_use]
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
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

    /// Sets the minimum threshold level.
    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }
}

/// The resolved logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LogConfig {
    /// Level name → rank; at least one entry, ranks unique.
    pub levels: HashMap<String, u32>,
    /// Level name → display color; consumed only by console sinks.
    pub colors: HashMap<String, String>,
    /// Ordered include rules; no match means the call is denied.
    pub include_filters: Vec<FilterRuleConfig>,
    /// Ordered exclude rules, consulted only for wildcard-matched includes.
    pub exclude_filters: Vec<FilterRuleConfig>,
    /// Prefix messages with `[<module id>] - `.
    pub show_module: bool,
    /// Escalate sink failures as fatal.
    pub exit_on_error: bool,
    /// Base name for file sinks (`<base_name>.log`).
    pub base_name: String,
    /// The sinks to build.
    pub sinks: Vec<SinkConfig>,
    /// Shape of the default timestamp formatter.
    pub timestamp_settings: TimestampSettings,
}

impl Default for LogConfig {
    fn default() -> Self {
        let levels = [("debug", 0), ("info", 1), ("warn", 2), ("error", 3)]
            .into_iter()
            .map(|(name, rank)| (name.to_string(), rank))
            .collect();
        let colors = [
            ("debug", "white"),
            ("info", "blue"),
            ("warn", "yellow"),
            ("error", "red"),
        ]
        .into_iter()
        .map(|(name, color)| (name.to_string(), color.to_string()))
        .collect();

        Self {
            levels,
            colors,
            include_filters: vec![FilterRuleConfig::new(
                "*",
                &["debug", "info", "warn", "error"],
            )],
            exclude_filters: Vec::new(),
            show_module: true,
            exit_on_error: false,
            base_name: "default".to_string(),
            sinks: vec![SinkConfig::console(), SinkConfig::file()],
            timestamp_settings: TimestampSettings::default(),
        }
    }
}

impl LogConfig {
    /// Sets the base name.
    #[must_use]
    pub fn with_base_name(mut self, base_name: impl Into<String>) -> Self {
        self.base_name = base_name.into();
        self
    }

    /// Replaces the sink list.
    #[must_use]
    pub fn with_sinks(mut self, sinks: Vec<SinkConfig>) -> Self {
        self.sinks = sinks;
        self
    }

    /// Appends an include rule.
    #[must_use]
    pub fn with_include_filter(mut self, rule: FilterRuleConfig) -> Self {
        self.include_filters.push(rule);
        self
    }

    /// Appends an exclude rule.
    #[must_use]
    pub fn with_exclude_filter(mut self, rule: FilterRuleConfig) -> Self {
        self.exclude_filters.push(rule);
        self
    }
}
