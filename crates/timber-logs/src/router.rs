//! Routing dispatcher: admission, formatting, and sink fan-out.
//!
//! This module provides:
//! - [`Router`] — the composition point built once from a [`LogConfig`]
//! - per-call admission through a [`FilterSet`]
//! - best-effort fan-out with aggregate-first-error reporting

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;

use crate::config::{FilterRuleConfig, LogConfig, SinkConfig, SinkKind};
use crate::console::{ConsoleSink, ConsoleSinkConfig};
use crate::error::{LogError, Result};
use crate::file_sink::{FileSinkConfig, RotatingFileSink};
use crate::filter::FilterSet;
use crate::format::{self, TimestampFn, TimestampSettings};
use crate::logger::ModuleLogger;
use crate::traits::Sink;
use crate::types::{LevelSet, LogRecord};

/// The routing dispatcher.
///
/// Constructed once from a resolved configuration and shared via [`Arc`];
/// every module proxy forwards to one router. There is no ambient global —
/// hosts own the router and inject it where logging is needed.
pub struct Router {
    levels: LevelSet,
    filters: RwLock<Arc<FilterSet>>,
    sinks: Vec<Box<dyn Sink>>,
    show_module: bool,
    exit_on_error: bool,
    timestamp: TimestampFn,
}

impl Router {
    /// Builds a router from the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid level set, a filter pattern that
    /// fails to compile, an unknown sink threshold level, or a sink that
    /// cannot be constructed.
    pub fn try_from_config(config: &LogConfig) -> Result<Self> {
        let levels = LevelSet::new(config.levels.clone())?;
        let filters = FilterSet::compile(&config.include_filters, &config.exclude_filters)?;

        let mut sinks: Vec<Box<dyn Sink>> = Vec::with_capacity(config.sinks.len());
        for sink_config in &config.sinks {
            sinks.push(Self::build_sink(config, sink_config, &levels)?);
        }

        Ok(Self {
            levels,
            filters: RwLock::new(Arc::new(filters)),
            sinks,
            show_module: config.show_module,
            exit_on_error: config.exit_on_error,
            timestamp: format::default_timestamp_fn(config.timestamp_settings),
        })
    }

    /// Builds a router from the configuration, falling back to the built-in
    /// defaults when the configuration is invalid.
    ///
    /// The rejected configuration is reported on the diagnostic channel,
    /// never escalated: a broken logging config must not take the host
    /// down.
    #[must_use]
    pub fn from_config(config: &LogConfig) -> Self {
        Self::try_from_config(config).unwrap_or_else(|error| {
            tracing::warn!(%error, "invalid logging configuration, using built-in defaults");
            Self::try_from_config(&LogConfig::default()).unwrap_or_else(|fallback_error| {
                tracing::error!(%fallback_error, "built-in defaults failed, logging disabled");
                Self::disabled()
            })
        })
    }

    /// A router with no sinks and deny-all filters. Last-resort fallback.
    fn disabled() -> Self {
        Self {
            levels: LevelSet::default(),
            filters: RwLock::new(Arc::new(FilterSet::default())),
            sinks: Vec::new(),
            show_module: false,
            exit_on_error: false,
            timestamp: format::default_timestamp_fn(TimestampSettings::default()),
        }
    }

    fn build_sink(
        config: &LogConfig,
        sink: &SinkConfig,
        levels: &LevelSet,
    ) -> Result<Box<dyn Sink>> {
        let min_rank = match &sink.level {
            Some(name) => levels
                .rank(name)
                .ok_or_else(|| LogError::UnknownLevel(name.clone()))?,
            None => levels.min_rank(),
        };

        match sink.kind {
            SinkKind::File => {
                let file_config = FileSinkConfig {
                    directory: sink
                        .directory
                        .clone()
                        .unwrap_or_else(|| PathBuf::from(".")),
                    base_name: config.base_name.clone(),
                    save_count: sink.save_count,
                    silent: sink.silent,
                    min_rank,
                };
                Ok(Box::new(RotatingFileSink::new(file_config)?))
            }
            SinkKind::Console => {
                let console_config = ConsoleSinkConfig {
                    colors: config.colors.clone(),
                    colorize: sink.colorize,
                    silent: sink.silent,
                    min_rank,
                };
                Ok(Box::new(ConsoleSink::new(console_config)))
            }
        }
    }

    /// Appends a caller-supplied sink. Must be called before the router is
    /// shared.
    #[must_use]
    pub fn with_sink(mut self, sink: Box<dyn Sink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Installs a caller-supplied timestamp function. Must be called before
    /// the router is shared.
    #[must_use]
    pub fn with_timestamp_fn(mut self, timestamp: TimestampFn) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Routes one log call.
    ///
    /// A call the filter engine denies succeeds without touching any sink.
    /// An admitted call fans out to every sink; the first error is returned
    /// once all sinks have been attempted, wrapped as [`LogError::Fatal`]
    /// when the exit-on-error policy is active.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::UnknownLevel`] for a level name absent from the
    /// configured set, otherwise the aggregated sink error, if any.
    pub fn log(
        &self,
        level: &str,
        module_id: &str,
        message: &str,
        meta: Option<Value>,
    ) -> Result<()> {
        let rank = self
            .levels
            .rank(level)
            .ok_or_else(|| LogError::UnknownLevel(level.to_string()))?;

        if !self.is_allowed(module_id, level) {
            return Ok(());
        }

        let message = if self.show_module {
            format!("[{module_id}] - {message}")
        } else {
            message.to_string()
        };

        let record = LogRecord {
            level: level.to_string(),
            rank,
            module_id: module_id.to_string(),
            message,
            meta,
            timestamp: (self.timestamp)(),
        };

        let mut first_error = None;
        for sink in &self.sinks {
            if let Err(error) = sink.write(&record) {
                tracing::error!(sink = sink.name(), %error, "sink write failed");
                if first_error.is_none() {
                    first_error = Some(error);
                }
            }
        }

        match first_error {
            None => Ok(()),
            Some(error) if self.exit_on_error => Err(LogError::Fatal(Box::new(error))),
            Some(error) => Err(error),
        }
    }

    /// Returns whether a module may emit at the given level.
    #[must_use]
    pub fn is_allowed(&self, module_id: &str, level: &str) -> bool {
        self.filters.read().is_allowed(module_id, level)
    }

    /// Replaces both filter lists in one atomic swap.
    ///
    /// Concurrent evaluations see either the old set or the new one, never
    /// a partial mutation.
    ///
    /// # Errors
    ///
    /// Returns an error if any pattern fails to compile; the previous set
    /// stays in place.
    pub fn replace_filters(
        &self,
        include: &[FilterRuleConfig],
        exclude: &[FilterRuleConfig],
    ) -> Result<()> {
        let compiled = FilterSet::compile(include, exclude)?;
        *self.filters.write() = Arc::new(compiled);
        Ok(())
    }

    /// Returns the configured level set.
    #[must_use]
    pub const fn levels(&self) -> &LevelSet {
        &self.levels
    }

    /// Returns the number of configured sinks.
    #[must_use]
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Creates a proxy bound to the module identifier.
    #[must_use]
    pub fn module(self: &Arc<Self>, module_id: impl Into<String>) -> ModuleLogger {
        ModuleLogger::new(Arc::clone(self), module_id)
    }
}
