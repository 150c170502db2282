//! # timber-logs
//!
//! Module-scoped logging with rotating file sinks.
//!
//! This crate provides:
//!
//! - [`LevelSet`] — named severity levels with caller-defined ranks
//! - [`FilterSet`] — ordered include/exclude rules deciding, per call,
//!   whether a module may emit at a level
//! - [`RotatingFileSink`] — durable line-oriented sink that archives the
//!   previous run's file on first write and bounds the archives kept
//! - [`ConsoleSink`] — the same line format on stdout, with per-level color
//! - [`Router`] — the dispatcher wiring filters and sinks together
//! - [`ModuleLogger`] — a per-module handle with one method per level
//!
//! Configuration discovery and parsing happen outside this crate; hosts
//! build one [`Router`] from a resolved [`LogConfig`] and hand out module
//! proxies.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use timber_logs::{FilterRuleConfig, LogConfig, Router};
//!
//! let config = LogConfig::default()
//!     .with_sinks(Vec::new()) // keep the example off the filesystem
//!     .with_exclude_filter(FilterRuleConfig::new("/noisy/", &["debug"]));
//!
//! let router = Arc::new(Router::from_config(&config));
//! let log = router.module("/app/server");
//!
//! log.info("listening on 8080")?;
//! log.debug("request accepted")?;
//! # Ok::<(), timber_logs::LogError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod console;
pub mod error;
pub mod file_sink;
pub mod filter;
pub mod format;
pub mod logger;
pub mod router;
pub mod traits;
pub mod types;

// Re-export main types
pub use config::{FilterRuleConfig, LogConfig, SinkConfig, SinkKind};
pub use console::{ConsoleSink, ConsoleSinkConfig};
pub use error::{LogError, Result};
pub use file_sink::{FileSinkConfig, RotatingFileSink};
pub use filter::{FilterPattern, FilterRule, FilterSet, WILDCARD};
pub use format::{
    TimestampFn, TimestampSettings, default_timestamp_fn, format_line, format_meta,
    format_timestamp,
};
pub use logger::ModuleLogger;
pub use router::Router;
pub use traits::Sink;
pub use types::{LevelSet, LogRecord};
