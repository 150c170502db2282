//! Timestamp and line formatting shared by all sinks.
//!
//! Every sink emits the same line shape:
//! `<timestamp> - <level>: <message><meta>\n`, where `<meta>` is a
//! pretty-printed JSON payload or the empty string.

use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::LogRecord;

/// Shape of the default timestamp formatter's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimestampSettings {
    /// Prefix the time with `YYYY-MM-DD`.
    pub include_date: bool,
    /// Append `.mmm` milliseconds to the time.
    pub include_milliseconds: bool,
}

impl Default for TimestampSettings {
    fn default() -> Self {
        Self {
            include_date: true,
            include_milliseconds: true,
        }
    }
}

/// A caller-supplied timestamp function.
///
/// Invoked once per dispatch; the returned string is used verbatim.
pub type TimestampFn = Arc<dyn Fn() -> String + Send + Sync>;

/// Formats a local datetime according to the settings.
///
/// Full shape is `YYYY-MM-DD HH:MM:SS.mmm`; the date and millisecond parts
/// drop out per the settings.
#[must_use]
pub fn format_timestamp(datetime: NaiveDateTime, settings: TimestampSettings) -> String {
    let pattern = match (settings.include_date, settings.include_milliseconds) {
        (true, true) => "%Y-%m-%d %H:%M:%S%.3f",
        (true, false) => "%Y-%m-%d %H:%M:%S",
        (false, true) => "%H:%M:%S%.3f",
        (false, false) => "%H:%M:%S",
    };
    datetime.format(pattern).to_string()
}

/// Returns the default timestamp function: current local time, shaped by the
/// settings.
#[must_use]
pub fn default_timestamp_fn(settings: TimestampSettings) -> TimestampFn {
    Arc::new(move || format_timestamp(Local::now().naive_local(), settings))
}

/// Serializes a structured payload for appending to a log line.
///
/// Absent payloads and empty objects produce the empty string; everything
/// else is pretty-printed JSON.
#[must_use]
pub fn format_meta(meta: Option<&Value>) -> String {
    match meta {
        None => String::new(),
        Some(Value::Object(map)) if map.is_empty() => String::new(),
        Some(value) => serde_json::to_string_pretty(value).unwrap_or_default(),
    }
}

/// Formats a record as a single newline-terminated log line.
#[must_use]
pub fn format_line(record: &LogRecord) -> String {
    format!(
        "{} - {}: {}{}\n",
        record.timestamp,
        record.level,
        record.message,
        format_meta(record.meta.as_ref())
    )
}
