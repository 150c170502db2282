//! Console sink with per-level coloring.
//!
//! Mirrors the file sink's line format on standard output. Colors come from
//! the configuration's level → color-name map; unknown color names render
//! without color.

use std::collections::HashMap;
use std::io::Write;

use parking_lot::Mutex;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::error::Result;
use crate::format;
use crate::traits::Sink;
use crate::types::LogRecord;

/// Configuration for a console sink.
#[derive(Debug, Clone)]
pub struct ConsoleSinkConfig {
    /// Level name → color name (`white`, `blue`, `yellow`, `red`, ...).
    pub colors: HashMap<String, String>,
    /// When false, no color escapes are emitted.
    pub colorize: bool,
    /// When set, writes succeed without any output.
    pub silent: bool,
    /// Minimum rank a record needs to be written.
    pub min_rank: u32,
}

impl Default for ConsoleSinkConfig {
    fn default() -> Self {
        Self {
            colors: HashMap::new(),
            colorize: true,
            silent: false,
            min_rank: 0,
        }
    }
}

/// Parses a configuration color name.
#[must_use]
pub fn parse_color(name: &str) -> Option<Color> {
    match name.to_ascii_lowercase().as_str() {
        "black" => Some(Color::Black),
        "blue" => Some(Color::Blue),
        "green" => Some(Color::Green),
        "red" => Some(Color::Red),
        "cyan" => Some(Color::Cyan),
        "magenta" => Some(Color::Magenta),
        "yellow" => Some(Color::Yellow),
        "white" => Some(Color::White),
        _ => None,
    }
}

/// Sink that writes the shared line format to standard output, coloring the
/// level name per configuration.
pub struct ConsoleSink {
    config: ConsoleSinkConfig,
    /// Level name → resolved color; unknown names are dropped here.
    colors: HashMap<String, Color>,
    stream: Mutex<StandardStream>,
}

impl ConsoleSink {
    /// Creates the sink, resolving color names up front.
    #[must_use]
    pub fn new(config: ConsoleSinkConfig) -> Self {
        let colors = config
            .colors
            .iter()
            .filter_map(|(level, name)| {
                let Some(color) = parse_color(name) else {
                    tracing::debug!(level, color = name, "unknown console color name");
                    return None;
                };
                Some((level.clone(), color))
            })
            .collect();

        let choice = if config.colorize {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };

        Self {
            config,
            colors,
            stream: Mutex::new(StandardStream::stdout(choice)),
        }
    }

    /// Returns the resolved color for a level, if any.
    #[must_use]
    pub fn level_color(&self, level: &str) -> Option<Color> {
        self.colors.get(level).copied()
    }
}

impl Sink for ConsoleSink {
    fn write(&self, record: &LogRecord) -> Result<()> {
        if self.config.silent || record.rank < self.config.min_rank {
            return Ok(());
        }

        let mut stream = self.stream.lock();
        write!(stream, "{} - ", record.timestamp)?;
        match self.colors.get(&record.level) {
            Some(color) if self.config.colorize => {
                stream.set_color(ColorSpec::new().set_fg(Some(*color)))?;
                write!(stream, "{}", record.level)?;
                stream.reset()?;
            }
            _ => write!(stream, "{}", record.level)?,
        }
        writeln!(
            stream,
            ": {}{}",
            record.message,
            format::format_meta(record.meta.as_ref())
        )?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn make_record(rank: u32) -> LogRecord {
        LogRecord {
            level: "info".to_string(),
            rank,
            module_id: "/app".to_string(),
            message: "hello".to_string(),
            meta: None,
            timestamp: "t".to_string(),
        }
    }

    #[test_case("white", Some(Color::White))]
    #[test_case("BLUE", Some(Color::Blue))]
    #[test_case("yellow", Some(Color::Yellow))]
    #[test_case("red", Some(Color::Red))]
    #[test_case("chartreuse", None)]
    fn color_names(name: &str, expected: Option<Color>) {
        assert_eq!(parse_color(name), expected);
    }

    #[test]
    fn unknown_color_names_are_dropped_at_construction() {
        let config = ConsoleSinkConfig {
            colors: [
                ("info".to_string(), "blue".to_string()),
                ("warn".to_string(), "tartan".to_string()),
            ]
            .into_iter()
            .collect(),
            ..Default::default()
        };
        let sink = ConsoleSink::new(config);
        assert_eq!(sink.level_color("info"), Some(Color::Blue));
        assert_eq!(sink.level_color("warn"), None);
    }

    #[test]
    fn silent_write_is_a_no_op_success() {
        let sink = ConsoleSink::new(ConsoleSinkConfig {
            silent: true,
            ..Default::default()
        });
        assert!(sink.write(&make_record(1)).is_ok());
    }

    #[test]
    fn below_threshold_write_is_skipped() {
        let sink = ConsoleSink::new(ConsoleSinkConfig {
            min_rank: 3,
            ..Default::default()
        });
        assert!(sink.write(&make_record(1)).is_ok());
    }

    #[test]
    fn write_succeeds() {
        let sink = ConsoleSink::new(ConsoleSinkConfig::default());
        assert!(sink.write(&make_record(1)).is_ok());
        assert_eq!(sink.name(), "console");
    }
}
