//! Core types for the logging core.
//!
//! This module provides:
//! - [`LevelSet`] — named severity levels with unique numeric ranks
//! - [`LogRecord`] — one routed log call, immutable once constructed

use std::collections::HashMap;

use crate::error::{LogError, Result};

/// An ordered set of severity levels.
///
/// Levels are keyed by name and carry a numeric rank; a larger rank is more
/// severe. The set is caller-extensible but must contain at least one entry
/// and no two levels may share a rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelSet {
    ranks: HashMap<String, u32>,
    min_level: String,
}

impl LevelSet {
    /// Validates and builds a level set from a name → rank mapping.
    ///
    /// # Errors
    ///
    /// Returns an error if the mapping is empty or two levels share a rank.
    pub fn new(ranks: HashMap<String, u32>) -> Result<Self> {
        let mut seen: HashMap<u32, &str> = HashMap::new();
        for (name, &rank) in &ranks {
            if let Some(other) = seen.insert(rank, name.as_str()) {
                return Err(LogError::InvalidLevels(format!(
                    "levels `{other}` and `{name}` share rank {rank}"
                )));
            }
        }

        let min_level = ranks
            .iter()
            .min_by_key(|(_, rank)| **rank)
            .map(|(name, _)| name.clone())
            .ok_or_else(|| {
                LogError::InvalidLevels("at least one level is required".to_string())
            })?;

        Ok(Self { ranks, min_level })
    }

    /// Returns the rank of a level, or `None` if the name is not configured.
    #[must_use]
    pub fn rank(&self, name: &str) -> Option<u32> {
        self.ranks.get(name).copied()
    }

    /// Returns true if the level name is configured.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.ranks.contains_key(name)
    }

    /// Returns the name of the least severe configured level.
    #[must_use]
    pub fn min_level(&self) -> &str {
        &self.min_level
    }

    /// Returns the lowest configured rank.
    #[must_use]
    pub fn min_rank(&self) -> u32 {
        self.ranks.get(&self.min_level).copied().unwrap_or(0)
    }

    /// Returns the number of configured levels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    /// Returns true if no levels are configured. Always false for a set
    /// built through [`LevelSet::new`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// Iterates over the configured level names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.ranks.keys().map(String::as_str)
    }
}

impl Default for LevelSet {
    /// The built-in four-level set: `debug` < `info` < `warn` < `error`.
    fn default() -> Self {
        let ranks = [
            ("debug".to_string(), 0),
            ("info".to_string(), 1),
            ("warn".to_string(), 2),
            ("error".to_string(), 3),
        ]
        .into_iter()
        .collect();

        Self {
            ranks,
            min_level: "debug".to_string(),
        }
    }
}

/// One routed log call.
///
/// Produced fresh per dispatch by the router and handed to every sink;
/// immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    /// The level name, exactly as configured.
    pub level: String,
    /// The level's numeric rank, resolved against the router's level set.
    pub rank: u32,
    /// Identifier of the module that made the call.
    pub module_id: String,
    /// The message, already carrying the module prefix when configured.
    pub message: String,
    /// Optional structured payload.
    pub meta: Option<serde_json::Value>,
    /// Timestamp string, stamped once per dispatch.
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_ranks() -> HashMap<String, u32> {
        [("debug", 0), ("info", 1), ("warn", 2), ("error", 3)]
            .into_iter()
            .map(|(name, rank)| (name.to_string(), rank))
            .collect()
    }

    // ===========================================
    // LevelSet Tests
    // ===========================================

    #[test]
    fn level_set_ranks() {
        let levels = LevelSet::new(default_ranks()).expect("valid set");
        assert_eq!(levels.rank("debug"), Some(0));
        assert_eq!(levels.rank("error"), Some(3));
        assert_eq!(levels.rank("verbose"), None);
    }

    #[test]
    fn level_set_rejects_empty() {
        let result = LevelSet::new(HashMap::new());
        assert!(result.is_err());
    }

    #[test]
    fn level_set_rejects_duplicate_ranks() {
        let ranks = [("info".to_string(), 1), ("notice".to_string(), 1)]
            .into_iter()
            .collect();
        let result = LevelSet::new(ranks);
        assert!(matches!(result, Err(LogError::InvalidLevels(_))));
    }

    #[test]
    fn level_set_min_level() {
        let levels = LevelSet::new(default_ranks()).expect("valid set");
        assert_eq!(levels.min_level(), "debug");
        assert_eq!(levels.min_rank(), 0);
    }

    #[test]
    fn level_set_min_level_with_custom_ranks() {
        let ranks = [("quiet".to_string(), 10), ("loud".to_string(), 20)]
            .into_iter()
            .collect();
        let levels = LevelSet::new(ranks).expect("valid set");
        assert_eq!(levels.min_level(), "quiet");
        assert_eq!(levels.min_rank(), 10);
    }

    #[test]
    fn level_set_single_entry() {
        let ranks = [("only".to_string(), 7)].into_iter().collect();
        let levels = LevelSet::new(ranks).expect("valid set");
        assert_eq!(levels.len(), 1);
        assert_eq!(levels.min_level(), "only");
        assert!(levels.contains("only"));
    }

    #[test]
    fn level_set_default_is_the_four_level_set() {
        let levels = LevelSet::default();
        assert_eq!(levels.len(), 4);
        assert_eq!(levels.min_level(), "debug");
        assert_eq!(levels.rank("warn"), Some(2));
    }

    #[test]
    fn level_set_names() {
        let levels = LevelSet::default();
        let mut names: Vec<&str> = levels.names().collect();
        names.sort_unstable();
        assert_eq!(names, ["debug", "error", "info", "warn"]);
    }

    // ===========================================
    // LogRecord Tests
    // ===========================================

    #[test]
    fn log_record_holds_fields_verbatim() {
        let record = LogRecord {
            level: "Info".to_string(),
            rank: 1,
            module_id: "/app/server".to_string(),
            message: "Started".to_string(),
            meta: Some(serde_json::json!({"port": 8080})),
            timestamp: "2026-01-01 00:00:00.000".to_string(),
        };

        assert_eq!(record.level, "Info");
        assert_eq!(record.message, "Started");
        assert_eq!(record.module_id, "/app/server");
    }

    #[test]
    fn log_record_clone() {
        let record = LogRecord {
            level: "debug".to_string(),
            rank: 0,
            module_id: "/m".to_string(),
            message: "x".to_string(),
            meta: None,
            timestamp: "t".to_string(),
        };
        let cloned = record.clone();
        assert_eq!(record, cloned);
    }
}
