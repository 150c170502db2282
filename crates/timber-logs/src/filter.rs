//! Module-scoped include/exclude filtering.
//!
//! This module provides:
//! - [`FilterPattern`] — the wildcard `*` or a compiled regular expression
//! - [`FilterRule`] — a pattern plus the level names it applies to
//! - [`FilterSet`] — ordered include/exclude lists with first-match-wins
//!   evaluation and a default-deny outcome

use regex::Regex;

use crate::config::FilterRuleConfig;
use crate::error::{LogError, Result};

/// The pattern string that matches every module identifier.
pub const WILDCARD: &str = "*";

/// A compiled filter pattern.
#[derive(Debug, Clone)]
pub enum FilterPattern {
    /// Matches every module identifier.
    Wildcard,
    /// Matches module identifiers by regular-expression search.
    Pattern(Regex),
}

impl FilterPattern {
    /// Compiles a pattern string, treating `*` as the wildcard.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is not a valid regular expression.
    pub fn compile(pattern: &str) -> Result<Self> {
        if pattern == WILDCARD {
            return Ok(Self::Wildcard);
        }
        let regex = Regex::new(pattern).map_err(|source| LogError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self::Pattern(regex))
    }

    /// Returns true if the pattern matches the module identifier.
    ///
    /// Regular expressions use search semantics; they are not anchored to
    /// the full identifier.
    #[must_use]
    pub fn matches(&self, module_id: &str) -> bool {
        match self {
            Self::Wildcard => true,
            Self::Pattern(regex) => regex.is_match(module_id),
        }
    }

    /// Returns true if this is the wildcard pattern.
    #[must_use]
    pub const fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard)
    }
}

/// A single include or exclude rule.
#[derive(Debug, Clone)]
pub struct FilterRule {
    pattern: FilterPattern,
    levels: Vec<String>,
}

impl FilterRule {
    /// Compiles a rule from its configuration shape.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern fails to compile.
    pub fn compile(config: &FilterRuleConfig) -> Result<Self> {
        Ok(Self {
            pattern: FilterPattern::compile(&config.pattern)?,
            levels: config.levels.clone(),
        })
    }

    /// Returns true if the rule applies to the level and matches the module.
    ///
    /// A rule with an empty level list never matches.
    #[must_use]
    pub fn matches(&self, module_id: &str, level: &str) -> bool {
        self.levels.iter().any(|name| name == level) && self.pattern.matches(module_id)
    }

    /// Returns true if the rule's pattern is the wildcard.
    #[must_use]
    pub const fn is_wildcard(&self) -> bool {
        self.pattern.is_wildcard()
    }
}

/// Ordered include/exclude rule lists, evaluated per log call.
///
/// The compiled set is immutable; the router swaps in a whole new set to
/// change filtering at runtime.
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    include: Vec<FilterRule>,
    exclude: Vec<FilterRule>,
}

impl FilterSet {
    /// Compiles a filter set from configuration rule lists.
    ///
    /// Pattern validation happens here, never during evaluation.
    ///
    /// # Errors
    ///
    /// Returns an error if any pattern fails to compile.
    pub fn compile(include: &[FilterRuleConfig], exclude: &[FilterRuleConfig]) -> Result<Self> {
        Ok(Self {
            include: include
                .iter()
                .map(FilterRule::compile)
                .collect::<Result<_>>()?,
            exclude: exclude
                .iter()
                .map(FilterRule::compile)
                .collect::<Result<_>>()?,
        })
    }

    /// Decides whether a module may emit at the given level.
    ///
    /// The include list is scanned in order and the first matching rule
    /// wins; no match means denied. Exclude rules are consulted only when
    /// the winning include rule was the wildcard: a specific include grant
    /// is final and bypasses every exclude rule.
    #[must_use]
    pub fn is_allowed(&self, module_id: &str, level: &str) -> bool {
        let Some(winner) = self
            .include
            .iter()
            .find(|rule| rule.matches(module_id, level))
        else {
            return false;
        };

        if winner.is_wildcard() {
            let excluded = self
                .exclude
                .iter()
                .any(|rule| rule.matches(module_id, level));
            if excluded {
                return false;
            }
        }

        true
    }

    /// Returns the number of include rules.
    #[must_use]
    pub fn include_len(&self) -> usize {
        self.include.len()
    }

    /// Returns the number of exclude rules.
    #[must_use]
    pub fn exclude_len(&self) -> usize {
        self.exclude.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    const ALL_LEVELS: &[&str] = &["debug", "info", "warn", "error"];

    fn compile(include: &[FilterRuleConfig], exclude: &[FilterRuleConfig]) -> FilterSet {
        FilterSet::compile(include, exclude).expect("rules should compile")
    }

    // ===========================================
    // FilterPattern Tests
    // ===========================================

    #[test]
    fn pattern_wildcard_matches_everything() {
        let pattern = FilterPattern::compile("*").expect("wildcard compiles");
        assert!(pattern.is_wildcard());
        assert!(pattern.matches("/anything/at/all"));
        assert!(pattern.matches(""));
    }

    #[test]
    fn pattern_regex_uses_search_semantics() {
        let pattern = FilterPattern::compile("/test/").expect("pattern compiles");
        assert!(!pattern.is_wildcard());
        assert!(pattern.matches("/app/test/x"));
        assert!(pattern.matches("/test/"));
        assert!(!pattern.matches("/app/prod/x"));
    }

    #[test]
    fn pattern_invalid_regex_is_a_load_time_error() {
        let result = FilterPattern::compile("(unclosed");
        assert!(matches!(result, Err(LogError::InvalidPattern { .. })));
    }

    // ===========================================
    // FilterRule Tests
    // ===========================================

    #[test]
    fn rule_with_empty_levels_never_matches() {
        let rule = FilterRule::compile(&FilterRuleConfig::new("*", &[])).expect("compiles");
        assert!(!rule.matches("/app/x", "debug"));
        assert!(!rule.matches("/app/x", "error"));
    }

    #[test]
    fn rule_requires_both_level_and_pattern() {
        let rule =
            FilterRule::compile(&FilterRuleConfig::new("/db/", &["warn"])).expect("compiles");
        assert!(rule.matches("/app/db/pool", "warn"));
        assert!(!rule.matches("/app/db/pool", "debug"));
        assert!(!rule.matches("/app/http", "warn"));
    }

    // ===========================================
    // FilterSet Tests
    // ===========================================

    #[test]
    fn empty_lists_deny_everything() {
        let filters = compile(&[], &[]);
        assert!(!filters.is_allowed("/app/x", "debug"));
        assert!(!filters.is_allowed("", "error"));
    }

    #[test]
    fn no_matching_include_denies() {
        let filters = compile(&[FilterRuleConfig::new("/db/", &["warn"])], &[]);
        assert!(!filters.is_allowed("/app/http", "warn"));
        assert!(!filters.is_allowed("/app/db/pool", "debug"));
    }

    #[test_case("debug", false ; "excluded level is denied")]
    #[test_case("info", false ; "other excluded level is denied")]
    #[test_case("error", true ; "level outside the exclude rule passes")]
    fn wildcard_include_then_exclude(level: &str, expected: bool) {
        let filters = compile(
            &[FilterRuleConfig::new("*", ALL_LEVELS)],
            &[FilterRuleConfig::new("/test/", &["debug", "info"])],
        );
        assert_eq!(filters.is_allowed("/app/test/x", level), expected);
    }

    #[test]
    fn wildcard_include_passes_unexcluded_modules() {
        let filters = compile(
            &[FilterRuleConfig::new("*", ALL_LEVELS)],
            &[FilterRuleConfig::new("/test/", &["debug", "info"])],
        );
        assert!(filters.is_allowed("/app/prod/x", "debug"));
    }

    #[test]
    fn specific_include_bypasses_exclude() {
        // A non-wildcard include grant is final, even when an exclude rule
        // covers the same module and level.
        let filters = compile(
            &[FilterRuleConfig::new("/special/", &["debug"])],
            &[FilterRuleConfig::new("/special/", ALL_LEVELS)],
        );
        assert!(filters.is_allowed("/special/y", "debug"));
    }

    #[test]
    fn include_order_is_first_match_wins() {
        // The specific rule sits before the wildcard, so /special/ debug
        // calls win through it and skip the exclude scan entirely.
        let filters = compile(
            &[
                FilterRuleConfig::new("/special/", &["debug"]),
                FilterRuleConfig::new("*", ALL_LEVELS),
            ],
            &[FilterRuleConfig::new("/special/", ALL_LEVELS)],
        );
        assert!(filters.is_allowed("/special/y", "debug"));
        // At info the specific rule does not apply; the wildcard matches and
        // the exclude rule takes the call away.
        assert!(!filters.is_allowed("/special/y", "info"));
    }

    #[test]
    fn exclude_rule_with_nonmatching_level_does_not_fire() {
        let filters = compile(
            &[FilterRuleConfig::new("*", ALL_LEVELS)],
            &[FilterRuleConfig::new("/test/", &[])],
        );
        assert!(filters.is_allowed("/app/test/x", "debug"));
    }

    #[test]
    fn is_allowed_is_idempotent() {
        let filters = compile(
            &[FilterRuleConfig::new("*", ALL_LEVELS)],
            &[FilterRuleConfig::new("/noisy/", &["debug"])],
        );
        let first = filters.is_allowed("/app/noisy/x", "debug");
        for _ in 0..100 {
            assert_eq!(filters.is_allowed("/app/noisy/x", "debug"), first);
        }
    }

    #[test]
    fn compile_reports_the_offending_pattern() {
        let result = FilterSet::compile(
            &[FilterRuleConfig::new("(unclosed", &["debug"])],
            &[],
        );
        let err = result.expect_err("pattern should fail to compile");
        assert!(matches!(err, LogError::InvalidPattern { .. }));
        if let LogError::InvalidPattern { pattern, .. } = err {
            assert_eq!(pattern, "(unclosed");
        }
    }

    #[test]
    fn compile_validates_exclude_patterns_too() {
        let result = FilterSet::compile(
            &[],
            &[FilterRuleConfig::new("[bad", &["debug"])],
        );
        assert!(matches!(result, Err(LogError::InvalidPattern { .. })));
    }
}
