use super::{checker::*, error::*};

use {
    duration_str::*,
    http::*,
    regex::*,
    std::{fmt, result::Result, time::*},
};

//
// PathRule
//

/// Path rule: an anchored path pattern bound to a maximum acceptable age.
///
/// The pattern is a [regex](regex::Regex) matched against the URI path. It is always anchored at
/// the start of the path and must end at a segment boundary (`/` or the end of the path), so that
/// a pattern for `/users` matches `/users` and `/users/x` but never `/userspecial`.
///
/// A pattern that already ends in `/` or `$` states its own ending and is used as is, so `/users/`
/// matches `/users/x` (but not `/users`). Empty patterns are rejected.
#[derive(Clone, Debug)]
pub struct PathRule {
    /// Category name (informational).
    pub category: String,

    /// Pattern as provided.
    pub pattern: String,

    /// Maximum acceptable age (inclusive).
    pub max_age: Duration,

    regex: Regex,
}

impl PathRule {
    /// Constructor.
    pub fn new(category: &str, pattern: &str, max_age: Duration) -> Result<Self, RuleError> {
        if pattern.is_empty() {
            return Err(RuleError::EmptyPattern {
                category: category.into(),
            });
        }

        // A leading "^" is redundant but harmless
        let anchored = if pattern.ends_with('/') || pattern.ends_with('$') {
            format!("^(?:{})", pattern)
        } else {
            format!("^(?:{})(?:/|$)", pattern)
        };
        let regex = Regex::new(&anchored).map_err(|source| RuleError::Pattern {
            category: category.into(),
            pattern: pattern.into(),
            source,
        })?;

        Ok(Self {
            category: category.into(),
            pattern: pattern.into(),
            max_age,
            regex,
        })
    }

    /// Whether the path matches.
    pub fn matches(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }
}

impl fmt::Display for PathRule {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(
            formatter,
            "{} {} <= {}",
            self.category,
            self.pattern,
            self.max_age.human_format()
        )
    }
}

//
// Resolution
//

/// How to resolve a path that matches more than one rule.
///
/// Whichever is chosen, it is fixed for the lifetime of the checker.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Resolution {
    /// The smallest matching ceiling applies, i.e. the age must satisfy every matching rule.
    #[default]
    Strictest,

    /// The largest matching ceiling applies, i.e. the age must satisfy at least one matching
    /// rule.
    Loosest,

    /// The first matching rule in declaration order applies.
    FirstMatch,
}

//
// PathRuleChecker
//

/// [FreshnessChecker] that matches the URI path against an ordered list of [PathRule].
///
/// The comparison is inclusive: an age equal to the ceiling is still fresh. A path that matches
/// no rule is never fresh.
///
/// When several rules match, the default [Resolution::Strictest] applies the smallest of their
/// ceilings, so the age must satisfy every matching rule. Use [Resolution::Loosest] to require only
/// one of them.
#[derive(Clone, Debug, Default)]
pub struct PathRuleChecker {
    /// Rules in declaration order.
    pub rules: Vec<PathRule>,

    /// Multi-match resolution.
    pub resolution: Resolution,
}

impl PathRuleChecker {
    /// Constructor.
    pub fn new(rules: Vec<PathRule>, resolution: Resolution) -> Self {
        Self { rules, resolution }
    }

    /// Add a rule.
    pub fn with_rule(mut self, rule: PathRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Set the multi-match resolution.
    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    /// The ceiling that applies to the path, if any rule matches.
    pub fn ceiling(&self, path: &str) -> Option<Duration> {
        let mut matching = self.rules.iter().filter(|rule| rule.matches(path));

        match self.resolution {
            Resolution::Strictest => matching.map(|rule| rule.max_age).min(),
            Resolution::Loosest => matching.map(|rule| rule.max_age).max(),
            Resolution::FirstMatch => matching.next().map(|rule| rule.max_age),
        }
    }
}

impl FreshnessChecker for PathRuleChecker {
    fn valid(&self, uri: &Uri, age: Duration) -> bool {
        let path = uri.path();
        match self.ceiling(path) {
            Some(ceiling) => {
                let valid = age <= ceiling;
                tracing::trace!(
                    "{}: age {} vs. max age {}: {}",
                    path,
                    age.human_format(),
                    ceiling.human_format(),
                    valid
                );
                valid
            }

            None => {
                tracing::trace!("{}: no matching rule", path);
                false
            }
        }
    }
}
