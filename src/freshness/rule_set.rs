use super::{error::*, path::*};

use std::{result::Result, time::*};

//
// RuleSetBuilder
//

/// Builds a [PathRuleChecker] from named resource categories.
///
/// Each category binds one maximum age to one or more path patterns. Rules are created in the
/// order in which categories and their patterns are declared, which matters only for
/// [Resolution::FirstMatch].
///
/// Errors are deferred to [build](Self::build) so that calls can be chained.
#[derive(Debug, Default)]
pub struct RuleSetBuilder {
    categories: Vec<Category>,
    resolution: Resolution,
}

#[derive(Debug)]
struct Category {
    name: String,
    max_age: Result<Duration, RuleError>,
    patterns: Vec<String>,
}

impl RuleSetBuilder {
    /// Bind a category's maximum age to its path patterns.
    pub fn category<PatternT>(
        mut self,
        name: &str,
        max_age: Duration,
        patterns: impl IntoIterator<Item = PatternT>,
    ) -> Self
    where
        PatternT: Into<String>,
    {
        self.categories.push(Category {
            name: name.into(),
            max_age: Ok(max_age),
            patterns: patterns.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Bind a category's maximum age to its path patterns.
    ///
    /// The maximum age is parsed using [duration-str](https://github.com/baoyachi/duration-str),
    /// e.g. "24h" or "1h 30m".
    pub fn category_str<PatternT>(
        mut self,
        name: &str,
        max_age: &str,
        patterns: impl IntoIterator<Item = PatternT>,
    ) -> Self
    where
        PatternT: Into<String>,
    {
        let parsed = duration_str::parse(max_age).map_err(|error| RuleError::Duration {
            category: name.into(),
            duration: max_age.into(),
            message: error.to_string(),
        });

        self.categories.push(Category {
            name: name.into(),
            max_age: parsed,
            patterns: patterns.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Bind a category's maximum age to its path patterns if the maximum age is set.
    ///
    /// With [None] the category contributes no rules.
    pub fn optional_category<PatternT>(
        self,
        name: &str,
        max_age: Option<Duration>,
        patterns: impl IntoIterator<Item = PatternT>,
    ) -> Self
    where
        PatternT: Into<String>,
    {
        match max_age {
            Some(max_age) => self.category(name, max_age, patterns),
            None => self,
        }
    }

    /// Multi-match resolution.
    ///
    /// The default is [Resolution::Strictest].
    pub fn resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    /// Compile the rules.
    pub fn build(self) -> Result<PathRuleChecker, RuleError> {
        let mut rules = Vec::new();

        for category in self.categories {
            let max_age = category.max_age?;
            for pattern in &category.patterns {
                let rule = PathRule::new(&category.name, pattern, max_age)?;
                tracing::debug!("rule: {}", rule);
                rules.push(rule);
            }
        }

        tracing::info!(
            "built {} path rules ({:?} resolution)",
            rules.len(),
            self.resolution
        );

        Ok(PathRuleChecker::new(rules, self.resolution))
    }
}

/// Path patterns for the `repositories` category.
pub const REPOSITORIES_PATTERNS: &[&str] = &["/repositories$", "/user(s/[^/]+)?/repos$"];

/// Path patterns for the `repository` category.
pub const REPOSITORY_PATTERNS: &[&str] = &["/repos/[^/]+/[^/]+"];

/// Path patterns for the `user` category.
pub const USER_PATTERNS: &[&str] = &["/user(s/[^/]+)?$"];

/// Path patterns for the `activity` category.
pub const ACTIVITY_PATTERNS: &[&str] = &["/users/[^/]+/events/public$"];

//
// ResourceMaxAges
//

/// Maximum ages for GitHub-style API resources.
///
/// Categories left as [None] are not overridden, i.e. the cache's own verdict stands.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ResourceMaxAges {
    /// A user (`/user`, `/users/{user}`).
    pub user: Option<Duration>,

    /// A repository and everything under it (`/repos/{owner}/{name}/...`).
    pub repository: Option<Duration>,

    /// Repository listings (`/repositories`, `/user/repos`, `/users/{user}/repos`).
    pub repositories: Option<Duration>,

    /// A user's public activity feed (`/users/{user}/events/public`).
    pub activity: Option<Duration>,
}

impl ResourceMaxAges {
    /// [RuleSetBuilder] with our categories.
    pub fn rule_set(&self) -> RuleSetBuilder {
        RuleSetBuilder::default()
            .optional_category(
                "repositories",
                self.repositories,
                REPOSITORIES_PATTERNS.iter().copied(),
            )
            .optional_category(
                "repository",
                self.repository,
                REPOSITORY_PATTERNS.iter().copied(),
            )
            .optional_category("user", self.user, USER_PATTERNS.iter().copied())
            .optional_category("activity", self.activity, ACTIVITY_PATTERNS.iter().copied())
    }

    /// Build the [PathRuleChecker].
    pub fn checker(&self) -> Result<PathRuleChecker, RuleError> {
        self.rule_set().build()
    }
}
