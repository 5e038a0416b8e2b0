use thiserror::*;

//
// RuleError
//

/// Rule construction error.
///
/// These can only happen while building a rule set, never while handling requests.
#[derive(Debug, Error)]
pub enum RuleError {
    /// Invalid path pattern.
    #[error("invalid path pattern for {category:?}: {pattern:?}: {source}")]
    Pattern {
        /// Category.
        category: String,

        /// Pattern as provided.
        pattern: String,

        /// Regex error.
        source: regex::Error,
    },

    /// Empty path pattern.
    #[error("empty path pattern for {category:?}")]
    EmptyPattern {
        /// Category.
        category: String,
    },

    /// Invalid duration.
    #[error("invalid max age for {category:?}: {duration:?}: {message}")]
    Duration {
        /// Category.
        category: String,

        /// Duration as provided.
        duration: String,

        /// Parser message.
        message: String,
    },
}
