use {
    duration_str::*,
    http::*,
    std::{sync::*, time::*},
};

/// Common reference type for [FreshnessChecker].
pub type FreshnessCheckerRef = Arc<dyn FreshnessChecker>;

//
// FreshnessChecker
//

/// Decides whether a cached entry that the cache considers stale should still be treated as
/// fresh.
///
/// Implementations must be pure: the answer may depend only on the arguments and on
/// configuration fixed at construction. They will be called concurrently from many requests.
///
/// Closures with the signature `Fn(&Uri, Duration) -> bool` are checkers, too.
pub trait FreshnessChecker
where
    Self: Send + Sync,
{
    /// True if the cached copy of `uri`, last validated `age` ago, is still acceptable.
    fn valid(&self, uri: &Uri, age: Duration) -> bool;
}

impl<FunctionT> FreshnessChecker for FunctionT
where
    FunctionT: Fn(&Uri, Duration) -> bool + Send + Sync,
{
    fn valid(&self, uri: &Uri, age: Duration) -> bool {
        self(uri, age)
    }
}

//
// NeverFresh
//

/// [FreshnessChecker] that never overrides.
///
/// Equivalent to configuring no checker at all.
#[derive(Clone, Copy, Debug, Default)]
pub struct NeverFresh;

impl FreshnessChecker for NeverFresh {
    fn valid(&self, _uri: &Uri, _age: Duration) -> bool {
        false
    }
}

//
// UniformMaxAge
//

/// [FreshnessChecker] with a single ceiling for every resource.
///
/// In effect this means "only revalidate entries older than `max_age`".
#[derive(Clone, Copy, Debug)]
pub struct UniformMaxAge {
    /// Maximum acceptable age (inclusive).
    pub max_age: Duration,
}

impl UniformMaxAge {
    /// Constructor.
    pub fn new(max_age: Duration) -> Self {
        Self { max_age }
    }
}

impl FreshnessChecker for UniformMaxAge {
    fn valid(&self, uri: &Uri, age: Duration) -> bool {
        let valid = age <= self.max_age;
        tracing::trace!(
            "{}: age {} vs. uniform {}: {}",
            uri.path(),
            age.human_format(),
            self.max_age.human_format(),
            valid
        );
        valid
    }
}

//
// AnyChecker
//

/// Composite [FreshnessChecker] that is valid if any of its checkers is valid.
///
/// Checkers are consulted in order and evaluation stops at the first that says yes. An empty
/// composite is never valid.
#[derive(Clone, Default)]
pub struct AnyChecker {
    /// Checkers.
    pub checkers: Vec<FreshnessCheckerRef>,
}

impl AnyChecker {
    /// Constructor.
    pub fn new(checkers: Vec<FreshnessCheckerRef>) -> Self {
        Self { checkers }
    }

    /// Add a checker.
    pub fn with(mut self, checker: impl FreshnessChecker + 'static) -> Self {
        self.checkers.push(Arc::new(checker));
        self
    }
}

impl FreshnessChecker for AnyChecker {
    fn valid(&self, uri: &Uri, age: Duration) -> bool {
        self.checkers.iter().any(|checker| checker.valid(uri, age))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uri(path: &str) -> Uri {
        path.parse().expect("uri")
    }

    #[test]
    fn closure_is_a_checker() {
        let checker: FreshnessCheckerRef =
            Arc::new(|uri: &Uri, age: Duration| uri.path() == "/a" && age.as_secs() < 10);

        assert!(checker.valid(&uri("/a"), Duration::from_secs(9)));
        assert!(!checker.valid(&uri("/a"), Duration::from_secs(10)));
        assert!(!checker.valid(&uri("/b"), Duration::ZERO));
    }

    #[test]
    fn never_fresh() {
        assert!(!NeverFresh.valid(&uri("/anything"), Duration::ZERO));
    }

    #[test]
    fn uniform_is_inclusive() {
        let checker = UniformMaxAge::new(Duration::from_secs(60));
        assert!(checker.valid(&uri("/x"), Duration::from_secs(60)));
        assert!(!checker.valid(&uri("/x"), Duration::from_secs(61)));
    }

    #[test]
    fn any_checker() {
        let empty = AnyChecker::default();
        assert!(!empty.valid(&uri("/x"), Duration::ZERO));

        let checker = AnyChecker::default()
            .with(NeverFresh)
            .with(UniformMaxAge::new(Duration::from_secs(5)));
        assert!(checker.valid(&uri("/x"), Duration::from_secs(5)));
        assert!(!checker.valid(&uri("/x"), Duration::from_secs(6)));
    }
}
