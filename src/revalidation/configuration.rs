use super::super::freshness::*;

use http::header::*;

/// Default age marker header.
///
/// Its value is the number of whole seconds since the cached entry was last validated.
pub const X_CACHE_AGE: HeaderName = HeaderName::from_static("x-cache-age");

//
// RevalidationConfiguration
//

/// Revalidation configuration.
#[derive(Clone)]
pub struct RevalidationConfiguration {
    /// Freshness checker.
    ///
    /// [None] disables the override entirely.
    pub checker: Option<FreshnessCheckerRef>,

    /// Age marker header.
    pub age_header: HeaderName,
}

impl Default for RevalidationConfiguration {
    fn default() -> Self {
        Self {
            checker: None,
            age_header: X_CACHE_AGE,
        }
    }
}
