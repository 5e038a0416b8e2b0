use super::configuration::*;

use {
    http::{header::*, *},
    std::time::*,
};

//
// RevalidationRequest
//

/// Revalidation request.
pub trait RevalidationRequest {
    /// Whether the request carries cache validators (`If-None-Match` or `If-Modified-Since`).
    ///
    /// Empty values do not count.
    fn has_cache_validator(&self) -> bool;

    /// The age marker.
    ///
    /// [None] if absent or if it is not a non-negative integer count of seconds.
    fn cache_age(&self, age_header: &HeaderName) -> Option<Duration>;

    /// Whether the configured checker considers the cached entry still fresh.
    ///
    /// False if any of the inputs are missing.
    fn still_fresh(&self, configuration: &RevalidationConfiguration) -> bool;
}

impl<RequestBodyT> RevalidationRequest for Request<RequestBodyT> {
    fn has_cache_validator(&self) -> bool {
        let headers = self.headers();
        has_value(headers, IF_NONE_MATCH) || has_value(headers, IF_MODIFIED_SINCE)
    }

    fn cache_age(&self, age_header: &HeaderName) -> Option<Duration> {
        let value = self.headers().get(age_header)?;
        let value = value.to_str().ok()?.trim();

        // u64::from_str would accept a leading "+"
        if value.is_empty() || !value.bytes().all(|byte| byte.is_ascii_digit()) {
            return None;
        }

        value.parse().ok().map(Duration::from_secs)
    }

    fn still_fresh(&self, configuration: &RevalidationConfiguration) -> bool {
        let Some(checker) = &configuration.checker else {
            tracing::debug!("pass (disabled)");
            return false;
        };

        if !self.has_cache_validator() {
            tracing::debug!("pass (no cache validators)");
            return false;
        }

        let Some(age) = self.cache_age(&configuration.age_header) else {
            tracing::debug!("pass (missing or malformed {})", configuration.age_header);
            return false;
        };

        if checker.valid(self.uri(), age) {
            tracing::debug!("fresh: {} ({}s)", self.uri(), age.as_secs());
            true
        } else {
            tracing::debug!("stale: {} ({}s)", self.uri(), age.as_secs());
            false
        }
    }
}

fn has_value(headers: &HeaderMap, name: HeaderName) -> bool {
    headers
        .get_all(name)
        .iter()
        .any(|value| !value.as_bytes().is_empty())
}

#[cfg(test)]
mod tests {
    use {super::*, std::sync::*};

    fn request(headers: &[(&str, &str)]) -> Request<()> {
        let mut builder = Request::get("http://api.example.com/repos/acme/widgets");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(()).expect("request")
    }

    #[test]
    fn cache_validators() {
        assert!(!request(&[]).has_cache_validator());
        assert!(!request(&[("If-None-Match", "")]).has_cache_validator());
        assert!(request(&[("If-None-Match", "\"abc\"")]).has_cache_validator());
        assert!(
            request(&[("If-Modified-Since", "Wed, 21 Oct 2015 07:28:00 GMT")])
                .has_cache_validator()
        );
    }

    #[test]
    fn cache_age() {
        let age = |value: &str| request(&[("X-Cache-Age", value)]).cache_age(&X_CACHE_AGE);

        assert_eq!(request(&[]).cache_age(&X_CACHE_AGE), None);
        assert_eq!(age("0"), Some(Duration::ZERO));
        assert_eq!(age("3600"), Some(Duration::from_secs(3600)));
        assert_eq!(age(" 42 "), Some(Duration::from_secs(42)));
        assert_eq!(age(""), None);
        assert_eq!(age("-1"), None);
        assert_eq!(age("+1"), None);
        assert_eq!(age("1.5"), None);
        assert_eq!(age("1h"), None);
        assert_eq!(age("99999999999999999999999"), None);
    }

    #[test]
    fn custom_age_header() {
        let name = HeaderName::from_static("x-stale-for");
        let request = request(&[("X-Stale-For", "7")]);
        assert_eq!(request.cache_age(&name), Some(Duration::from_secs(7)));
        assert_eq!(request.cache_age(&X_CACHE_AGE), None);
    }

    #[test]
    fn still_fresh_requires_everything() {
        let configuration = RevalidationConfiguration {
            checker: Some(Arc::new(|_uri: &Uri, _age: Duration| true)),
            ..Default::default()
        };

        assert!(
            request(&[("If-None-Match", "\"x\""), ("X-Cache-Age", "1")])
                .still_fresh(&configuration)
        );
        assert!(!request(&[("X-Cache-Age", "1")]).still_fresh(&configuration));
        assert!(!request(&[("If-None-Match", "\"x\"")]).still_fresh(&configuration));
        assert!(
            !request(&[("If-None-Match", "\"x\""), ("X-Cache-Age", "1")])
                .still_fresh(&RevalidationConfiguration::default())
        );
    }
}
