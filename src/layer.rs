use super::{freshness::*, revalidation::*, service::*};

use {
    http::header::*,
    std::sync::*,
    tower::*,
};

//
// RevalidationLayer
//

/// HTTP revalidation override layer.
///
/// This layer configures and installs a [RevalidationService].
///
/// It belongs in the *outbound* path of an HTTP client or proxy, between an HTTP cache and the
/// transport that reaches the origin. When the cache decides that an entry is stale it sends a
/// conditional request (with `If-None-Match` and/or `If-Modified-Since`) and marks it with the
/// entry's age in whole seconds (the `X-Cache-Age` header by default, see
/// [age_header](Self::age_header)). This layer gives a [FreshnessChecker] the chance to overrule
/// the cache and declare the entry still fresh, in which case we answer with a synthesized 304
/// (Not Modified) and the origin is never contacted.
///
/// [PathRuleChecker] (usually built with [RuleSetBuilder] or [ResourceMaxAges]) assigns maximum
/// ages per URL path pattern, but any [FreshnessChecker] will do, including a closure.
///
/// Request handling
/// ================
///
/// 1. If no checker is configured then pass the request to the inner service. END.
///
/// 2. If the request has neither `If-None-Match` nor `If-Modified-Since` then it is not a
///    revalidation attempt, so pass it to the inner service. END.
///
/// 3. If the age header is missing, or is not a non-negative integer, then pass the request to
///    the inner service. A malformed age is never an error. END.
///
/// 4. Ask the checker about the request's URI and age. If it says the entry is still fresh then
///    respond with 304 (Not Modified) and an empty body. The response mirrors the request's
///    version and `Transfer-Encoding` and carries an [OriginalRequest] extension. END.
///
/// 5. Otherwise pass the request to the inner service. Its response or error is returned as is.
///    END.
///
/// Note that the inner service's `poll_ready` is always honored, even for requests that will
/// end up being answered without it.
#[derive(Clone, Default)]
pub struct RevalidationLayer {
    revalidation: RevalidationConfiguration,
}

impl RevalidationLayer {
    /// Set the freshness checker.
    ///
    /// Without a checker this layer passes everything through.
    pub fn checker(self, checker: impl FreshnessChecker + 'static) -> Self {
        self.checker_ref(Arc::new(checker))
    }

    /// Set a shared freshness checker.
    ///
    /// Useful for sharing one checker between several layers.
    pub fn checker_ref(mut self, checker: FreshnessCheckerRef) -> Self {
        self.revalidation.checker = Some(checker);
        self
    }

    /// Set the age marker header.
    ///
    /// The default is [X_CACHE_AGE].
    pub fn age_header(mut self, age_header: HeaderName) -> Self {
        self.revalidation.age_header = age_header;
        self
    }
}

impl<InnerServiceT> Layer<InnerServiceT> for RevalidationLayer {
    type Service = RevalidationService<InnerServiceT>;

    fn layer(&self, inner_service: InnerServiceT) -> Self::Service {
        RevalidationService::new(inner_service, self.revalidation.clone())
    }
}
