#![allow(dead_code)]

use {
    http::*,
    std::{
        future::{Ready, ready},
        result::Result,
        sync::{atomic::*, *},
        task::*,
    },
    tower::*,
    tracing_subscriber::*,
};

/// Install a test subscriber (respects `RUST_LOG`).
pub fn init_tracing() {
    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Header on which [MockOrigin] echoes the age marker it received.
pub const X_SEEN_AGE: &str = "x-seen-age";

//
// OriginError
//

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OriginError(pub &'static str);

//
// MockOrigin
//

/// Stands in for the transport that reaches the origin. Counts its calls.
#[derive(Clone, Default)]
pub struct MockOrigin {
    pub calls: Arc<AtomicUsize>,
    pub fail: Option<OriginError>,
}

impl MockOrigin {
    pub fn failing(error: OriginError) -> Self {
        Self {
            fail: Some(error),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Service<Request<String>> for MockOrigin {
    type Response = Response<String>;
    type Error = OriginError;
    type Future = Ready<Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _context: &mut Context) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request<String>) -> Self::Future {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = &self.fail {
            return ready(Err(error.clone()));
        }

        let mut response = Response::new(format!("origin: {}", request.uri().path()));
        if let Some(age) = request.headers().get("x-cache-age") {
            response.headers_mut().insert(X_SEEN_AGE, age.clone());
        }
        ready(Ok(response))
    }
}

/// Conditional GET with an age marker.
pub fn conditional(uri: &str, age: Option<&str>) -> Request<String> {
    let mut builder = Request::get(uri).header(header::IF_NONE_MATCH, "\"v1\"");
    if let Some(age) = age {
        builder = builder.header("x-cache-age", age);
    }
    builder.body(String::new()).expect("request")
}
