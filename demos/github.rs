use {
    http::{header::*, *},
    std::{convert::*, time::*},
    tower::*,
    tower_http_revalidation::{freshness::*, revalidation::*, *},
    tracing_subscriber::*,
};

// A client-side stack for a GitHub-like API
//
// In a real deployment the inner service would be the HTTP client that reaches the origin and
// an HTTP cache would sit above our layer, adding the conditional headers and the age marker.
// Here we play the cache ourselves and stand in for the origin with a function that always
// answers 200.
//
// Run with RUST_LOG=debug to see the decisions:
//
//   RUST_LOG=debug cargo run --example github

const HOUR: Duration = Duration::from_secs(60 * 60);

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let checker = ResourceMaxAges {
        user: Some(HOUR),
        repository: Some(HOUR * 24),
        repositories: Some(HOUR * 2),
        activity: Some(Duration::from_secs(5 * 60)),
    }
    .checker()
    .expect("rule set");

    let origin = service_fn(|request: Request<String>| async move {
        tracing::info!("origin contacted: {}", request.uri());
        Ok::<_, Infallible>(Response::new(String::from("fresh from the origin\n")))
    });

    let client = ServiceBuilder::new()
        .layer(RevalidationLayer::default().checker(checker))
        .service(origin);

    for (path, age) in [
        ("/repos/acme/widgets", 3600),
        ("/repos/acme/widgets", 100_000),
        ("/users/alice", 600),
        ("/users/alice/events/public", 600),
        ("/orgs/acme", 1),
    ] {
        let request = Request::get(format!("https://api.github.com{}", path))
            .header(IF_NONE_MATCH, "\"abc123\"")
            .header(X_CACHE_AGE, age.to_string())
            .body(String::new())
            .expect("request");

        let response = client.clone().oneshot(request).await.expect("response");
        println!("{} (age {}s): {}", path, age, response.status());
    }
}
