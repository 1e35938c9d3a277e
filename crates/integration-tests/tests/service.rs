//! Health checks, request IDs, unknown routes, and rate limiting.

#![allow(clippy::unwrap_used)]

use breedbook_integration_tests::TestContext;
use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new().await;

    let resp = ctx.get("/health").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn test_readiness_after_load() {
    let ctx = TestContext::new().await;
    assert_eq!(ctx.get("/health/ready").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_readiness_before_load() {
    let ctx = TestContext::builder().without_startup_load().start().await;
    assert_eq!(
        ctx.get("/health/ready").await.status(),
        StatusCode::SERVICE_UNAVAILABLE
    );

    // First use of the store performs the load
    ctx.get("/favorites").await;
    assert_eq!(ctx.get("/health/ready").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_request_id_echoed() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .get(ctx.url("/health"))
        .header("x-request-id", "trace-abc")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.headers().get("x-request-id").unwrap(), "trace-abc");

    let resp = ctx.get("/breeds").await;
    assert!(resp.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_unknown_route() {
    let ctx = TestContext::new().await;

    let resp = ctx.get("/cats").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "NotFound");
}

#[tokio::test]
async fn test_rate_limit_per_client() {
    let ctx = TestContext::builder()
        .configure(|config| config.rate_limit_per_minute = 3)
        .start()
        .await;

    for _ in 0..3 {
        assert_eq!(ctx.get("/favorites").await.status(), StatusCode::OK);
    }
    assert_eq!(
        ctx.get("/favorites").await.status(),
        StatusCode::TOO_MANY_REQUESTS
    );

    // A different forwarded client has its own quota
    let resp = ctx
        .client
        .get(ctx.url("/favorites"))
        .header("x-forwarded-for", "203.0.113.9")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // Health checks are not limited
    assert_eq!(ctx.get("/health").await.status(), StatusCode::OK);
}
