//! Integration tests for the checkout server
//!
//! Requests go through the full route tree built by `HttpServer`, with a mock
//! resolver standing in for the ENS RPC endpoint.

use crate::{
    config::AppConfig,
    infrastructure::http::server::HttpServer,
    tests::{common::MockResolver, config, TestResult},
};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use warp::http::StatusCode;
use warp::test::request;
use warp::{Filter, Reply};

const MERCHANT: &str = "0xABcdEF0123456789abcdef0123456789ABCDEF01";
const LITERAL: &str = "0x1111111111111111111111111111111111111111";
const BASE_USDC: &str = "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913";
const CELO_USDC: &str = "0xcebA9300f2b948710d2653dD7B07f33A8B32118C";

fn routes_for(
    config: AppConfig,
    resolver: &MockResolver,
) -> TestResult<impl Filter<Extract = impl Reply, Error = warp::Rejection> + Clone> {
    config::init();
    let server = HttpServer::with_resolver(config, Arc::new(resolver.clone()))?;
    Ok(server.create_routes())
}

async fn get_page(
    routes: &(impl Filter<Extract = impl Reply, Error = warp::Rejection> + Clone + 'static),
    path: &str,
) -> TestResult<(StatusCode, String)> {
    let response = request()
        .method("GET")
        .path(path)
        .header("host", "shop.example.org")
        .header("x-forwarded-for", "203.0.113.10")
        .reply(routes)
        .await;
    Ok((response.status(), String::from_utf8(response.body().to_vec())?))
}

async fn get_state(
    routes: &(impl Filter<Extract = impl Reply, Error = warp::Rejection> + Clone + 'static),
    query: &str,
) -> TestResult<Value> {
    let response = request()
        .method("GET")
        .path(&format!("/api/checkout?{}", query))
        .reply(routes)
        .await;
    Ok(serde_json::from_slice(response.body())?)
}

#[tokio::test]
async fn test_name_recipient_renders_ready_page() -> TestResult<()> {
    let resolver = MockResolver::new().with_answer("merchant.eth", MERCHANT);
    let routes = routes_for(config::test_config(), &resolver)?;

    let (status, html) = get_page(&routes, "/?a=merchant.eth&n=Hoodie&c=8453").await?;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("PURCHASE READY"));
    assert!(html.contains(r#""toChain":8453"#));
    assert!(html.contains(&format!(r#""toAddress":"{}""#, MERCHANT)));
    assert!(html.contains(&format!(r#""toToken":"{}""#, BASE_USDC)));
    assert!(html.contains(r#""intent":"Purchase Hoodie""#));
    assert!(html.contains("ref=footer-shop.example.org%2F"));
    assert_eq!(resolver.calls_for("merchant.eth"), 1);
    Ok(())
}

#[tokio::test]
async fn test_literal_recipient_is_ready_without_lookup() -> TestResult<()> {
    let resolver = MockResolver::new();
    let routes = routes_for(config::test_config(), &resolver)?;

    let body = get_state(&routes, &format!("a={}&n=Mug", LITERAL)).await?;

    assert_eq!(body["state"], "ready");
    assert_eq!(body["destinationAddress"], LITERAL);
    assert_eq!(body["destinationNetwork"], 42220);
    assert_eq!(body["destinationTokenAddress"], CELO_USDC);
    assert_eq!(body["intentLabel"], "Purchase Mug");
    assert_eq!(body["widget"]["amountMode"], "open");
    assert_eq!(resolver.calls(), 0);
    Ok(())
}

#[tokio::test]
async fn test_unknown_name_renders_failed_page() -> TestResult<()> {
    let resolver = MockResolver::new();
    let routes = routes_for(config::test_config(), &resolver)?;

    let (status, html) = get_page(&routes, "/?a=bad.name&n=Hoodie").await?;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("COULD NOT RESOLVE ENS NAME:"));
    assert!(html.contains("bad.name"));
    assert!(!html.contains("PURCHASE NOW"));
    assert!(!html.contains("checkout-widget"));
    assert_eq!(resolver.calls_for("bad.name"), 1);
    Ok(())
}

#[tokio::test]
async fn test_missing_parameters_issue_no_lookup() -> TestResult<()> {
    let resolver = MockResolver::new().with_answer("merchant.eth", MERCHANT);
    let routes = routes_for(config::test_config(), &resolver)?;

    let body = get_state(&routes, "a=merchant.eth&m=green").await?;

    assert_eq!(body["state"], "missing_parameters");
    assert_eq!(body["missing"], serde_json::json!(["n"]));
    assert_eq!(body["theme"], "green");
    assert!(body.get("widget").is_none());
    assert_eq!(resolver.calls(), 0);
    Ok(())
}

#[tokio::test]
async fn test_concurrent_pages_share_one_lookup() -> TestResult<()> {
    let resolver = MockResolver::new()
        .with_answer("merchant.eth", MERCHANT)
        .with_delay(Duration::from_millis(100));
    let routes = routes_for(config::test_config(), &resolver)?;

    let pages = futures::future::join_all(
        ["/?a=merchant.eth&n=Hoodie", "/?a=Merchant.ETH&n=Cap", "/?a=%20merchant.eth&n=Mug"]
            .into_iter()
            .map(|path| get_page(&routes, path)),
    )
    .await;

    for page in pages {
        let (_, html) = page?;
        assert!(html.contains("PURCHASE READY"));
    }
    assert_eq!(resolver.calls_for("merchant.eth"), 1);
    Ok(())
}

#[tokio::test]
async fn test_slow_lookup_renders_resolving_then_ready() -> TestResult<()> {
    let mut config = config::test_config();
    config.checkout.render_wait_ms = 20;
    let resolver = MockResolver::new()
        .with_answer("merchant.eth", MERCHANT)
        .with_delay(Duration::from_millis(200));
    let routes = routes_for(config, &resolver)?;

    let (_, html) = get_page(&routes, "/?a=merchant.eth&n=Hoodie").await?;
    assert!(html.contains("RESOLVING"));
    assert!(html.contains(r#"<meta http-equiv="refresh" content="2">"#));
    assert!(!html.contains("checkout-widget"));

    tokio::time::sleep(Duration::from_millis(400)).await;

    let (_, html) = get_page(&routes, "/?a=merchant.eth&n=Hoodie").await?;
    assert!(html.contains("PURCHASE READY"));
    assert_eq!(resolver.calls_for("merchant.eth"), 1);
    Ok(())
}

#[tokio::test]
async fn test_lookup_timeout_fails() -> TestResult<()> {
    let mut config = config::test_config();
    config.ens.timeout_seconds = 1;
    config.checkout.render_wait_ms = 3000;
    let resolver = MockResolver::new()
        .with_answer("merchant.eth", MERCHANT)
        .with_delay(Duration::from_secs(5));
    let routes = routes_for(config, &resolver)?;

    let (_, html) = get_page(&routes, "/?a=merchant.eth&n=Hoodie").await?;

    assert!(html.contains("COULD NOT RESOLVE ENS NAME:"));
    Ok(())
}

#[tokio::test]
async fn test_resolver_error_fails() -> TestResult<()> {
    let resolver = MockResolver::new().with_error("merchant.eth", "execution reverted");
    let routes = routes_for(config::test_config(), &resolver)?;

    let body = get_state(&routes, "a=merchant.eth&n=Hoodie").await?;
    // Polling reports the lookup as still running on first sight
    assert_eq!(body["state"], "resolving");

    tokio::time::sleep(Duration::from_millis(50)).await;
    let body = get_state(&routes, "a=merchant.eth&n=Hoodie").await?;
    assert_eq!(body["state"], "name_resolution_failed");
    assert_eq!(body["recipient"], "merchant.eth");
    Ok(())
}

#[tokio::test]
async fn test_user_text_is_escaped() -> TestResult<()> {
    let resolver = MockResolver::new();
    let routes = routes_for(config::test_config(), &resolver)?;

    let (_, html) = get_page(
        &routes,
        &format!("/?a={}&n=%3C%2Fscript%3E%3Cscript%3Ealert(1)%3C%2Fscript%3E", LITERAL),
    )
    .await?;

    assert!(!html.contains("<script>alert(1)"));
    assert!(html.contains("&lt;/script&gt;&lt;script&gt;alert(1)"));
    assert!(html.contains(r#""intent":"Purchase \u003c/script\u003e\u003cscript\u003ealert(1)"#));
    Ok(())
}

#[tokio::test]
async fn test_theme_and_image_selection() -> TestResult<()> {
    let resolver = MockResolver::new();
    let routes = routes_for(config::test_config(), &resolver)?;

    let body = get_state(&routes, &format!("a={}&n=Mug&color=white&m=blue", LITERAL)).await?;
    assert_eq!(body["theme"], "blue");
    assert_eq!(body["image"], serde_json::json!({"kind": "asset", "src": "/blue.webp"}));

    let body = get_state(
        &routes,
        &format!("a={}&n=Mug&image=/mug.webp&img=https%3A%2F%2Fcdn.example.org%2Fmug.png", LITERAL),
    )
    .await?;
    assert_eq!(body["theme"], "black");
    assert_eq!(
        body["image"],
        serde_json::json!({"kind": "remote", "src": "https://cdn.example.org/mug.png"})
    );
    Ok(())
}

#[tokio::test]
async fn test_unsupported_network_fail_open_and_closed() -> TestResult<()> {
    let resolver = MockResolver::new();
    let routes = routes_for(config::test_config(), &resolver)?;
    let body = get_state(&routes, &format!("a={}&n=Mug&c=56", LITERAL)).await?;
    assert_eq!(body["state"], "ready");
    assert_eq!(body["destinationTokenAddress"], "0x0000000000000000000000000000000000000000");
    assert_eq!(body["tokenSupported"], false);

    let mut strict = config::test_config();
    strict.checkout.reject_unsupported_networks = true;
    let routes = routes_for(strict, &resolver)?;
    let (_, html) = get_page(&routes, &format!("/?a={}&n=Mug&c=56", LITERAL)).await?;
    assert!(html.contains("UNSUPPORTED"));
    assert!(!html.contains("checkout-widget"));
    Ok(())
}

#[tokio::test]
async fn test_rate_limit_per_client() -> TestResult<()> {
    let mut config = config::production_test_config();
    config.rate_limit.requests_per_minute = 60;
    config.rate_limit.burst_size = 2;
    let resolver = MockResolver::new();
    let routes = routes_for(config, &resolver)?;
    let path = format!("/?a={}&n=Mug", LITERAL);

    let mut statuses = Vec::new();
    for _ in 0..3 {
        statuses.push(get_page(&routes, &path).await?.0);
    }
    assert_eq!(statuses, vec![StatusCode::OK, StatusCode::OK, StatusCode::TOO_MANY_REQUESTS]);

    let other_client = request()
        .method("GET")
        .path(&path)
        .header("x-forwarded-for", "198.51.100.77")
        .reply(&routes)
        .await;
    assert_eq!(other_client.status(), StatusCode::OK);

    let metrics = request().method("GET").path("/metrics").reply(&routes).await;
    let body: Value = serde_json::from_slice(metrics.body())?;
    assert_eq!(body["rate_limited_requests"], 1);
    Ok(())
}

#[tokio::test]
async fn test_untrusted_forwarded_header_shares_peer_bucket() -> TestResult<()> {
    let mut config = config::production_test_config();
    config.security.trusted_proxy_headers = Vec::new();
    config.rate_limit.requests_per_minute = 60;
    config.rate_limit.burst_size = 1;
    let resolver = MockResolver::new();
    let routes = routes_for(config, &resolver)?;
    let path = format!("/?a={}&n=Mug", LITERAL);
    let peer: std::net::SocketAddr = "192.0.2.44:51000".parse()?;

    let mut statuses = Vec::new();
    for spoofed in ["203.0.113.1", "203.0.113.2"] {
        let response = request()
            .method("GET")
            .path(&path)
            .remote_addr(peer)
            .header("x-forwarded-for", spoofed)
            .reply(&routes)
            .await;
        statuses.push(response.status());
    }
    assert_eq!(statuses, vec![StatusCode::OK, StatusCode::TOO_MANY_REQUESTS]);

    let other_peer = request()
        .method("GET")
        .path(&path)
        .remote_addr("192.0.2.45:51000".parse()?)
        .reply(&routes)
        .await;
    assert_eq!(other_peer.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn test_payment_events_are_counted() -> TestResult<()> {
    let resolver = MockResolver::new();
    let routes = routes_for(config::test_config(), &resolver)?;

    for event in ["started", "completed"] {
        let response = request()
            .method("POST")
            .path("/api/payments/events")
            .json(&serde_json::json!({"event": event, "payment": {"id": "pay_1"}}))
            .reply(&routes)
            .await;
        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }

    let prometheus = request().method("GET").path("/metrics/prometheus").reply(&routes).await;
    let text = std::str::from_utf8(prometheus.body())?;
    assert!(text.contains(r#"payment_events_total{event="started"} 1"#));
    assert!(text.contains(r#"payment_events_total{event="completed"} 1"#));
    Ok(())
}

#[tokio::test]
async fn test_health_reports_degraded_resolver() -> TestResult<()> {
    let resolver = MockResolver::new().unavailable();
    let routes = routes_for(config::test_config(), &resolver)?;

    let response = request().method("GET").path("/health").reply(&routes).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_slice(response.body())?;
    assert_eq!(body["status"], "degraded");
    Ok(())
}
