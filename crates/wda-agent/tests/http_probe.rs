//! HTTP status probe tests against an in-process agent stub

use std::net::SocketAddr;
use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;

use wda_agent::HttpStatusProbe;
use wda_core::config::AgentConfig;
use wda_core::traits::StatusProbe;
use wda_core::{AgentEndpoint, TransportError};

/// Serve `router` on an ephemeral localhost port
async fn serve(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });
    addr
}

fn probe_for(addr: SocketAddr, timeout: Duration) -> HttpStatusProbe {
    let config = AgentConfig {
        wda_base_url: Some("http://127.0.0.1".to_string()),
        wda_local_port: Some(addr.port()),
        ..Default::default()
    };
    let endpoint = AgentEndpoint::resolve(&config).unwrap();
    HttpStatusProbe::new(&endpoint, timeout).unwrap()
}

#[tokio::test]
async fn test_reports_build_metadata() {
    let router = Router::new().route(
        "/status",
        get(|| async {
            Json(json!({
                "value": {
                    "state": "success",
                    "os": { "name": "iOS", "version": "17.2" },
                    "ready": true,
                    "build": {
                        "time": "Jun 24 2018 17:08:21",
                        "productBundleIdentifier": "com.facebook.WebDriverAgentRunner",
                        "upgradedAt": "1529859701123"
                    }
                },
                "sessionId": null
            }))
        }),
    );
    let addr = serve(router).await;
    let probe = probe_for(addr, Duration::from_secs(5));

    let report = probe.status().await.unwrap().expect("agent should be running");

    assert_eq!(report.build.time.as_deref(), Some("Jun 24 2018 17:08:21"));
    assert_eq!(
        report.build.product_bundle_identifier.as_deref(),
        Some("com.facebook.WebDriverAgentRunner")
    );
    assert_eq!(report.build.upgraded_at.as_deref(), Some("1529859701123"));
    assert_eq!(
        probe.status_url().as_str(),
        format!("http://127.0.0.1:{}/status", addr.port())
    );
}

#[tokio::test]
async fn test_empty_build_object_is_a_report() {
    let router = Router::new().route(
        "/status",
        get(|| async { Json(json!({ "value": { "build": {} } })) }),
    );
    let addr = serve(router).await;

    let report = probe_for(addr, Duration::from_secs(5)).status().await.unwrap();

    assert_eq!(report.map(|r| r.build), Some(Default::default()));
}

#[tokio::test]
async fn test_missing_build_is_not_running() {
    let router = Router::new().route(
        "/status",
        get(|| async { Json(json!({ "value": { "ready": true } })) }),
    );
    let addr = serve(router).await;

    let report = probe_for(addr, Duration::from_secs(5)).status().await.unwrap();

    assert!(report.is_none());
}

#[tokio::test]
async fn test_connection_refused_is_not_running() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let report = probe_for(addr, Duration::from_secs(5)).status().await.unwrap();

    assert!(report.is_none());
}

#[tokio::test]
async fn test_error_status_is_transport_error() {
    let router = Router::new().route(
        "/status",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let addr = serve(router).await;

    let err = probe_for(addr, Duration::from_secs(5))
        .status()
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Status { status: 500, .. }));
}

#[tokio::test]
async fn test_malformed_body_is_transport_error() {
    let router = Router::new().route("/status", get(|| async { "<html>not json</html>" }));
    let addr = serve(router).await;

    let err = probe_for(addr, Duration::from_secs(5))
        .status()
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Malformed { .. }));
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let router = Router::new().route(
        "/status",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({ "value": { "build": {} } }))
        }),
    );
    let addr = serve(router).await;

    let err = probe_for(addr, Duration::from_millis(200))
        .status()
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Request { .. }));
}
