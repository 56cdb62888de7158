#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::routing::get as get_route;
use axum::Router;
use http_body_util::BodyExt;
use recwatch_core::areas::AreaTable;
use recwatch_upstream::FacilityCountClient;
use sqlx::PgPool;
use tower::ServiceExt;

use recwatch_api::config::ServerConfig;
use recwatch_api::router::build_app_router;
use recwatch_api::state::AppState;

/// Upstream body covering two areas plus a location no area claims.
pub const UPSTREAM_BODY: &str = r#"[
    {"LocationName": "UV Strength Landing", "FacilityName": "Village", "TotalCapacity": 10, "LastCount": 5, "IsClosed": false},
    {"LocationName": "UV Strength Room", "FacilityName": "Village", "TotalCapacity": 10, "LastCount": 3, "IsClosed": false},
    {"LocationName": "HSC Cardio", "FacilityName": "HSC", "TotalCapacity": 40, "CountOfParticipants": 10},
    {"LocationName": "UV Queenax", "FacilityName": "Village", "TotalCapacity": 12, "LastCount": 6}
]"#;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a 30-second request timeout and no database.
pub fn test_config(upstream_url: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        db_max_connections: 5,
        upstream_url: upstream_url.to_string(),
        upstream_timeout_secs: 2,
        log_interval_secs: None,
        static_dir: None,
    }
}

/// Build the full application router with all middleware layers.
///
/// `pool` is `None` to exercise the unconfigured-storage paths.
pub fn build_test_app(pool: Option<PgPool>, upstream_url: &str) -> Router {
    build_test_app_with_config(pool, test_config(upstream_url))
}

pub fn build_test_app_with_config(pool: Option<PgPool>, config: ServerConfig) -> Router {
    let upstream = FacilityCountClient::new(
        config.upstream_url.clone(),
        Duration::from_secs(config.upstream_timeout_secs),
    )
    .unwrap();

    let state = AppState {
        pool,
        upstream: Arc::new(upstream),
        areas: Arc::new(AreaTable::standard().clone()),
    };

    build_app_router(state, &config)
}

/// Serve a fake facility-count API answering `GET /counts` with `status`
/// and `body`. Returns the full URL to pass as the upstream URL.
pub async fn spawn_upstream(status: StatusCode, body: &'static str) -> String {
    let app = Router::new().route("/counts", get_route(move || async move { (status, body) }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/counts")
}

/// A URL on a local port that nothing listens on.
pub async fn unreachable_upstream() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/counts")
}

/// A lazily connecting pool aimed at a local port nothing listens on.
pub async fn unreachable_pool() -> PgPool {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    recwatch_db::create_pool(&format!("postgres://recwatch:recwatch@{addr}/recwatch"), 1).unwrap()
}

pub async fn send(app: Router, method: Method, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri).await
}

pub async fn post(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::POST, uri).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
