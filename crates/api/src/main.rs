use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use recwatch_core::areas::AreaTable;
use recwatch_upstream::FacilityCountClient;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use recwatch_api::background;
use recwatch_api::config::ServerConfig;
use recwatch_api::router::build_app_router;
use recwatch_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recwatch_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    // A missing DATABASE_URL is not fatal here: storage endpoints report it
    // when they are called.
    let pool = match &config.database_url {
        Some(url) => {
            let pool = recwatch_db::create_pool(url, config.db_max_connections)
                .expect("Invalid DATABASE_URL");
            tracing::info!("Database connection pool created");

            // An unreachable database leaves the pool in place: storage
            // endpoints then fail with STORAGE_UNAVAILABLE and /health
            // reports degraded.
            match recwatch_db::run_migrations(&pool).await {
                Ok(()) => tracing::info!("Database migrations applied"),
                Err(e) => tracing::error!(error = %e, "Failed to run database migrations"),
            }
            Some(pool)
        }
        None => {
            tracing::warn!("DATABASE_URL is not set; storage endpoints are disabled");
            None
        }
    };

    // --- Upstream client ---
    let upstream = Arc::new(
        FacilityCountClient::new(
            config.upstream_url.clone(),
            Duration::from_secs(config.upstream_timeout_secs),
        )
        .expect("Failed to build upstream HTTP client"),
    );
    tracing::info!(
        timeout_secs = config.upstream_timeout_secs,
        "Upstream client created"
    );

    let areas = Arc::new(AreaTable::standard().clone());

    // --- Background sample logger ---
    let cancel = CancellationToken::new();
    let logger_handle = match (config.log_interval_secs, &pool) {
        (Some(secs), Some(pool)) => Some(tokio::spawn(background::sample_logger::run(
            pool.clone(),
            Arc::clone(&upstream),
            Arc::clone(&areas),
            Duration::from_secs(secs),
            cancel.clone(),
        ))),
        (Some(_), None) => {
            tracing::warn!("LOG_INTERVAL_SECS is set but DATABASE_URL is not; sample logger disabled");
            None
        }
        (None, _) => None,
    };

    // --- App state ---
    let state = AppState {
        pool,
        upstream,
        areas,
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    cancel.cancel();
    if let Some(handle) = logger_handle {
        let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
        tracing::info!("Sample logger stopped");
    }

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
