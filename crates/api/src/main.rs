use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use longpoll_core::{ExecutionEngine, JobRegistry, SleepingWorkUnit};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use longpoll_api::background::job_retention;
use longpoll_api::config::ServerConfig;
use longpoll_api::router::build_app_router;
use longpoll_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "longpoll_api=debug,longpoll_core=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        poll_timeout_ms = config.poll_timeout_ms,
        max_workers = config.max_workers,
        "Loaded server configuration"
    );

    // --- Job registry ---
    let engine = ExecutionEngine::new(config.max_workers);
    let registry = Arc::new(JobRegistry::new(engine, config.poll_timeout()));
    let work = Arc::new(SleepingWorkUnit::new(config.work_unit_delay()));

    // --- Retention ---
    let retention_cancel = CancellationToken::new();
    let retention_handle = tokio::spawn(job_retention::run(
        Arc::clone(&registry),
        config.job_retention_secs,
        config.retention_sweep_interval(),
        retention_cancel.clone(),
    ));

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        registry: Arc::clone(&registry),
        work,
    };

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

    retention_cancel.cancel();
    let _ = tokio::time::timeout(
        Duration::from_secs(config.shutdown_timeout_secs),
        retention_handle,
    )
    .await;
    tracing::info!("Job retention task stopped");

    let pending = registry.len().await;
    tracing::info!(pending, "Graceful shutdown complete; tracked jobs are discarded");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
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
