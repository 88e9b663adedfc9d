use anyhow::Context;
use std::net::SocketAddr;
use tracing::info;

use widget_rest_api::config::ApiConfig;
use widget_rest_api::middleware::{self, observability};
use widget_rest_api::routes::{self, AppState};

// Panic hook to catch and log panics
fn setup_panic_hook() {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("PANIC occurred!");
        if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            eprintln!("Panic message: {}", s);
        }
        if let Some(location) = panic_info.location() {
            eprintln!(
                "Panic location: {}:{}:{}",
                location.file(),
                location.line(),
                location.column()
            );
        }
        eprintln!("Backtrace:\n{:?}", std::backtrace::Backtrace::capture());
    }));
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    setup_panic_hook();

    let config = ApiConfig::from_env();
    observability::init_tracing(config.json_logs);
    observability::init_observability();
    info!("Application starting...");

    let app_state = AppState::from_config(&config)
        .await
        .context("Failed to initialize widget storage")?;

    let mut app = routes::create_app(
        app_state,
        middleware::create_cors_layer(&config.cors_allowed_origins),
    );
    if let Some(requests_per_minute) = config.rate_limit_per_minute {
        info!("Rate limiting enabled: {} requests/minute", requests_per_minute);
        app = middleware::with_rate_limit(app, requests_per_minute);
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Server listening on {} (port {})", addr, config.port);
    info!("Health check available at http://{}/health", addr);
    info!(
        "Widgets available at http://{}{}/widgets",
        addr, config.base_path
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind listener on {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

// Handle both SIGINT (Ctrl+C) and SIGTERM (Docker stop)
#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sigterm) => sigterm,
        Err(e) => {
            tracing::warn!("Failed to install SIGTERM handler: {}", e);
            let _ = tokio::signal::ctrl_c().await;
            return;
        }
    };
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("SIGINT received, shutting down gracefully");
        }
        _ = sigterm.recv() => {
            info!("SIGTERM received, shutting down gracefully");
        }
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Shutdown signal received");
}
