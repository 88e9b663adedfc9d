//! Observability setup.
//!
//! Installs the tracing subscriber and reports the OpenTelemetry settings.

use std::env;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` controls the filter (default: info). Output goes to stderr
/// without ANSI colours, as JSON lines when `json` is set.
pub fn init_tracing(json: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false);

    // A subscriber may already be installed (e.g. by a test harness)
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

/// Report observability configuration.
///
/// Checks for OTEL_SERVICE_NAME and OTEL_EXPORTER_OTLP_ENDPOINT environment variables.
pub fn init_observability() {
    let service_name =
        env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| "widget-rest-api".to_string());

    match env::var("OTEL_EXPORTER_OTLP_ENDPOINT") {
        Ok(endpoint) => info!(
            "OTLP endpoint {} configured for service_name={}; spans are logged locally",
            endpoint, service_name
        ),
        Err(_) => info!(
            "Observability initialized for service_name={} (set OTEL_EXPORTER_OTLP_ENDPOINT to report an exporter)",
            service_name
        ),
    }
}
