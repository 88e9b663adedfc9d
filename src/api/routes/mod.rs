//! API routes module - organizes all route handlers.

pub mod app_state;
pub mod error;
pub mod openapi;
pub mod preconditions;
pub mod widgets;

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use app_state::AppState;
pub use error::ApiError;

/// Create the API router combining all route modules.
///
/// Paths are relative; callers decide where to mount it.
/// Note: State is applied by callers (e.g. `create_app` or a test server).
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .merge(widgets::widgets_router())
        // OpenAPI documentation endpoints
        .merge(openapi::openapi_router())
}

/// Create the application state (in-memory store, mounted at the root).
pub fn create_app_state() -> AppState {
    AppState::new()
}

/// Build the complete application: health check, the API mounted under the
/// state's base path, and the trace and CORS layers.
pub fn create_app(app_state: AppState, cors: CorsLayer) -> Router {
    let api = create_api_router();
    let base_path = app_state.base_path.clone();

    let app = Router::new().route("/health", get(health_check));
    // Nesting at the root is not allowed in axum 0.8
    let app = if base_path.is_empty() {
        app.merge(api)
    } else {
        app.nest(&base_path, api)
    };

    app.with_state(app_state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors),
    )
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "widget-rest-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
