//! Widget routes - CRUD over the widget resource.
//!
//! Every response carrying a single widget sets `Location` to the widget's
//! resource path and `ETag` to its quoted version. Updates must present the
//! current version in `If-Match`.

use axum::{
    Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use tracing::{info, warn};

use super::app_state::AppState;
use super::error::ApiError;
use super::preconditions::IfMatch;
use crate::models::Widget;

/// Create the widgets router
pub fn widgets_router() -> Router<AppState> {
    // In axum 0.8, path parameters use curly braces {} instead of colons :
    Router::new()
        .route("/widgets", get(list_widgets))
        .route("/widget", post(create_widget))
        .route(
            "/widget/{id}",
            get(get_widget).put(update_widget).delete(delete_widget),
        )
}

fn widget_response(
    state: &AppState,
    status: StatusCode,
    widget: Widget,
) -> Result<Response, ApiError> {
    let id = widget.id.ok_or_else(|| {
        ApiError::Internal("Widget service returned an unsaved widget".to_string())
    })?;

    Ok((
        status,
        [
            (header::LOCATION, state.widget_location(id)),
            (header::ETAG, widget.etag()),
        ],
        Json(widget),
    )
        .into_response())
}

/// GET /widgets - List all widgets
#[utoipa::path(
    get,
    path = "/widgets",
    tag = "Widgets",
    responses(
        (status = 200, description = "All widgets in insertion order", body = [Widget])
    )
)]
pub async fn list_widgets(State(state): State<AppState>) -> Result<Response, ApiError> {
    let widgets = state.widget_service.find_all().await?;

    Ok((
        StatusCode::OK,
        [(header::LOCATION, state.collection_location())],
        Json(widgets),
    )
        .into_response())
}

/// GET /widget/{id} - Get a single widget
#[utoipa::path(
    get,
    path = "/widget/{id}",
    tag = "Widgets",
    params(
        ("id" = i64, Path, description = "Widget ID")
    ),
    responses(
        (status = 200, description = "Widget found", body = Widget),
        (status = 404, description = "Widget not found")
    )
)]
pub async fn get_widget(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let widget = state
        .widget_service
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound)?;

    widget_response(&state, StatusCode::OK, widget)
}

/// POST /widget - Create a widget from a draft
#[utoipa::path(
    post,
    path = "/widget",
    tag = "Widgets",
    request_body(content = Widget, description = "Draft widget; id and version are ignored"),
    responses(
        (status = 201, description = "Widget created", body = Widget),
        (status = 400, description = "Bad request - blank name or malformed body")
    )
)]
pub async fn create_widget(
    State(state): State<AppState>,
    Json(draft): Json<Widget>,
) -> Result<Response, ApiError> {
    let created = state.widget_service.save(draft.into_draft()).await?;
    info!("[POST /widget] Created widget {:?}", created.id);

    widget_response(&state, StatusCode::CREATED, created)
}

/// PUT /widget/{id} - Update a widget guarded by If-Match
#[utoipa::path(
    put,
    path = "/widget/{id}",
    tag = "Widgets",
    params(
        ("id" = i64, Path, description = "Widget ID"),
        ("If-Match" = String, Header, description = "Version the client last saw")
    ),
    request_body(content = Widget, description = "Full widget representation"),
    responses(
        (status = 200, description = "Widget updated", body = Widget),
        (status = 400, description = "Bad request - blank name or malformed body"),
        (status = 404, description = "Widget not found"),
        (status = 412, description = "If-Match does not match the current version"),
        (status = 428, description = "If-Match header missing")
    )
)]
pub async fn update_widget(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    if_match: Option<IfMatch>,
    Json(body): Json<Widget>,
) -> Result<Response, ApiError> {
    let current = state
        .widget_service
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let if_match = if_match.ok_or_else(|| {
        warn!("[PUT /widget/{}] Rejected update without If-Match", id);
        ApiError::PreconditionRequired
    })?;
    if let Err(e) = if_match.check(&current) {
        warn!("[PUT /widget/{}] {}", id, e);
        return Err(e);
    }

    // The path id is authoritative and the version is the one just verified.
    let widget = Widget {
        id: Some(id),
        name: body.name,
        description: body.description,
        version: current.version,
    };
    let updated = state.widget_service.save(widget).await?;
    info!(
        "[PUT /widget/{}] Updated widget to version {}",
        id, updated.version
    );

    widget_response(&state, StatusCode::OK, updated)
}

/// DELETE /widget/{id} - Delete a widget
#[utoipa::path(
    delete,
    path = "/widget/{id}",
    tag = "Widgets",
    params(
        ("id" = i64, Path, description = "Widget ID")
    ),
    responses(
        (status = 200, description = "Widget deleted"),
        (status = 404, description = "Widget not found")
    )
)]
pub async fn delete_widget(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !state.widget_service.delete_by_id(id).await? {
        return Err(ApiError::NotFound);
    }
    info!("[DELETE /widget/{}] Deleted widget", id);
    Ok(StatusCode::OK)
}
