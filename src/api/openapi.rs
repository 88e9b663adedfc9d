//! OpenAPI specification definition.
//!
//! Aggregates all route handlers and schemas for OpenAPI documentation generation.

use utoipa::{Modify, OpenApi};
#[derive(OpenApi)]
#[openapi(
    paths(
        // Widgets
        crate::routes::widgets::list_widgets,
        crate::routes::widgets::get_widget,
        crate::routes::widgets::create_widget,
        crate::routes::widgets::update_widget,
        crate::routes::widgets::delete_widget,
        // OpenAPI
        crate::routes::openapi::serve_openapi_json,
    ),
    components(schemas(crate::models::Widget)),
    modifiers(&VersionAddon),
    tags(
        (name = "Widgets", description = "Widget CRUD operations with ETag based optimistic locking"),
        (name = "OpenAPI", description = "OpenAPI specification"),
    ),
    info(
        title = "Widget REST API",
        description = "REST API for managing widgets",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:8081/rest", description = "Local development server")
    )
)]
pub struct ApiDoc;

struct VersionAddon;

impl Modify for VersionAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        // Update version to match Cargo.toml version
        openapi.info.version = env!("CARGO_PKG_VERSION").to_string();
    }
}
