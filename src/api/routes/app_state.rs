//! Application state management.
//!
//! Defines the AppState struct that holds the shared application state: the
//! widget service and the path prefix used to build `Location` headers.

use crate::config::{ApiConfig, normalize_base_path};
use crate::services::{StoreWidgetService, WidgetService};
use crate::storage::{PostgresWidgetStore, StorageError, WidgetStore};
use std::sync::Arc;
use tracing::info;

/// Application state shared across all route handlers.
#[derive(Clone)]
pub struct AppState {
    /// Service owning all widget data
    pub widget_service: Arc<dyn WidgetService>,
    /// Prefix the widget routes are mounted under (empty for the root)
    pub base_path: Arc<str>,
}

impl AppState {
    /// Create application state over an in-memory store, mounted at the root.
    pub fn new() -> Self {
        Self::with_service(Arc::new(StoreWidgetService::in_memory()))
    }

    /// Create application state around an existing service.
    pub fn with_service(widget_service: Arc<dyn WidgetService>) -> Self {
        Self {
            widget_service,
            base_path: Arc::from(""),
        }
    }

    /// Set the prefix used when building resource locations.
    pub fn with_base_path(mut self, base_path: &str) -> Self {
        self.base_path = Arc::from(normalize_base_path(base_path));
        self
    }

    /// Initialize state from configuration.
    ///
    /// Connects to PostgreSQL when `database_url` is set, otherwise keeps widgets
    /// in memory.
    pub async fn from_config(config: &ApiConfig) -> Result<Self, StorageError> {
        let service = match config.database_url.as_deref() {
            Some(database_url) => {
                let store: Arc<dyn WidgetStore> =
                    Arc::new(PostgresWidgetStore::connect(database_url).await?);
                info!("Using PostgreSQL widget store");
                StoreWidgetService::new(store)
            }
            None => {
                info!("DATABASE_URL not set, using in-memory widget store");
                StoreWidgetService::in_memory()
            }
        };

        Ok(Self::with_service(Arc::new(service)).with_base_path(&config.base_path))
    }

    /// Location of the widget collection.
    pub fn collection_location(&self) -> String {
        format!("{}/widgets", self.base_path)
    }

    /// Location of a single widget.
    pub fn widget_location(&self, id: i64) -> String {
        format!("{}/widget/{}", self.base_path, id)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
