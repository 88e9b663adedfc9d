//! Widget service - the collaborator route handlers call for widget data.

use crate::models::Widget;
use crate::storage::{MemoryWidgetStore, StorageError, WidgetStore};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

/// Operations the widget endpoint depends on.
#[async_trait]
pub trait WidgetService: Send + Sync {
    /// All widgets in insertion order
    async fn find_all(&self) -> Result<Vec<Widget>, StorageError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Widget>, StorageError>;

    /// Persist a widget.
    ///
    /// Drafts are inserted and receive an id and the initial version. Persisted
    /// widgets are updated only if their `version` still matches the stored one.
    async fn save(&self, widget: Widget) -> Result<Widget, StorageError>;

    /// Remove a widget, returning whether it existed
    async fn delete_by_id(&self, id: i64) -> Result<bool, StorageError>;
}

/// Widget service backed by a [`WidgetStore`].
pub struct StoreWidgetService {
    store: Arc<dyn WidgetStore>,
}

impl StoreWidgetService {
    pub fn new(store: Arc<dyn WidgetStore>) -> Self {
        Self { store }
    }

    /// Service over a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryWidgetStore::new()))
    }
}

#[async_trait]
impl WidgetService for StoreWidgetService {
    async fn find_all(&self) -> Result<Vec<Widget>, StorageError> {
        self.store.list().await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Widget>, StorageError> {
        self.store.get(id).await
    }

    async fn save(&self, widget: Widget) -> Result<Widget, StorageError> {
        widget.validate().map_err(StorageError::Invalid)?;

        if widget.is_draft() {
            let created = self.store.insert(widget).await?;
            info!(
                "[WidgetService] Created widget {:?} '{}'",
                created.id, created.name
            );
            return Ok(created);
        }

        debug!(
            "[WidgetService] Updating widget {:?} at version {}",
            widget.id, widget.version
        );
        let updated = self.store.update(widget).await?;
        info!(
            "[WidgetService] Updated widget {:?} to version {}",
            updated.id, updated.version
        );
        Ok(updated)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, StorageError> {
        let removed = self.store.delete(id).await?;
        if removed {
            info!("[WidgetService] Deleted widget {}", id);
        }
        Ok(removed)
    }
}
