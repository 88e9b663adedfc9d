//! Storage trait definitions for the widget stores.

use super::StorageError;
use crate::models::Widget;

/// Store mapping widget ids to widgets.
///
/// The store is the only owner of widget state. It assigns ids on insert and
/// enforces the optimistic-lock version on update.
#[async_trait::async_trait]
pub trait WidgetStore: Send + Sync {
    /// List all widgets in id order
    async fn list(&self) -> Result<Vec<Widget>, StorageError>;

    /// Get widget by ID
    async fn get(&self, id: i64) -> Result<Option<Widget>, StorageError>;

    /// Insert a draft, assigning a fresh id and the initial version
    async fn insert(&self, draft: Widget) -> Result<Widget, StorageError>;

    /// Update a persisted widget.
    ///
    /// `widget.version` is the version the caller expects to be stored. On a
    /// match the widget is written with the version incremented; otherwise
    /// `StorageError::VersionConflict` is returned and nothing changes.
    async fn update(&self, widget: Widget) -> Result<Widget, StorageError>;

    /// Delete a widget, returning whether it existed
    async fn delete(&self, id: i64) -> Result<bool, StorageError>;
}
