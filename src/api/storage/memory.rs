//! In-memory storage backend.

use super::{StorageError, traits::WidgetStore};
use crate::models::{INITIAL_VERSION, Widget};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

struct MemoryState {
    widgets: BTreeMap<i64, Widget>,
    next_id: i64,
}

/// Widget store kept in process memory.
///
/// Ids are handed out sequentially starting at 1, so id order is also
/// insertion order.
pub struct MemoryWidgetStore {
    state: RwLock<MemoryState>,
}

impl MemoryWidgetStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(MemoryState {
                widgets: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for MemoryWidgetStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WidgetStore for MemoryWidgetStore {
    async fn list(&self) -> Result<Vec<Widget>, StorageError> {
        let state = self.state.read().await;
        Ok(state.widgets.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> Result<Option<Widget>, StorageError> {
        let state = self.state.read().await;
        Ok(state.widgets.get(&id).cloned())
    }

    async fn insert(&self, draft: Widget) -> Result<Widget, StorageError> {
        let mut state = self.state.write().await;
        let id = state.next_id;
        state.next_id += 1;

        let widget = Widget {
            id: Some(id),
            version: INITIAL_VERSION,
            ..draft
        };
        state.widgets.insert(id, widget.clone());
        Ok(widget)
    }

    async fn update(&self, widget: Widget) -> Result<Widget, StorageError> {
        let id = widget
            .id
            .ok_or_else(|| StorageError::Invalid("cannot update a draft widget".to_string()))?;

        let mut state = self.state.write().await;
        let stored = state
            .widgets
            .get_mut(&id)
            .ok_or(StorageError::NotFound { id })?;

        if stored.version != widget.version {
            return Err(StorageError::VersionConflict {
                id,
                expected_version: widget.version,
                current_version: stored.version,
            });
        }

        *stored = Widget {
            version: widget.version + 1,
            ..widget
        };
        Ok(stored.clone())
    }

    async fn delete(&self, id: i64) -> Result<bool, StorageError> {
        let mut state = self.state.write().await;
        Ok(state.widgets.remove(&id).is_some())
    }
}
