//! Unit tests for the in-memory widget store

use std::sync::Arc;
use widget_rest_api::models::Widget;
use widget_rest_api::storage::{MemoryWidgetStore, StorageError, WidgetStore};

#[tokio::test]
async fn test_insert_assigns_id_and_initial_version() {
    let store = MemoryWidgetStore::new();

    let first = store.insert(Widget::new("First", None)).await.unwrap();
    let second = store.insert(Widget::new("Second", None)).await.unwrap();

    assert_eq!(first.id, Some(1));
    assert_eq!(first.version, 1);
    assert_eq!(second.id, Some(2));
    assert_eq!(store.get(1).await.unwrap(), Some(first));
}

#[tokio::test]
async fn test_list_in_insertion_order() {
    let store = MemoryWidgetStore::new();
    for name in ["a", "b", "c"] {
        store.insert(Widget::new(name, None)).await.unwrap();
    }

    let names: Vec<String> = store
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|w| w.name)
        .collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn test_update_increments_version() {
    let store = MemoryWidgetStore::new();
    let created = store.insert(Widget::new("Widget", None)).await.unwrap();

    let updated = store
        .update(Widget {
            name: "Widget Update".to_string(),
            ..created
        })
        .await
        .unwrap();

    assert_eq!(updated.version, 2);
    assert_eq!(updated.name, "Widget Update");
    assert_eq!(store.get(1).await.unwrap(), Some(updated));
}

#[tokio::test]
async fn test_update_with_stale_version_conflicts() {
    let store = MemoryWidgetStore::new();
    let created = store.insert(Widget::new("Widget", None)).await.unwrap();
    store.update(created.clone()).await.unwrap();

    let err = store.update(created).await.unwrap_err();

    assert_eq!(
        err,
        StorageError::VersionConflict {
            id: 1,
            expected_version: 1,
            current_version: 2,
        }
    );
    assert_eq!(store.get(1).await.unwrap().unwrap().version, 2);
}

#[tokio::test]
async fn test_update_missing_widget() {
    let store = MemoryWidgetStore::new();

    let err = store
        .update(Widget::persisted(7, "Ghost", None, 1))
        .await
        .unwrap_err();

    assert_eq!(err, StorageError::NotFound { id: 7 });
}

#[tokio::test]
async fn test_update_draft_is_invalid() {
    let store = MemoryWidgetStore::new();

    let err = store.update(Widget::new("Draft", None)).await.unwrap_err();

    assert!(matches!(err, StorageError::Invalid(_)));
}

#[tokio::test]
async fn test_delete() {
    let store = MemoryWidgetStore::new();
    store.insert(Widget::new("Widget", None)).await.unwrap();

    assert!(store.delete(1).await.unwrap());
    assert!(!store.delete(1).await.unwrap());
    assert_eq!(store.get(1).await.unwrap(), None);
}

#[tokio::test]
async fn test_concurrent_updates_only_one_wins() {
    let store = Arc::new(MemoryWidgetStore::new());
    let created = store.insert(Widget::new("Widget", None)).await.unwrap();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = store.clone();
            let widget = Widget {
                name: format!("writer {}", i),
                ..created.clone()
            };
            tokio::spawn(async move { store.update(widget).await })
        })
        .collect();

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(e) => assert!(matches!(e, StorageError::VersionConflict { .. })),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(store.get(1).await.unwrap().unwrap().version, 2);
}
