//! PostgreSQL storage backend implementation.
//!
//! Uses sqlx for database operations and implements the WidgetStore trait.
//! Updates are a single conditional `UPDATE` so the version check and the
//! write happen atomically.

use super::{StorageError, traits::WidgetStore};
use crate::models::{INITIAL_VERSION, Widget};
use async_trait::async_trait;
use sqlx::PgPool;

#[derive(sqlx::FromRow)]
struct WidgetRow {
    id: i64,
    name: String,
    description: Option<String>,
    version: i32,
}

impl From<WidgetRow> for Widget {
    fn from(row: WidgetRow) -> Self {
        Widget::persisted(row.id, row.name, row.description, row.version)
    }
}

fn connection_error(e: sqlx::Error) -> StorageError {
    StorageError::ConnectionError(e.to_string())
}

/// PostgreSQL storage backend implementation.
pub struct PostgresWidgetStore {
    pool: PgPool,
}

impl PostgresWidgetStore {
    /// Create a new PostgreSQL storage backend.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to the database and apply pending migrations.
    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        let pool = PgPool::connect(database_url).await.map_err(|e| {
            StorageError::ConnectionError(format!("Failed to connect to database: {}", e))
        })?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| StorageError::ConnectionError(format!("Migration failed: {}", e)))?;

        Ok(Self::new(pool))
    }
}

#[async_trait]
impl WidgetStore for PostgresWidgetStore {
    async fn list(&self) -> Result<Vec<Widget>, StorageError> {
        let rows = sqlx::query_as::<_, WidgetRow>(
            r#"
            SELECT id, name, description, version
            FROM widgets
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(connection_error)?;

        Ok(rows.into_iter().map(Widget::from).collect())
    }

    async fn get(&self, id: i64) -> Result<Option<Widget>, StorageError> {
        let row = sqlx::query_as::<_, WidgetRow>(
            r#"
            SELECT id, name, description, version
            FROM widgets
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(connection_error)?;

        Ok(row.map(Widget::from))
    }

    async fn insert(&self, draft: Widget) -> Result<Widget, StorageError> {
        let row = sqlx::query_as::<_, WidgetRow>(
            r#"
            INSERT INTO widgets (name, description, version)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, version
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(INITIAL_VERSION)
        .fetch_one(&self.pool)
        .await
        .map_err(connection_error)?;

        Ok(row.into())
    }

    async fn update(&self, widget: Widget) -> Result<Widget, StorageError> {
        let id = widget
            .id
            .ok_or_else(|| StorageError::Invalid("cannot update a draft widget".to_string()))?;

        let updated = sqlx::query_as::<_, WidgetRow>(
            r#"
            UPDATE widgets
            SET name = $1, description = $2, version = version + 1
            WHERE id = $3 AND version = $4
            RETURNING id, name, description, version
            "#,
        )
        .bind(&widget.name)
        .bind(&widget.description)
        .bind(id)
        .bind(widget.version)
        .fetch_optional(&self.pool)
        .await
        .map_err(connection_error)?;

        if let Some(row) = updated {
            return Ok(row.into());
        }

        // Nothing matched: either the row is gone or its version moved on.
        let current_version = sqlx::query_scalar::<_, i32>(
            r#"
            SELECT version FROM widgets WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(connection_error)?
        .ok_or(StorageError::NotFound { id })?;

        Err(StorageError::VersionConflict {
            id,
            expected_version: widget.version,
            current_version,
        })
    }

    async fn delete(&self, id: i64) -> Result<bool, StorageError> {
        let rows_affected = sqlx::query(
            r#"
            DELETE FROM widgets
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(connection_error)?
        .rows_affected();

        Ok(rows_affected > 0)
    }
}
