use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Version assigned to a widget when it is first persisted.
pub const INITIAL_VERSION: i32 = 1;

/// A widget resource.
///
/// A widget without an `id` is a draft that has not been persisted yet. Once the
/// store assigns an id it never changes, and `version` is bumped on every
/// successful update so clients can use it as an optimistic-lock token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Widget {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Zero until the widget is persisted. Clients may send `null` for drafts.
    #[serde(default, deserialize_with = "version_or_zero")]
    pub version: i32,
}

fn version_or_zero<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i32>::deserialize(deserializer)?.unwrap_or(0))
}

impl Widget {
    /// Create a draft widget.
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description,
            version: 0,
        }
    }

    /// Create a widget as it looks after being persisted.
    pub fn persisted(
        id: i64,
        name: impl Into<String>,
        description: Option<String>,
        version: i32,
    ) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
            description,
            version,
        }
    }

    pub fn is_draft(&self) -> bool {
        self.id.is_none()
    }

    /// Strip the id and version so the widget can be inserted as a new record.
    pub fn into_draft(self) -> Self {
        Self {
            id: None,
            version: 0,
            ..self
        }
    }

    /// Entity tag for this widget's current version, quoted as HTTP requires.
    pub fn etag(&self) -> String {
        format!("\"{}\"", self.version)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Widget name must not be blank".to_string());
        }
        Ok(())
    }
}
