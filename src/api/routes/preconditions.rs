//! `If-Match` precondition handling for optimistic locking.

use std::convert::Infallible;

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::{HeaderMap, header, request::Parts};

use super::error::ApiError;
use crate::models::Widget;

/// Parsed `If-Match` request header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IfMatch {
    /// `If-Match: *` - any current representation matches
    Any,
    /// The entity tags the client listed, unquoted
    Tags(Vec<String>),
}

impl IfMatch {
    /// Parse a raw header value.
    ///
    /// Accepts a comma separated list of tags that may be quoted, weak
    /// (`W/"1"`) or bare (`1`). Returns `None` when no tag is present.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw == "*" {
            return Some(IfMatch::Any);
        }

        let tags: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .map(|tag| tag.strip_prefix("W/").unwrap_or(tag))
            .map(|tag| tag.trim_matches('"').to_string())
            .filter(|tag| !tag.is_empty())
            .collect();

        if tags.is_empty() { None } else { Some(IfMatch::Tags(tags)) }
    }

    /// Read the precondition from request headers, `None` when absent.
    ///
    /// Bytes that are not visible ASCII are decoded lossily; such tags never
    /// equal a version, so they fail the check instead of rejecting the request.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let value = headers.get(header::IF_MATCH)?;
        IfMatch::parse(&String::from_utf8_lossy(value.as_bytes()))
    }

    /// Whether the precondition holds for the stored widget.
    pub fn matches(&self, widget: &Widget) -> bool {
        match self {
            IfMatch::Any => true,
            IfMatch::Tags(tags) => tags
                .iter()
                .any(|tag| tag.parse::<i32>().is_ok_and(|v| v == widget.version)),
        }
    }

    /// Check the precondition, returning the error to answer with on mismatch.
    pub fn check(&self, widget: &Widget) -> Result<(), ApiError> {
        if self.matches(widget) {
            return Ok(());
        }
        Err(ApiError::PreconditionFailed {
            expected: self.to_string(),
            current: widget.version,
        })
    }
}

impl std::fmt::Display for IfMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IfMatch::Any => write!(f, "*"),
            IfMatch::Tags(tags) => write!(f, "{}", tags.join(", ")),
        }
    }
}

impl<S> FromRequestParts<S> for IfMatch
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        IfMatch::from_headers(&parts.headers).ok_or(ApiError::PreconditionRequired)
    }
}

// Lets handlers decide when a missing header matters.
impl<S> OptionalFromRequestParts<S> for IfMatch
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(IfMatch::from_headers(&parts.headers))
    }
}
