//! Custom Axum extractors
//!
//! Both extractors reject with [`ApiError`] so every failure shares the
//! `{"error": ...}` body shape.

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::Deserialize;

use super::error::ApiError;
use crate::models::{TaskText, ValidationError};

/// Raw add-todo body. `task` is optional here so a missing field maps to
/// [`ValidationError::Missing`] rather than a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct AddTodoRequest {
    pub task: Option<String>,
}

/// Extract and validate the task text from an add-todo JSON body
pub struct ValidTask(pub TaskText);

impl<S> FromRequest<S> for ValidTask
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<AddTodoRequest>::from_request(req, state)
            .await
            .map_err(|rejection| ValidationError::Malformed {
                reason: rejection.body_text(),
            })?;

        let raw = body.task.ok_or(ValidationError::Missing { field: "task" })?;
        Ok(Self(TaskText::new(&raw)?))
    }
}

/// Extract a todo id from path.
///
/// A segment that isn't an integer can't name a todo, so it is a 404 rather
/// than a validation error.
pub struct TodoId(pub i64);

impl<S> FromRequestParts<S> for TodoId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::NotFound { id: String::new() })?;

        raw.parse::<i64>()
            .map(Self)
            .map_err(|_| ApiError::NotFound { id: raw })
    }
}
