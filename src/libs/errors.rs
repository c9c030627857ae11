//! Error taxonomy for the task service.
//!
//! Every fallible path in the crate funnels into [`TaskError`]. The variants
//! split along the boundaries the handlers care about: client-fixable
//! validation problems (400), missing records (404), undecodable bodies (400),
//! and opaque storage failures (500). Handlers are the only place errors are
//! turned into status codes; everything below them just propagates.

use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    // Validation failures
    #[error("title is required")]
    TitleRequired,
    #[error("title cannot exceed 255 characters")]
    TitleTooLong,
    #[error("description cannot exceed 500 characters")]
    DescriptionTooLong,
    #[error("due_date must be in format YYYY-MM-DD and not less than today")]
    InvalidDueDate,
    #[error("at least 1 parameter must be set to update")]
    NoFieldsToUpdate,
    #[error("completion status is required")]
    CompletionStatusRequired,

    // Boundary failures
    #[error("at least 1 parameter(title) must be set to create")]
    NoParamsToCreate,
    #[error("at least 1 parameter must be set to update")]
    NoParamsToUpdate,
    #[error("completion status is required")]
    NoParamsToChangeCompletionStatus,
    #[error("task id is required")]
    TaskIdRequired,
    #[error("id must be a valid lowercase v4 uuid")]
    InvalidIdFormat,
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    // Lookup and storage failures
    #[error("task not found")]
    NotFound,
    #[error("storage failure")]
    Storage(#[from] rusqlite::Error),
}

impl TaskError {
    /// The HTTP status this error maps to at the boundary.
    pub fn status(&self) -> StatusCode {
        match self {
            TaskError::NotFound => StatusCode::NOT_FOUND,
            TaskError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    /// Whether the error message is safe to echo to the client.
    ///
    /// Storage errors carry driver detail that belongs in logs only.
    pub fn client_visible(&self) -> bool {
        !matches!(self, TaskError::Storage(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_the_taxonomy() {
        assert_eq!(TaskError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(TaskError::TitleRequired.status(), StatusCode::BAD_REQUEST);
        assert_eq!(TaskError::InvalidIdFormat.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            TaskError::Storage(rusqlite::Error::InvalidQuery).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn storage_detail_is_not_client_visible() {
        assert!(TaskError::TitleTooLong.client_visible());
        assert!(!TaskError::Storage(rusqlite::Error::InvalidQuery).client_visible());
    }
}
