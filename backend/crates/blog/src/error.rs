//! Blog Error Types
//!
//! Blog-specific error variants that render through the unified
//! `kernel::error::AppError` problem format.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Blog-specific result type alias
pub type BlogResult<T> = Result<T, BlogError>;

#[derive(Debug, Error)]
pub enum BlogError {
    /// Missing, or a draft the caller may not see
    #[error("Post not found")]
    PostNotFound,

    #[error("Comment not found")]
    CommentNotFound,

    #[error("Subscriber not found")]
    SubscriberNotFound,

    /// Authenticated, but neither owner nor admin
    #[error("Not enough permissions")]
    Forbidden,

    #[error("A post with this slug already exists")]
    SlugTaken,

    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BlogError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            BlogError::PostNotFound
            | BlogError::CommentNotFound
            | BlogError::SubscriberNotFound => ErrorKind::NotFound,
            BlogError::Forbidden => ErrorKind::Forbidden,
            BlogError::SlugTaken => ErrorKind::Conflict,
            BlogError::Validation(_) => ErrorKind::BadRequest,
            BlogError::Database(_) | BlogError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    fn log(&self) {
        match self {
            BlogError::Database(e) => {
                tracing::error!(error = %e, "Blog database error");
            }
            BlogError::Internal(msg) => {
                tracing::error!(message = %msg, "Blog internal error");
            }
            BlogError::Forbidden => {
                tracing::warn!("Blog mutation without ownership");
            }
            _ => {
                tracing::debug!(error = %self, "Blog error");
            }
        }
    }
}

impl From<BlogError> for AppError {
    fn from(err: BlogError) -> Self {
        match err {
            BlogError::Database(e) => AppError::from(e),
            BlogError::Internal(_) => AppError::internal("Internal server error"),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

impl IntoResponse for BlogError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}

impl From<AppError> for BlogError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => BlogError::Validation(err.message().to_string()),
            _ => BlogError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taxonomy_status_codes() {
        assert_eq!(BlogError::PostNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(BlogError::CommentNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(BlogError::SubscriberNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(BlogError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(BlogError::SlugTaken.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            BlogError::Validation("empty".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_conflict_keeps_its_title() {
        let app: AppError = BlogError::SlugTaken.into();
        assert_eq!(app.kind(), ErrorKind::Conflict);
        assert_eq!(app.message(), "A post with this slug already exists");
    }

    #[test]
    fn test_internal_detail_is_hidden() {
        let app: AppError = BlogError::Internal("pool exploded".into()).into();
        assert_eq!(app.kind(), ErrorKind::InternalServerError);
        assert!(!app.message().contains("pool"));
    }

    #[test]
    fn test_bad_request_app_error_becomes_validation() {
        let err = BlogError::from(AppError::bad_request("limit must be between 1 and 100"));
        assert!(matches!(err, BlogError::Validation(ref m) if m.contains("limit")));
    }
}
