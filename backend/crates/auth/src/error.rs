//! Auth Error Types
//!
//! Auth-specific error variants that render through the unified
//! `kernel::error::AppError` problem format.

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordHashError;
use platform::token::TokenError;
use thiserror::Error;

use crate::domain::value_object::user_name::UserNameError;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("User not found")]
    UserNotFound,

    #[error("Username already registered")]
    UserNameTaken,

    #[error("Email already registered")]
    EmailTaken,

    /// Wrong username/email or password at login
    #[error("Incorrect username or password")]
    InvalidCredentials,

    /// Missing, malformed, expired or unresolvable bearer token
    #[error("Could not validate credentials")]
    Unauthenticated,

    #[error("Inactive user")]
    AccountInactive,

    /// Current password did not verify during a password change
    #[error("Incorrect password")]
    IncorrectPassword,

    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::UserNameTaken | AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::InvalidCredentials | AuthError::Unauthenticated => ErrorKind::Unauthorized,
            AuthError::AccountInactive | AuthError::IncorrectPassword => ErrorKind::Forbidden,
            AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    fn challenges_bearer(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidCredentials | AuthError::Unauthenticated
        )
    }

    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::IncorrectPassword => {
                tracing::warn!("Password change with wrong current password");
            }
            AuthError::AccountInactive => {
                tracing::warn!("Request from inactive account");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Database(e) => AppError::from(e),
            AuthError::Internal(_) => AppError::internal("Internal server error"),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        let challenge = self.challenges_bearer();
        let mut response = AppError::from(self).into_response();
        if challenge {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => AuthError::Validation(err.message().to_string()),
            _ => AuthError::Internal(err.to_string()),
        }
    }
}

impl From<UserNameError> for AuthError {
    fn from(err: UserNameError) -> Self {
        AuthError::Validation(err.to_string())
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired | TokenError::Invalid => AuthError::Unauthenticated,
            TokenError::Signing(msg) => AuthError::Internal(msg),
        }
    }
}

impl From<PasswordHashError> for AuthError {
    fn from(err: PasswordHashError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taxonomy_status_codes() {
        assert_eq!(AuthError::UserNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AuthError::UserNameTaken.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::EmailTaken.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::Unauthenticated.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::AccountInactive.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AuthError::IncorrectPassword.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            AuthError::Validation("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_unauthenticated_response_challenges_bearer() {
        let response = AuthError::Unauthenticated.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );

        let response = AuthError::AccountInactive.into_response();
        assert!(response.headers().get(header::WWW_AUTHENTICATE).is_none());
    }

    #[test]
    fn test_token_errors_are_unauthenticated() {
        assert!(matches!(
            AuthError::from(TokenError::Expired),
            AuthError::Unauthenticated
        ));
        assert!(matches!(
            AuthError::from(TokenError::Invalid),
            AuthError::Unauthenticated
        ));
    }

    #[test]
    fn test_bad_request_app_error_becomes_validation() {
        let err = AuthError::from(AppError::bad_request("Invalid email format"));
        assert!(matches!(err, AuthError::Validation(msg) if msg == "Invalid email format"));
    }

    #[test]
    fn test_internal_detail_not_rendered() {
        let app_err = AppError::from(AuthError::Internal("secret detail".into()));
        assert!(!app_err.message().contains("secret"));
    }
}
