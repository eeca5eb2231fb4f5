//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, extractors
//!
//! ## Features
//! - Registration with username, email and password
//! - Login with username or email, issuing a JWT bearer token
//! - Profile, password and settings management
//! - Soft account deletion (`is_active = false`)
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional pepper
//! - HS256 bearer tokens whose subject is the user id
//! - Every authenticated request re-checks that the account is active
//! - `is_admin` is the only role; it bypasses ownership checks elsewhere

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::{Authenticator, Identity};
pub use domain::entity::user::User;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use presentation::extractor::{AuthState, CurrentUser};
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}
