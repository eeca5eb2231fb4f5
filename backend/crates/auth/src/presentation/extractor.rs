//! Request Extractors
//!
//! The authorization guard as axum extractors. `CurrentUser` demands a
//! valid bearer token; `Identity` also admits anonymous callers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use platform::token::extract_bearer;

use crate::application::{Authenticator, Identity};
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::AuthError;

/// Router state that can resolve bearer tokens
pub trait AuthState: Clone + Send + Sync + 'static {
    type Users: UserRepository + Send + Sync + 'static;

    fn authenticator(&self) -> &Authenticator<Self::Users>;
}

/// An authenticated, active user
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: AuthState,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = extract_bearer(&parts.headers)?.ok_or(AuthError::Unauthenticated)?;
        let user = state.authenticator().resolve(token).await?;
        Ok(CurrentUser(user))
    }
}

impl<S> FromRequestParts<S> for Identity
where
    S: AuthState,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = extract_bearer(&parts.headers)?;
        state.authenticator().identify(token).await
    }
}
