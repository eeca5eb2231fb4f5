//! Bearer Token Resolution
//!
//! Turns a bearer token into an active user.

use std::sync::Arc;

use kernel::id::UserId;
use platform::token::TokenSigner;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Who is making a request on endpoints that also serve anonymous callers
#[derive(Debug, Clone)]
pub enum Identity {
    Authenticated(User),
    Anonymous,
}

impl Identity {
    pub fn user(&self) -> Option<&User> {
        match self {
            Identity::Authenticated(user) => Some(user),
            Identity::Anonymous => None,
        }
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user().map(|u| u.user_id)
    }
}

/// Resolves bearer tokens against the user store
pub struct Authenticator<R>
where
    R: UserRepository,
{
    users: Arc<R>,
    tokens: Arc<TokenSigner>,
}

impl<R> Clone for Authenticator<R>
where
    R: UserRepository,
{
    fn clone(&self) -> Self {
        Self {
            users: self.users.clone(),
            tokens: self.tokens.clone(),
        }
    }
}

impl<R> Authenticator<R>
where
    R: UserRepository,
{
    pub fn new(users: Arc<R>, tokens: Arc<TokenSigner>) -> Self {
        Self { users, tokens }
    }

    pub fn tokens(&self) -> &Arc<TokenSigner> {
        &self.tokens
    }

    /// Mandatory resolution: the token must name an existing, active user
    pub async fn resolve(&self, token: &str) -> AuthResult<User> {
        let claims = self.tokens.decode(token)?;

        let user_id = claims
            .sub
            .parse::<i64>()
            .map(UserId::new)
            .map_err(|_| AuthError::Unauthenticated)?;

        let user = self
            .users
            .find_user_by_id(user_id)
            .await?
            .ok_or(AuthError::Unauthenticated)?;

        user.ensure_active()?;

        Ok(user)
    }

    /// Optional resolution: no token means an anonymous caller
    pub async fn identify(&self, token: Option<&str>) -> AuthResult<Identity> {
        match token {
            Some(token) => self.resolve(token).await.map(Identity::Authenticated),
            None => Ok(Identity::Anonymous),
        }
    }
}
