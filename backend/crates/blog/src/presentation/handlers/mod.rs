//! HTTP Handlers

mod analytics;
mod comments;
mod dashboard;
mod export;
mod interactions;
mod posts;
mod subscribers;

pub use analytics::*;
pub use comments::*;
pub use dashboard::*;
pub use export::*;
pub use interactions::*;
pub use posts::*;
pub use subscribers::*;

use std::sync::Arc;

use auth::domain::repository::UserRepository;
use auth::{AuthState, Authenticator};

use crate::domain::repository::BlogRepository;

/// Shared state for blog handlers
///
/// `U` is the user store behind the authorization guard.
pub struct BlogAppState<R, U>
where
    R: BlogRepository,
    U: UserRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub authenticator: Authenticator<U>,
}

impl<R, U> Clone for BlogAppState<R, U>
where
    R: BlogRepository,
    U: UserRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            authenticator: self.authenticator.clone(),
        }
    }
}

impl<R, U> BlogAppState<R, U>
where
    R: BlogRepository,
    U: UserRepository + Send + Sync + 'static,
{
    pub fn new(repo: R, authenticator: Authenticator<U>) -> Self {
        Self {
            repo: Arc::new(repo),
            authenticator,
        }
    }
}

impl<R, U> AuthState for BlogAppState<R, U>
where
    R: BlogRepository,
    U: UserRepository + Send + Sync + 'static,
{
    type Users = U;

    fn authenticator(&self) -> &Authenticator<U> {
        &self.authenticator
    }
}
