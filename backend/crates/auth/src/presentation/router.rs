//! Auth Router

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::application::config::AuthConfig;
use crate::domain::repository::{UserRepository, UserSettingsRepository};
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgAuthRepository, config: AuthConfig) -> Router {
    auth_router_generic(repo, config)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: UserRepository + UserSettingsRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState::new(repo, config);

    Router::new()
        .route("/auth/register", post(handlers::register::<R>))
        .route("/auth/login", post(handlers::login::<R>))
        .route(
            "/user/profile",
            get(handlers::get_profile).put(handlers::update_profile::<R>),
        )
        .route("/user/change-password", put(handlers::change_password::<R>))
        .route(
            "/user/settings",
            get(handlers::get_settings::<R>).put(handlers::update_settings::<R>),
        )
        .route("/user/account", delete(handlers::delete_account::<R>))
        .with_state(state)
}
