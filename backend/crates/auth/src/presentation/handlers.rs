//! HTTP Handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Form, Json};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    Authenticator, LoginUseCase, ProfileUseCase, RegisterUseCase, SettingsUseCase,
};
use crate::domain::entity::user_settings::UserSettings;
use crate::domain::repository::{UserRepository, UserSettingsRepository};
use crate::error::AuthResult;
use crate::presentation::dto::{
    ChangePasswordRequest, LoginForm, MessageResponse, RegisterRequest, TokenResponse,
    UpdateProfileRequest, UpdateSettingsRequest, UserResponse,
};
use crate::presentation::extractor::{AuthState, CurrentUser};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + UserSettingsRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub authenticator: Authenticator<R>,
}

impl<R> AuthAppState<R>
where
    R: UserRepository + UserSettingsRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R, config: AuthConfig) -> Self {
        let repo = Arc::new(repo);
        let authenticator = Authenticator::new(repo.clone(), Arc::new(config.token_signer()));
        Self {
            repo,
            config: Arc::new(config),
            authenticator,
        }
    }
}

impl<R> AuthState for AuthAppState<R>
where
    R: UserRepository + UserSettingsRepository + Clone + Send + Sync + 'static,
{
    type Users = R;

    fn authenticator(&self) -> &Authenticator<R> {
        &self.authenticator
    }
}

// ============================================================================
// Register / Login
// ============================================================================

/// POST /auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<(StatusCode, Json<UserResponse>)>
where
    R: UserRepository + UserSettingsRepository + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());
    let user = use_case.execute(req.into()).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// POST /auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    Form(form): Form<LoginForm>,
) -> AuthResult<Json<TokenResponse>>
where
    R: UserRepository + UserSettingsRepository + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.authenticator.tokens().clone(),
        state.config.clone(),
    );
    let output = use_case.execute(form.into()).await?;

    Ok(Json(TokenResponse {
        access_token: output.access_token,
        token_type: "bearer".to_string(),
        expires_in: output.expires_in,
    }))
}

// ============================================================================
// Profile
// ============================================================================

/// GET /user/profile
pub async fn get_profile(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(UserResponse::from(&user))
}

/// PUT /user/profile
pub async fn update_profile<R>(
    State(state): State<AuthAppState<R>>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<UpdateProfileRequest>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + UserSettingsRepository + Clone + Send + Sync + 'static,
{
    let use_case = ProfileUseCase::new(state.repo.clone(), state.config.clone());
    let user = use_case.update_profile(user, req.into()).await?;

    Ok(Json(UserResponse::from(&user)))
}

/// PUT /user/change-password
pub async fn change_password<R>(
    State(state): State<AuthAppState<R>>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<ChangePasswordRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + UserSettingsRepository + Clone + Send + Sync + 'static,
{
    let use_case = ProfileUseCase::new(state.repo.clone(), state.config.clone());
    use_case.change_password(user, req.into()).await?;

    Ok(Json(MessageResponse::new("Password updated successfully")))
}

/// DELETE /user/account
pub async fn delete_account<R>(
    State(state): State<AuthAppState<R>>,
    CurrentUser(user): CurrentUser,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + UserSettingsRepository + Clone + Send + Sync + 'static,
{
    let use_case = ProfileUseCase::new(state.repo.clone(), state.config.clone());
    use_case.deactivate(user).await?;

    Ok(Json(MessageResponse::new("Account deactivated successfully")))
}

// ============================================================================
// Settings
// ============================================================================

/// GET /user/settings
pub async fn get_settings<R>(
    State(state): State<AuthAppState<R>>,
    CurrentUser(user): CurrentUser,
) -> AuthResult<Json<UserSettings>>
where
    R: UserRepository + UserSettingsRepository + Clone + Send + Sync + 'static,
{
    let use_case = SettingsUseCase::new(state.repo.clone());
    let settings = use_case.get(user.user_id).await?;

    Ok(Json(settings))
}

/// PUT /user/settings
pub async fn update_settings<R>(
    State(state): State<AuthAppState<R>>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<UpdateSettingsRequest>,
) -> AuthResult<Json<UserSettings>>
where
    R: UserRepository + UserSettingsRepository + Clone + Send + Sync + 'static,
{
    let use_case = SettingsUseCase::new(state.repo.clone());
    let settings = use_case.update(user.user_id, req.into()).await?;

    Ok(Json(settings))
}
