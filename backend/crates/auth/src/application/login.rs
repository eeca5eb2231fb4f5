//! Login Use Case
//!
//! Verifies a password and issues a bearer token.

use std::sync::Arc;

use platform::token::TokenSigner;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email, user_name::UserName, user_password::RawPassword,
};
use crate::error::{AuthError, AuthResult};

pub struct LoginInput {
    /// User name or email
    pub identifier: String,
    pub password: String,
}

pub struct LoginOutput {
    pub access_token: String,
    /// Seconds until the token expires
    pub expires_in: i64,
}

pub struct LoginUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    tokens: Arc<TokenSigner>,
    config: Arc<AuthConfig>,
}

impl<U> LoginUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, tokens: Arc<TokenSigner>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            tokens,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let user = self
            .find_user(&input.identifier)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let raw_password = RawPassword::for_verification(input.password);
        if !user.password.verify(&raw_password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        user.ensure_active()?;

        let issued = self.tokens.issue(&user.user_id.to_string())?;

        tracing::info!(user_id = %user.user_id, "User logged in");

        Ok(LoginOutput {
            access_token: issued.token,
            expires_in: issued.expires_in,
        })
    }

    async fn find_user(&self, identifier: &str) -> AuthResult<Option<User>> {
        if identifier.contains('@') {
            match Email::new(identifier) {
                Ok(email) => self.user_repo.find_user_by_email(&email).await,
                Err(_) => Ok(None),
            }
        } else {
            let user_name = UserName::for_lookup(identifier);
            self.user_repo.find_user_by_name(&user_name).await
        }
    }
}
