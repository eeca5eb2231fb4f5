//! Register Use Case
//!
//! Creates a new user account.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::{FULL_NAME_MAX_LENGTH, NewUser, User, clean_text};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

pub struct RegisterInput {
    pub user_name: String,
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
}

pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> RegisterUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<User> {
        let user_name = UserName::new(&input.user_name)?;
        let email = Email::new(input.email)?;
        let full_name = clean_text("full_name", input.full_name, FULL_NAME_MAX_LENGTH)?;
        let raw_password = RawPassword::new(input.password)?;

        if self.user_repo.user_name_taken(&user_name, None).await? {
            return Err(AuthError::UserNameTaken);
        }
        if self.user_repo.email_taken(&email, None).await? {
            return Err(AuthError::EmailTaken);
        }

        let password = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        // the unique indexes still decide if two registrations race
        let user = self
            .user_repo
            .create_user(&NewUser {
                user_name,
                email,
                password,
                full_name,
            })
            .await?;

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            "User registered"
        );

        Ok(user)
    }
}
