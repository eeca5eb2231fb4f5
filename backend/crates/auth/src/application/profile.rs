//! Profile Use Cases
//!
//! Profile edits, password change and account deactivation.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::{
    FULL_NAME_MAX_LENGTH, ProfilePatch, SOCIAL_HANDLE_MAX_LENGTH, User, WEBSITE_MAX_LENGTH,
    clean_text,
};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

pub const BIO_MAX_LENGTH: usize = 2000;

/// Raw profile changes as received. Outer `None` means "not sent".
#[derive(Debug, Default)]
pub struct ProfileInput {
    pub user_name: Option<String>,
    pub email: Option<String>,
    pub full_name: Option<Option<String>>,
    pub bio: Option<Option<String>>,
    pub website: Option<Option<String>>,
    pub twitter: Option<Option<String>>,
    pub linkedin: Option<Option<String>>,
}

pub struct ChangePasswordInput {
    pub current_password: String,
    pub new_password: String,
}

pub struct ProfileUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> ProfileUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn update_profile(&self, mut user: User, input: ProfileInput) -> AuthResult<User> {
        let patch = self.validate(&user, input).await?;
        user.apply_profile(patch);

        let updated = self.user_repo.update_user(&user).await?;

        tracing::info!(user_id = %updated.user_id, "Profile updated");

        Ok(updated)
    }

    pub async fn change_password(
        &self,
        mut user: User,
        input: ChangePasswordInput,
    ) -> AuthResult<()> {
        let current = RawPassword::for_verification(input.current_password);
        if !user.password.verify(&current, self.config.pepper()) {
            return Err(AuthError::IncorrectPassword);
        }

        let new_password = RawPassword::new(input.new_password)?;
        user.set_password(UserPassword::from_raw(&new_password, self.config.pepper())?);
        self.user_repo.update_user(&user).await?;

        tracing::info!(user_id = %user.user_id, "Password changed");

        Ok(())
    }

    /// Soft delete; the row and its content stay
    pub async fn deactivate(&self, user: User) -> AuthResult<()> {
        self.user_repo.deactivate_user(user.user_id).await?;

        tracing::info!(user_id = %user.user_id, "Account deactivated");

        Ok(())
    }

    async fn validate(&self, user: &User, input: ProfileInput) -> AuthResult<ProfilePatch> {
        let user_name = match input.user_name {
            Some(raw) => {
                let name = UserName::new(&raw)?;
                if self
                    .user_repo
                    .user_name_taken(&name, Some(user.user_id))
                    .await?
                {
                    return Err(AuthError::UserNameTaken);
                }
                Some(name)
            }
            None => None,
        };

        let email = match input.email {
            Some(raw) => {
                let email = Email::new(raw)?;
                if self.user_repo.email_taken(&email, Some(user.user_id)).await? {
                    return Err(AuthError::EmailTaken);
                }
                Some(email)
            }
            None => None,
        };

        Ok(ProfilePatch {
            user_name,
            email,
            full_name: clean_field("full_name", input.full_name, FULL_NAME_MAX_LENGTH)?,
            bio: clean_field("bio", input.bio, BIO_MAX_LENGTH)?,
            website: clean_field("website", input.website, WEBSITE_MAX_LENGTH)?,
            twitter: clean_field("twitter", input.twitter, SOCIAL_HANDLE_MAX_LENGTH)?,
            linkedin: clean_field("linkedin", input.linkedin, SOCIAL_HANDLE_MAX_LENGTH)?,
        })
    }
}

fn clean_field(
    field: &'static str,
    value: Option<Option<String>>,
    max: usize,
) -> AuthResult<Option<Option<String>>> {
    value.map(|v| clean_text(field, v, max)).transpose()
}
