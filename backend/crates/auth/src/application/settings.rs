//! Settings Use Case

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::user_settings::{BLOG_TITLE_MAX_LENGTH, SettingsPatch, UserSettings};
use crate::domain::repository::UserSettingsRepository;
use crate::error::{AuthError, AuthResult};

pub const BLOG_DESCRIPTION_MAX_LENGTH: usize = 1000;

pub struct SettingsUseCase<S>
where
    S: UserSettingsRepository,
{
    settings_repo: Arc<S>,
}

impl<S> SettingsUseCase<S>
where
    S: UserSettingsRepository,
{
    pub fn new(settings_repo: Arc<S>) -> Self {
        Self { settings_repo }
    }

    /// Settings are created with defaults on first access
    pub async fn get(&self, user_id: UserId) -> AuthResult<UserSettings> {
        self.settings_repo.find_or_create_settings(user_id).await
    }

    pub async fn update(&self, user_id: UserId, patch: SettingsPatch) -> AuthResult<UserSettings> {
        check_length("blog_title", patch.blog_title.as_deref(), BLOG_TITLE_MAX_LENGTH)?;
        check_length(
            "blog_description",
            patch.blog_description.as_deref(),
            BLOG_DESCRIPTION_MAX_LENGTH,
        )?;

        let mut settings = self.settings_repo.find_or_create_settings(user_id).await?;
        settings.apply(patch);
        let settings = self.settings_repo.update_settings(&settings).await?;

        tracing::info!(user_id = %user_id, "Settings updated");

        Ok(settings)
    }
}

fn check_length(field: &str, value: Option<&str>, max: usize) -> AuthResult<()> {
    match value {
        Some(v) if v.chars().count() > max => Err(AuthError::Validation(format!(
            "{field} must be at most {max} characters"
        ))),
        _ => Ok(()),
    }
}
