//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::UserId;

use crate::domain::entity::{
    user::{NewUser, User},
    user_settings::UserSettings,
};
use crate::domain::value_object::{email::Email, user_name::UserName};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a user; a unique violation surfaces as `UserNameTaken` or
    /// `EmailTaken`
    async fn create_user(&self, user: &NewUser) -> AuthResult<User>;

    async fn find_user_by_id(&self, user_id: UserId) -> AuthResult<Option<User>>;

    /// Case-insensitive lookup by canonical name
    async fn find_user_by_name(&self, user_name: &UserName) -> AuthResult<Option<User>>;

    async fn find_user_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Whether another user (not `except`) holds this name
    async fn user_name_taken(&self, user_name: &UserName, except: Option<UserId>)
    -> AuthResult<bool>;

    /// Whether another user (not `except`) holds this email
    async fn email_taken(&self, email: &Email, except: Option<UserId>) -> AuthResult<bool>;

    /// Persist profile and password fields; `is_active` is left untouched
    async fn update_user(&self, user: &User) -> AuthResult<User>;

    /// Soft delete in place, independent of any loaded copy of the row
    async fn deactivate_user(&self, user_id: UserId) -> AuthResult<()>;
}

/// User settings repository trait
#[trait_variant::make(UserSettingsRepository: Send)]
pub trait LocalUserSettingsRepository {
    /// Fetch the settings row, inserting defaults first if there is none
    async fn find_or_create_settings(&self, user_id: UserId) -> AuthResult<UserSettings>;

    async fn update_settings(&self, settings: &UserSettings) -> AuthResult<UserSettings>;
}
