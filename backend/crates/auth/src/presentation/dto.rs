//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use serde::{Deserialize, Serialize};

use crate::application::{ChangePasswordInput, LoginInput, ProfileInput, RegisterInput};
use crate::domain::entity::{user::User, user_settings::SettingsPatch};

// ============================================================================
// Register / Login
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub full_name: Option<String>,
}

impl From<RegisterRequest> for RegisterInput {
    fn from(req: RegisterRequest) -> Self {
        Self {
            user_name: req.username,
            email: req.email,
            password: req.password,
            full_name: req.full_name,
        }
    }
}

/// Login form (`application/x-www-form-urlencoded`)
#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    /// User name or email
    pub username: String,
    pub password: String,
}

impl From<LoginForm> for LoginInput {
    fn from(form: LoginForm) -> Self {
        Self {
            identifier: form.username,
            password: form.password,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

// ============================================================================
// User
// ============================================================================

/// Public view of a user; never carries the password hash
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub twitter: Option<String>,
    pub linkedin: Option<String>,
    pub is_active: bool,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.user_id,
            username: user.user_name.original().to_string(),
            email: user.email.as_str().to_string(),
            full_name: user.full_name.clone(),
            bio: user.bio.clone(),
            website: user.website.clone(),
            twitter: user.twitter.clone(),
            linkedin: user.linkedin.clone(),
            is_active: user.is_active,
            is_admin: user.is_admin,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "kernel::patch::double_option")]
    pub full_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "kernel::patch::double_option")]
    pub bio: Option<Option<String>>,
    #[serde(default, deserialize_with = "kernel::patch::double_option")]
    pub website: Option<Option<String>>,
    #[serde(default, deserialize_with = "kernel::patch::double_option")]
    pub twitter: Option<Option<String>>,
    #[serde(default, deserialize_with = "kernel::patch::double_option")]
    pub linkedin: Option<Option<String>>,
}

impl From<UpdateProfileRequest> for ProfileInput {
    fn from(req: UpdateProfileRequest) -> Self {
        Self {
            user_name: req.username,
            email: req.email,
            full_name: req.full_name,
            bio: req.bio,
            website: req.website,
            twitter: req.twitter,
            linkedin: req.linkedin,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

impl From<ChangePasswordRequest> for ChangePasswordInput {
    fn from(req: ChangePasswordRequest) -> Self {
        Self {
            current_password: req.current_password,
            new_password: req.new_password,
        }
    }
}

// ============================================================================
// Settings
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateSettingsRequest {
    pub email_notifications: Option<bool>,
    pub push_notifications: Option<bool>,
    pub newsletter_subscription: Option<bool>,
    pub comment_notifications: Option<bool>,
    pub like_notifications: Option<bool>,
    pub public_profile: Option<bool>,
    pub show_email: Option<bool>,
    pub blog_title: Option<String>,
    pub blog_description: Option<String>,
    pub allow_comments: Option<bool>,
    pub moderate_comments: Option<bool>,
}

impl From<UpdateSettingsRequest> for SettingsPatch {
    fn from(req: UpdateSettingsRequest) -> Self {
        Self {
            email_notifications: req.email_notifications,
            push_notifications: req.push_notifications,
            newsletter_subscription: req.newsletter_subscription,
            comment_notifications: req.comment_notifications,
            like_notifications: req.like_notifications,
            public_profile: req.public_profile,
            show_email: req.show_email,
            blog_title: req.blog_title,
            blog_description: req.blog_description,
            allow_comments: req.allow_comments,
            moderate_comments: req.moderate_comments,
        }
    }
}

// ============================================================================
// Common
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_patch_distinguishes_null_from_absent() {
        let req: UpdateProfileRequest =
            serde_json::from_str(r#"{"bio": null, "website": "https://example.com"}"#).unwrap();
        assert_eq!(req.bio, Some(None));
        assert_eq!(req.website, Some(Some("https://example.com".to_string())));
        assert_eq!(req.full_name, None);
        assert_eq!(req.username, None);
    }

    #[test]
    fn test_settings_request_is_partial() {
        let req: UpdateSettingsRequest =
            serde_json::from_str(r#"{"show_email": true}"#).unwrap();
        let patch = SettingsPatch::from(req);
        assert_eq!(patch.show_email, Some(true));
        assert_eq!(patch.blog_title, None);
    }
}
