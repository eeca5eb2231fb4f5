//! User Entity

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{email::Email, user_name::UserName, user_password::UserPassword};
use crate::error::{AuthError, AuthResult};

pub const FULL_NAME_MAX_LENGTH: usize = 100;
pub const WEBSITE_MAX_LENGTH: usize = 255;
pub const SOCIAL_HANDLE_MAX_LENGTH: usize = 100;

/// A registered account.
///
/// Accounts are never removed; deleting an account clears `is_active`.
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub user_name: UserName,
    pub email: Email,
    pub password: UserPassword,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub twitter: Option<String>,
    pub linkedin: Option<String>,
    pub is_active: bool,
    /// Sole bypass for ownership checks
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Everything needed to insert a user row
#[derive(Debug, Clone)]
pub struct NewUser {
    pub user_name: UserName,
    pub email: Email,
    pub password: UserPassword,
    pub full_name: Option<String>,
}

/// Validated profile changes. `None` leaves a field untouched;
/// `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub user_name: Option<UserName>,
    pub email: Option<Email>,
    pub full_name: Option<Option<String>>,
    pub bio: Option<Option<String>>,
    pub website: Option<Option<String>>,
    pub twitter: Option<Option<String>>,
    pub linkedin: Option<Option<String>>,
}

impl User {
    pub fn ensure_active(&self) -> AuthResult<()> {
        if self.is_active {
            Ok(())
        } else {
            Err(AuthError::AccountInactive)
        }
    }

    pub fn apply_profile(&mut self, patch: ProfilePatch) {
        kernel::patch::apply(&mut self.user_name, patch.user_name);
        kernel::patch::apply(&mut self.email, patch.email);
        kernel::patch::apply(&mut self.full_name, patch.full_name);
        kernel::patch::apply(&mut self.bio, patch.bio);
        kernel::patch::apply(&mut self.website, patch.website);
        kernel::patch::apply(&mut self.twitter, patch.twitter);
        kernel::patch::apply(&mut self.linkedin, patch.linkedin);
        self.touch();
    }

    pub fn set_password(&mut self, password: UserPassword) {
        self.password = password;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}

/// Trim an optional free-text profile field; blank becomes `None`.
pub fn clean_text(
    field: &'static str,
    value: Option<String>,
    max: usize,
) -> AuthResult<Option<String>> {
    let Some(value) = value else {
        return Ok(None);
    };
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    if value.chars().count() > max {
        return Err(AuthError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(Some(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_password::RawPassword;

    fn user() -> User {
        let raw = RawPassword::for_verification("irrelevant".to_string());
        User {
            user_id: UserId::new(1),
            user_name: UserName::new("alice").unwrap(),
            email: Email::new("alice@example.com").unwrap(),
            password: UserPassword::from_raw(&raw, None).unwrap(),
            full_name: Some("Alice".to_string()),
            bio: Some("hello".to_string()),
            website: None,
            twitter: None,
            linkedin: None,
            is_active: true,
            is_admin: false,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_apply_profile_only_touches_present_fields() {
        let mut user = user();
        user.apply_profile(ProfilePatch {
            bio: Some(None),
            website: Some(Some("https://alice.dev".to_string())),
            ..Default::default()
        });

        assert_eq!(user.full_name.as_deref(), Some("Alice"));
        assert_eq!(user.bio, None);
        assert_eq!(user.website.as_deref(), Some("https://alice.dev"));
        assert_eq!(user.user_name.canonical(), "alice");
        assert!(user.updated_at.is_some());
    }

    #[test]
    fn test_ensure_active() {
        let mut user = user();
        assert!(user.ensure_active().is_ok());
        user.is_active = false;
        assert!(matches!(user.ensure_active(), Err(AuthError::AccountInactive)));
    }

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("bio", None, 10).unwrap(), None);
        assert_eq!(clean_text("bio", Some("   ".into()), 10).unwrap(), None);
        assert_eq!(
            clean_text("bio", Some(" hi ".into()), 10).unwrap().as_deref(),
            Some("hi")
        );
        assert!(clean_text("bio", Some("x".repeat(11)), 10).is_err());
    }
}
