//! UserSettings Entity
//!
//! One row per user, created the first time settings are read or written.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use serde::Serialize;

pub const DEFAULT_BLOG_TITLE: &str = "My Blog";
pub const DEFAULT_BLOG_DESCRIPTION: &str = "Welcome to my blog";
pub const BLOG_TITLE_MAX_LENGTH: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSettings {
    pub user_id: UserId,

    // Notifications
    pub email_notifications: bool,
    pub push_notifications: bool,
    pub newsletter_subscription: bool,
    pub comment_notifications: bool,
    pub like_notifications: bool,

    // Privacy
    pub public_profile: bool,
    pub show_email: bool,

    // Blog
    pub blog_title: String,
    pub blog_description: String,
    pub allow_comments: bool,
    pub moderate_comments: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Settings changes; absent fields stay as they are
#[derive(Debug, Clone, Default)]
pub struct SettingsPatch {
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

impl UserSettings {
    pub fn defaults(user_id: UserId) -> Self {
        Self {
            user_id,
            email_notifications: true,
            push_notifications: false,
            newsletter_subscription: true,
            comment_notifications: true,
            like_notifications: false,
            public_profile: true,
            show_email: false,
            blog_title: DEFAULT_BLOG_TITLE.to_string(),
            blog_description: DEFAULT_BLOG_DESCRIPTION.to_string(),
            allow_comments: true,
            moderate_comments: false,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    pub fn apply(&mut self, patch: SettingsPatch) {
        use kernel::patch::apply;

        apply(&mut self.email_notifications, patch.email_notifications);
        apply(&mut self.push_notifications, patch.push_notifications);
        apply(&mut self.newsletter_subscription, patch.newsletter_subscription);
        apply(&mut self.comment_notifications, patch.comment_notifications);
        apply(&mut self.like_notifications, patch.like_notifications);
        apply(&mut self.public_profile, patch.public_profile);
        apply(&mut self.show_email, patch.show_email);
        apply(&mut self.blog_title, patch.blog_title);
        apply(&mut self.blog_description, patch.blog_description);
        apply(&mut self.allow_comments, patch.allow_comments);
        apply(&mut self.moderate_comments, patch.moderate_comments);
        self.updated_at = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = UserSettings::defaults(UserId::new(5));
        assert!(settings.email_notifications);
        assert!(!settings.push_notifications);
        assert!(settings.allow_comments);
        assert_eq!(settings.blog_title, "My Blog");
        assert_eq!(settings.blog_description, "Welcome to my blog");
    }

    #[test]
    fn test_apply_partial() {
        let mut settings = UserSettings::defaults(UserId::new(5));
        settings.apply(SettingsPatch {
            show_email: Some(true),
            blog_title: Some("Notes".to_string()),
            ..Default::default()
        });

        assert!(settings.show_email);
        assert_eq!(settings.blog_title, "Notes");
        assert!(settings.email_notifications);
        assert!(settings.updated_at.is_some());
    }
}
