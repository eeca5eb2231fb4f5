//! Domain Entities
//!
//! Core business entities for the blog domain.

use auth::models::email::Email;
use chrono::{DateTime, Utc};
use kernel::id::{CommentId, PostId, SubscriberId, UserId};
use serde::Serialize;

use crate::domain::value_objects::{Slug, ViewerKey};
use crate::error::{BlogError, BlogResult};

pub const TITLE_MAX_LENGTH: usize = 200;
pub const SUMMARY_MAX_LENGTH: usize = 500;
pub const COMMENT_MAX_LENGTH: usize = 5000;

/// Who wrote a post or comment, as shown next to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorSummary {
    pub id: UserId,
    pub username: String,
    pub full_name: Option<String>,
}

// ============================================================================
// Post
// ============================================================================

#[derive(Debug, Clone)]
pub struct Post {
    pub post_id: PostId,
    pub title: String,
    pub content: String,
    pub summary: Option<String>,
    pub slug: Slug,
    pub is_published: bool,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct PostDetails {
    pub post: Post,
    pub author: AuthorSummary,
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub summary: Option<String>,
    pub slug: Slug,
    pub is_published: bool,
    pub author_id: UserId,
}

impl NewPost {
    pub fn new(
        author_id: UserId,
        title: String,
        content: String,
        summary: Option<String>,
        is_published: bool,
    ) -> BlogResult<Self> {
        let title = validate_title(&title)?;
        let slug = Slug::from_title(&title)?;
        Ok(Self {
            title,
            content,
            summary: validate_summary(summary)?,
            slug,
            is_published,
            author_id,
        })
    }
}

/// Post changes; absent fields stay as they are. `summary: Some(None)`
/// clears the summary.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub summary: Option<Option<String>>,
    pub is_published: Option<bool>,
}

impl Post {
    /// Apply a patch; a new title brings a new slug
    pub fn apply(&mut self, patch: PostPatch) -> BlogResult<()> {
        let retitle = match patch.title {
            Some(title) => {
                let title = validate_title(&title)?;
                let slug = Slug::from_title(&title)?;
                Some((title, slug))
            }
            None => None,
        };
        let summary = patch.summary.map(validate_summary).transpose()?;

        if let Some((title, slug)) = retitle {
            self.title = title;
            self.slug = slug;
        }
        kernel::patch::apply(&mut self.summary, summary);
        kernel::patch::apply(&mut self.content, patch.content);
        kernel::patch::apply(&mut self.is_published, patch.is_published);
        self.updated_at = Some(Utc::now());
        Ok(())
    }
}

fn validate_title(title: &str) -> BlogResult<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(BlogError::Validation("Title must not be empty".to_string()));
    }
    if title.chars().count() > TITLE_MAX_LENGTH {
        return Err(BlogError::Validation(format!(
            "Title must be at most {TITLE_MAX_LENGTH} characters"
        )));
    }
    Ok(title.to_string())
}

fn validate_summary(summary: Option<String>) -> BlogResult<Option<String>> {
    match summary {
        Some(s) if s.chars().count() > SUMMARY_MAX_LENGTH => Err(BlogError::Validation(format!(
            "Summary must be at most {SUMMARY_MAX_LENGTH} characters"
        ))),
        other => Ok(other),
    }
}

// ============================================================================
// Comment
// ============================================================================

#[derive(Debug, Clone)]
pub struct Comment {
    pub comment_id: CommentId,
    pub content: String,
    pub post_id: PostId,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct CommentDetails {
    pub comment: Comment,
    pub author: AuthorSummary,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub content: String,
    pub post_id: PostId,
    pub author_id: UserId,
}

impl NewComment {
    pub fn new(author_id: UserId, post_id: PostId, content: String) -> BlogResult<Self> {
        Ok(Self {
            content: validate_comment(content)?,
            post_id,
            author_id,
        })
    }
}

impl Comment {
    pub fn edit(&mut self, content: String) -> BlogResult<()> {
        self.content = validate_comment(content)?;
        self.updated_at = Some(Utc::now());
        Ok(())
    }
}

fn validate_comment(content: String) -> BlogResult<String> {
    if content.trim().is_empty() {
        return Err(BlogError::Validation(
            "Comment must not be empty".to_string(),
        ));
    }
    if content.chars().count() > COMMENT_MAX_LENGTH {
        return Err(BlogError::Validation(format!(
            "Comment must be at most {COMMENT_MAX_LENGTH} characters"
        )));
    }
    Ok(content)
}

// ============================================================================
// Interactions
// ============================================================================

#[derive(Debug, Clone)]
pub struct NewView {
    pub post_id: PostId,
    pub viewer: ViewerKey,
    /// Stored for every view, also when the viewer is a user
    pub ip_address: String,
    pub user_agent: Option<String>,
}

/// Result of a view tracking request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewOutcome {
    Tracked { view_id: i64 },
    AlreadyTracked,
}

/// State after a like toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeToggle {
    Liked { like_id: i64 },
    Unliked,
}

impl LikeToggle {
    pub fn is_liked(self) -> bool {
        matches!(self, LikeToggle::Liked { .. })
    }
}

#[derive(Debug, Clone)]
pub struct NewShare {
    pub post_id: PostId,
    pub user_id: Option<UserId>,
    pub platform: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PostStats {
    pub post_id: PostId,
    pub views: i64,
    pub likes: i64,
    pub comments: i64,
    pub shares: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UserPostInteractions {
    pub post_id: PostId,
    pub has_liked: bool,
    pub has_viewed: bool,
}

// ============================================================================
// Subscriber
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct Subscriber {
    #[serde(rename = "id")]
    pub subscriber_id: SubscriberId,
    pub email: Email,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub subscribed_at: DateTime<Utc>,
    pub unsubscribed_at: Option<DateTime<Utc>>,
    pub user_id: Option<UserId>,
}

#[derive(Debug, Clone)]
pub struct NewSubscriber {
    pub email: Email,
    pub full_name: Option<String>,
    pub user_id: Option<UserId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscribeOutcome {
    Subscribed { subscriber_id: SubscriberId },
    Reactivated,
    AlreadySubscribed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubscriberStats {
    pub total_active: i64,
    pub total_unsubscribed: i64,
    pub total_all_time: i64,
}

impl SubscriberStats {
    pub fn new(total_active: i64, total_unsubscribed: i64) -> Self {
        Self {
            total_active,
            total_unsubscribed,
            total_all_time: total_active + total_unsubscribed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post() -> Post {
        Post {
            post_id: PostId::new(1),
            title: "First Post".to_string(),
            content: "Hello".to_string(),
            summary: Some("Intro".to_string()),
            slug: Slug::from_title("First Post").unwrap(),
            is_published: false,
            author_id: UserId::new(1),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_new_post_derives_slug_from_trimmed_title() {
        let new = NewPost::new(
            UserId::new(1),
            "  Rust in Production ".to_string(),
            "body".to_string(),
            None,
            false,
        )
        .unwrap();
        assert_eq!(new.title, "Rust in Production");
        assert_eq!(new.slug.as_str(), "rust-in-production");
    }

    #[test]
    fn test_patch_without_title_keeps_slug() {
        let mut post = post();
        post.apply(PostPatch {
            content: Some("Updated".to_string()),
            is_published: Some(true),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(post.slug.as_str(), "first-post");
        assert_eq!(post.content, "Updated");
        assert!(post.is_published);
        assert!(post.updated_at.is_some());
    }

    #[test]
    fn test_patch_with_title_regenerates_slug() {
        let mut post = post();
        post.apply(PostPatch {
            title: Some("A Better Title".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(post.title, "A Better Title");
        assert_eq!(post.slug.as_str(), "a-better-title");
    }

    #[test]
    fn test_patch_null_summary_clears_it() {
        let mut post = post();
        post.apply(PostPatch {
            summary: Some(None),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(post.summary, None);
    }

    #[test]
    fn test_patch_rejects_empty_title() {
        let mut post = post();
        let result = post.apply(PostPatch {
            title: Some("   ".to_string()),
            ..Default::default()
        });
        assert!(matches!(result, Err(BlogError::Validation(_))));
        assert_eq!(post.title, "First Post");
    }

    #[test]
    fn test_blank_comment_is_rejected() {
        let result = NewComment::new(UserId::new(1), PostId::new(1), " \n ".to_string());
        assert!(matches!(result, Err(BlogError::Validation(_))));
    }

    #[test]
    fn test_subscriber_stats_total() {
        let stats = SubscriberStats::new(4, 3);
        assert_eq!(stats.total_all_time, 7);
    }
}
