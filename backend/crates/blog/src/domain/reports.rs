//! Read Models
//!
//! Aggregates returned by the analytics, dashboard and export queries.

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{CommentId, PostId};
use serde::Serialize;

use crate::domain::entities::{AuthorSummary, Comment, Post};
use crate::domain::value_objects::Slug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostCounts {
    pub total: i64,
    pub published: i64,
}

impl PostCounts {
    pub fn drafts(&self) -> i64 {
        self.total - self.published
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractionCounts {
    pub views: i64,
    pub likes: i64,
    pub comments: i64,
    pub shares: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopPost {
    pub id: PostId,
    pub title: String,
    pub slug: Slug,
    pub views: i64,
    pub likes: i64,
    pub comments: i64,
    pub shares: i64,
    pub published_at: DateTime<Utc>,
}

/// Events on one UTC calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyCount {
    pub day: NaiveDate,
    pub count: i64,
}

/// All-time figures for the dashboard header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardCounts {
    pub posts: PostCounts,
    pub views: i64,
    pub likes: i64,
    pub comments: i64,
    pub subscribers: i64,
}

#[derive(Debug, Clone)]
pub struct RecentPost {
    pub post: Post,
    pub views: i64,
    pub likes: i64,
    pub comments: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostRef {
    pub id: PostId,
    pub title: String,
    pub slug: Slug,
}

/// A comment left on one of the caller's posts
#[derive(Debug, Clone)]
pub struct RecentComment {
    pub comment: Comment,
    pub author: AuthorSummary,
    pub post: PostRef,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    PostCreated,
    DraftCreated,
    CommentReceived,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ActivityData {
    Post {
        post_id: PostId,
        post_title: String,
        post_slug: Slug,
    },
    Comment {
        comment_id: CommentId,
        post_id: PostId,
        post_title: String,
        commenter: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub title: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    pub data: ActivityData,
}

/// A comment in a data export, with the title of the post it belongs to
#[derive(Debug, Clone)]
pub struct ExportedComment {
    pub comment: Comment,
    pub post_title: String,
}
