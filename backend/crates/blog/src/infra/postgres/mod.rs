//! PostgreSQL Repository Implementations

mod comments;
mod interactions;
mod posts;
mod reports;
mod subscribers;

use auth::models::email::Email;
use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{CommentId, PostId, SubscriberId, UserId};
use sqlx::PgPool;

use crate::domain::entities::{AuthorSummary, Comment, CommentDetails, Post, PostDetails, Subscriber};
use crate::domain::reports::DailyCount;
use crate::domain::value_objects::Slug;

/// PostgreSQL-backed blog repository
#[derive(Clone)]
pub struct PgBlogRepository {
    pool: PgPool,
}

impl PgBlogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

/// Post columns, prefixed with the `p` alias
const POST_COLUMNS: &str = r#"
    p.id,
    p.title,
    p.content,
    p.summary,
    p.slug,
    p.is_published,
    p.author_id,
    p.created_at,
    p.updated_at
"#;

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    title: String,
    content: String,
    summary: Option<String>,
    slug: String,
    is_published: bool,
    author_id: i64,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl PostRow {
    fn into_post(self) -> Post {
        Post {
            post_id: PostId::new(self.id),
            title: self.title,
            content: self.content,
            summary: self.summary,
            slug: Slug::from_db(self.slug),
            is_published: self.is_published,
            author_id: UserId::new(self.author_id),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Author columns, from the `u` alias
const AUTHOR_COLUMNS: &str = r#"
    u.username AS author_username,
    u.full_name AS author_full_name
"#;

#[derive(sqlx::FromRow)]
struct AuthorRow {
    author_username: String,
    author_full_name: Option<String>,
}

impl AuthorRow {
    fn into_summary(self, id: UserId) -> AuthorSummary {
        AuthorSummary {
            id,
            username: self.author_username,
            full_name: self.author_full_name,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PostDetailsRow {
    #[sqlx(flatten)]
    post: PostRow,
    #[sqlx(flatten)]
    author: AuthorRow,
}

impl PostDetailsRow {
    fn into_details(self) -> PostDetails {
        let post = self.post.into_post();
        let author = self.author.into_summary(post.author_id);
        PostDetails { post, author }
    }
}

/// Comment columns, prefixed with the `c` alias
const COMMENT_COLUMNS: &str = r#"
    c.id,
    c.content,
    c.post_id,
    c.author_id,
    c.created_at,
    c.updated_at
"#;

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: i64,
    content: String,
    post_id: i64,
    author_id: i64,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl CommentRow {
    fn into_comment(self) -> Comment {
        Comment {
            comment_id: CommentId::new(self.id),
            content: self.content,
            post_id: PostId::new(self.post_id),
            author_id: UserId::new(self.author_id),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CommentDetailsRow {
    #[sqlx(flatten)]
    comment: CommentRow,
    #[sqlx(flatten)]
    author: AuthorRow,
}

impl CommentDetailsRow {
    fn into_details(self) -> CommentDetails {
        let comment = self.comment.into_comment();
        let author = self.author.into_summary(comment.author_id);
        CommentDetails { comment, author }
    }
}

const SUBSCRIBER_COLUMNS: &str = r#"
    id,
    email,
    full_name,
    is_active,
    subscribed_at,
    unsubscribed_at,
    user_id
"#;

#[derive(sqlx::FromRow)]
struct SubscriberRow {
    id: i64,
    email: String,
    full_name: Option<String>,
    is_active: bool,
    subscribed_at: DateTime<Utc>,
    unsubscribed_at: Option<DateTime<Utc>>,
    user_id: Option<i64>,
}

impl SubscriberRow {
    fn into_subscriber(self) -> Subscriber {
        Subscriber {
            subscriber_id: SubscriberId::new(self.id),
            email: Email::from_db(self.email),
            full_name: self.full_name,
            is_active: self.is_active,
            subscribed_at: self.subscribed_at,
            unsubscribed_at: self.unsubscribed_at,
            user_id: self.user_id.map(UserId::new),
        }
    }
}

#[derive(sqlx::FromRow)]
struct DailyRow {
    day: NaiveDate,
    count: i64,
}

impl DailyRow {
    fn into_daily(self) -> DailyCount {
        DailyCount {
            day: self.day,
            count: self.count,
        }
    }
}
