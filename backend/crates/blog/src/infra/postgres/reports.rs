use chrono::{DateTime, Utc};
use kernel::id::{PostId, UserId};

use super::{COMMENT_COLUMNS, CommentRow, DailyRow, POST_COLUMNS, PgBlogRepository, PostRow};
use crate::domain::entities::{AuthorSummary, Post};
use crate::domain::reports::{
    DailyCount, DashboardCounts, ExportedComment, InteractionCounts, PostCounts, PostRef,
    RecentComment, RecentPost, TopPost,
};
use crate::domain::repository::{AnalyticsRepository, DashboardRepository, ExportRepository};
use crate::domain::value_objects::{Slug, Window};
use crate::error::BlogResult;

/// `[$2, $3)` on the given timestamp column, `$3` may be NULL
fn in_window(column: &str) -> String {
    format!("{column} >= $2 AND ($3::TIMESTAMPTZ IS NULL OR {column} < $3)")
}

// ============================================================================
// Analytics
// ============================================================================

impl AnalyticsRepository for PgBlogRepository {
    async fn author_post_counts(&self, author_id: UserId) -> BlogResult<PostCounts> {
        let (total, published) = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT COUNT(*), COUNT(*) FILTER (WHERE is_published)
            FROM posts
            WHERE author_id = $1
            "#,
        )
        .bind(author_id.get())
        .fetch_one(&self.pool)
        .await?;

        Ok(PostCounts { total, published })
    }

    async fn interaction_counts(
        &self,
        author_id: UserId,
        window: Window,
    ) -> BlogResult<InteractionCounts> {
        let sql = format!(
            r#"
            SELECT
                (SELECT COUNT(*) FROM post_views x JOIN posts p ON p.id = x.post_id
                 WHERE p.author_id = $1 AND p.is_published AND {w}),
                (SELECT COUNT(*) FROM post_likes x JOIN posts p ON p.id = x.post_id
                 WHERE p.author_id = $1 AND p.is_published AND {w}),
                (SELECT COUNT(*) FROM comments x JOIN posts p ON p.id = x.post_id
                 WHERE p.author_id = $1 AND {w}),
                (SELECT COUNT(*) FROM post_shares x JOIN posts p ON p.id = x.post_id
                 WHERE p.author_id = $1 AND p.is_published AND {w})
            "#,
            w = in_window("x.created_at"),
        );

        let (views, likes, comments, shares) = sqlx::query_as::<_, (i64, i64, i64, i64)>(&sql)
            .bind(author_id.get())
            .bind(window.start)
            .bind(window.end)
            .fetch_one(&self.pool)
            .await?;

        Ok(InteractionCounts {
            views,
            likes,
            comments,
            shares,
        })
    }

    async fn active_subscriber_count(&self) -> BlogResult<i64> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM subscribers WHERE is_active")
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    async fn top_posts(
        &self,
        author_id: UserId,
        window: Window,
        limit: i64,
    ) -> BlogResult<Vec<TopPost>> {
        let sql = format!(
            r#"
            SELECT
                p.id,
                p.title,
                p.slug,
                p.created_at,
                (SELECT COUNT(*) FROM post_views x WHERE x.post_id = p.id AND {x}) AS views,
                (SELECT COUNT(*) FROM post_likes x WHERE x.post_id = p.id AND {x}) AS likes,
                (SELECT COUNT(*) FROM comments x WHERE x.post_id = p.id AND {x}) AS comments,
                (SELECT COUNT(*) FROM post_shares x WHERE x.post_id = p.id AND {x}) AS shares
            FROM posts p
            WHERE p.author_id = $1 AND p.is_published AND {p}
            ORDER BY views DESC, p.created_at DESC
            LIMIT $4
            "#,
            x = in_window("x.created_at"),
            p = in_window("p.created_at"),
        );

        let rows = sqlx::query_as::<_, TopPostRow>(&sql)
            .bind(author_id.get())
            .bind(window.start)
            .bind(window.end)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(TopPostRow::into_top_post).collect())
    }

    async fn daily_views(
        &self,
        author_id: UserId,
        since: DateTime<Utc>,
    ) -> BlogResult<Vec<DailyCount>> {
        let rows = sqlx::query_as::<_, DailyRow>(
            r#"
            SELECT (v.created_at AT TIME ZONE 'UTC')::DATE AS day, COUNT(*) AS count
            FROM post_views v
            JOIN posts p ON p.id = v.post_id
            WHERE p.author_id = $1 AND p.is_published AND v.created_at >= $2
            GROUP BY day
            ORDER BY day
            "#,
        )
        .bind(author_id.get())
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(DailyRow::into_daily).collect())
    }

    async fn daily_active_signups(&self) -> BlogResult<Vec<DailyCount>> {
        let rows = sqlx::query_as::<_, DailyRow>(
            r#"
            SELECT (subscribed_at AT TIME ZONE 'UTC')::DATE AS day, COUNT(*) AS count
            FROM subscribers
            WHERE is_active
            GROUP BY day
            ORDER BY day
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(DailyRow::into_daily).collect())
    }
}

// ============================================================================
// Dashboard
// ============================================================================

impl DashboardRepository for PgBlogRepository {
    async fn dashboard_counts(&self, author_id: UserId) -> BlogResult<DashboardCounts> {
        let row = sqlx::query_as::<_, DashboardRow>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM posts WHERE author_id = $1) AS total_posts,
                (SELECT COUNT(*) FROM posts WHERE author_id = $1 AND is_published) AS published_posts,
                (SELECT COUNT(*) FROM post_views v JOIN posts p ON p.id = v.post_id
                 WHERE p.author_id = $1 AND p.is_published) AS views,
                (SELECT COUNT(*) FROM post_likes l JOIN posts p ON p.id = l.post_id
                 WHERE p.author_id = $1 AND p.is_published) AS likes,
                (SELECT COUNT(*) FROM comments c JOIN posts p ON p.id = c.post_id
                 WHERE p.author_id = $1) AS comments,
                (SELECT COUNT(*) FROM subscribers WHERE is_active) AS subscribers
            "#,
        )
        .bind(author_id.get())
        .fetch_one(&self.pool)
        .await?;

        Ok(DashboardCounts {
            posts: PostCounts {
                total: row.total_posts,
                published: row.published_posts,
            },
            views: row.views,
            likes: row.likes,
            comments: row.comments,
            subscribers: row.subscribers,
        })
    }

    async fn recent_posts(&self, author_id: UserId, limit: i64) -> BlogResult<Vec<RecentPost>> {
        let sql = format!(
            r#"
            SELECT
                {POST_COLUMNS},
                (SELECT COUNT(*) FROM post_views WHERE post_id = p.id) AS views,
                (SELECT COUNT(*) FROM post_likes WHERE post_id = p.id) AS likes,
                (SELECT COUNT(*) FROM comments WHERE post_id = p.id) AS comments
            FROM posts p
            WHERE p.author_id = $1
            ORDER BY p.created_at DESC, p.id DESC
            LIMIT $2
            "#
        );

        let rows = sqlx::query_as::<_, RecentPostRow>(&sql)
            .bind(author_id.get())
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(RecentPostRow::into_recent).collect())
    }

    async fn recent_comments(
        &self,
        author_id: UserId,
        limit: i64,
    ) -> BlogResult<Vec<RecentComment>> {
        let sql = format!(
            r#"
            SELECT
                {COMMENT_COLUMNS},
                u.username AS author_username,
                u.full_name AS author_full_name,
                p.title AS post_title,
                p.slug AS post_slug
            FROM comments c
            JOIN posts p ON p.id = c.post_id
            JOIN users u ON u.id = c.author_id
            WHERE p.author_id = $1
            ORDER BY c.created_at DESC, c.id DESC
            LIMIT $2
            "#
        );

        let rows = sqlx::query_as::<_, RecentCommentRow>(&sql)
            .bind(author_id.get())
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(RecentCommentRow::into_recent).collect())
    }
}

// ============================================================================
// Export
// ============================================================================

impl ExportRepository for PgBlogRepository {
    async fn export_posts(&self, author_id: UserId) -> BlogResult<Vec<Post>> {
        let sql = format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM posts p
            WHERE p.author_id = $1
            ORDER BY p.created_at DESC, p.id DESC
            "#
        );

        let rows = sqlx::query_as::<_, PostRow>(&sql)
            .bind(author_id.get())
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(PostRow::into_post).collect())
    }

    async fn export_comments(&self, author_id: UserId) -> BlogResult<Vec<ExportedComment>> {
        let sql = format!(
            r#"
            SELECT {COMMENT_COLUMNS}, p.title AS post_title
            FROM comments c
            JOIN posts p ON p.id = c.post_id
            WHERE c.author_id = $1
            ORDER BY c.created_at DESC, c.id DESC
            "#
        );

        let rows = sqlx::query_as::<_, ExportedCommentRow>(&sql)
            .bind(author_id.get())
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| ExportedComment {
                comment: row.comment.into_comment(),
                post_title: row.post_title,
            })
            .collect())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct TopPostRow {
    id: i64,
    title: String,
    slug: String,
    created_at: DateTime<Utc>,
    views: i64,
    likes: i64,
    comments: i64,
    shares: i64,
}

impl TopPostRow {
    fn into_top_post(self) -> TopPost {
        TopPost {
            id: PostId::new(self.id),
            title: self.title,
            slug: Slug::from_db(self.slug),
            views: self.views,
            likes: self.likes,
            comments: self.comments,
            shares: self.shares,
            published_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct DashboardRow {
    total_posts: i64,
    published_posts: i64,
    views: i64,
    likes: i64,
    comments: i64,
    subscribers: i64,
}

#[derive(sqlx::FromRow)]
struct RecentPostRow {
    #[sqlx(flatten)]
    post: PostRow,
    views: i64,
    likes: i64,
    comments: i64,
}

impl RecentPostRow {
    fn into_recent(self) -> RecentPost {
        RecentPost {
            post: self.post.into_post(),
            views: self.views,
            likes: self.likes,
            comments: self.comments,
        }
    }
}

#[derive(sqlx::FromRow)]
struct RecentCommentRow {
    #[sqlx(flatten)]
    comment: CommentRow,
    author_username: String,
    author_full_name: Option<String>,
    post_title: String,
    post_slug: String,
}

impl RecentCommentRow {
    fn into_recent(self) -> RecentComment {
        let comment = self.comment.into_comment();
        RecentComment {
            author: AuthorSummary {
                id: comment.author_id,
                username: self.author_username,
                full_name: self.author_full_name,
            },
            post: PostRef {
                id: comment.post_id,
                title: self.post_title,
                slug: Slug::from_db(self.post_slug),
            },
            comment,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ExportedCommentRow {
    #[sqlx(flatten)]
    comment: CommentRow,
    post_title: String,
}
