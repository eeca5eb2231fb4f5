//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use auth::models::email::Email;
use chrono::{DateTime, Utc};
use kernel::id::{CommentId, PostId, SubscriberId, UserId};
use kernel::pagination::Page;

use crate::domain::entities::{
    Comment, CommentDetails, LikeToggle, NewComment, NewPost, NewShare, NewSubscriber, NewView,
    Post, PostDetails, PostStats, Subscriber, SubscriberStats, UserPostInteractions,
};
use crate::domain::reports::{
    DailyCount, DashboardCounts, ExportedComment, InteractionCounts, PostCounts, RecentComment,
    RecentPost, TopPost,
};
use crate::domain::value_objects::{Slug, Window};
use crate::error::BlogResult;

/// Post repository trait
#[trait_variant::make(PostRepository: Send)]
pub trait LocalPostRepository {
    /// Insert a post; a slug collision surfaces as `SlugTaken`
    async fn create_post(&self, post: &NewPost) -> BlogResult<PostDetails>;

    async fn find_post(&self, post_id: PostId) -> BlogResult<Option<PostDetails>>;

    /// Published posts, newest first
    async fn list_published_posts(&self, page: Page) -> BlogResult<Vec<PostDetails>>;

    /// All of an author's posts including drafts, newest first
    async fn list_author_posts(&self, author_id: UserId, page: Page)
    -> BlogResult<Vec<PostDetails>>;

    async fn slug_taken(&self, slug: &Slug, except: Option<PostId>) -> BlogResult<bool>;

    async fn update_post(&self, post: &Post) -> BlogResult<PostDetails>;

    /// Hard delete; comments and interaction rows go with it
    async fn delete_post(&self, post_id: PostId) -> BlogResult<bool>;
}

/// Comment repository trait
#[trait_variant::make(CommentRepository: Send)]
pub trait LocalCommentRepository {
    async fn create_comment(&self, comment: &NewComment) -> BlogResult<CommentDetails>;

    async fn find_comment(&self, comment_id: CommentId) -> BlogResult<Option<Comment>>;

    /// Oldest first
    async fn list_post_comments(&self, post_id: PostId, page: Page)
    -> BlogResult<Vec<CommentDetails>>;

    /// Newest first
    async fn list_author_comments(
        &self,
        author_id: UserId,
        page: Page,
    ) -> BlogResult<Vec<CommentDetails>>;

    async fn update_comment(&self, comment: &Comment) -> BlogResult<CommentDetails>;

    async fn delete_comment(&self, comment_id: CommentId) -> BlogResult<bool>;
}

/// View, like and share records
#[trait_variant::make(InteractionRepository: Send)]
pub trait LocalInteractionRepository {
    /// Insert unless this viewer already has a view of the post.
    /// Returns the new view id, or `None` for a duplicate.
    async fn record_view(&self, view: &NewView) -> BlogResult<Option<i64>>;

    /// Remove the like if present, otherwise add it
    async fn toggle_like(&self, post_id: PostId, user_id: UserId) -> BlogResult<LikeToggle>;

    /// Always inserts; returns the share id
    async fn record_share(&self, share: &NewShare) -> BlogResult<i64>;

    async fn post_stats(&self, post_id: PostId) -> BlogResult<PostStats>;

    async fn user_post_interactions(
        &self,
        post_id: PostId,
        user_id: UserId,
    ) -> BlogResult<UserPostInteractions>;
}

/// Newsletter subscriber repository trait
#[trait_variant::make(SubscriberRepository: Send)]
pub trait LocalSubscriberRepository {
    async fn find_subscriber_by_email(&self, email: &Email) -> BlogResult<Option<Subscriber>>;

    /// Insert a new subscriber. `None` when a row for the email appeared
    /// concurrently.
    async fn create_subscriber(&self, subscriber: &NewSubscriber)
    -> BlogResult<Option<Subscriber>>;

    /// Flip an inactive row back to active. `false` if it was already active.
    async fn reactivate_subscriber(&self, subscriber_id: SubscriberId) -> BlogResult<bool>;

    /// Deactivate the active row for `email`, if there is one
    async fn deactivate_subscriber(&self, email: &Email) -> BlogResult<Option<Subscriber>>;

    /// Active subscribers, newest first
    async fn list_active_subscribers(&self, page: Page) -> BlogResult<Vec<Subscriber>>;

    async fn subscriber_stats(&self) -> BlogResult<SubscriberStats>;
}

/// Windowed counters over one author's posts
#[trait_variant::make(AnalyticsRepository: Send)]
pub trait LocalAnalyticsRepository {
    async fn author_post_counts(&self, author_id: UserId) -> BlogResult<PostCounts>;

    /// Views, likes and shares on published posts; comments on all posts
    async fn interaction_counts(
        &self,
        author_id: UserId,
        window: Window,
    ) -> BlogResult<InteractionCounts>;

    async fn active_subscriber_count(&self) -> BlogResult<i64>;

    /// Published posts created inside `window`, by in-window views
    async fn top_posts(
        &self,
        author_id: UserId,
        window: Window,
        limit: i64,
    ) -> BlogResult<Vec<TopPost>>;

    /// Views on published posts per UTC day since `since`
    async fn daily_views(&self, author_id: UserId, since: DateTime<Utc>)
    -> BlogResult<Vec<DailyCount>>;

    /// Currently active subscribers per UTC day of subscription
    async fn daily_active_signups(&self) -> BlogResult<Vec<DailyCount>>;
}

/// Dashboard queries over one author's posts
#[trait_variant::make(DashboardRepository: Send)]
pub trait LocalDashboardRepository {
    async fn dashboard_counts(&self, author_id: UserId) -> BlogResult<DashboardCounts>;

    /// Newest posts with all-time counters
    async fn recent_posts(&self, author_id: UserId, limit: i64) -> BlogResult<Vec<RecentPost>>;

    /// Newest comments left on the author's posts
    async fn recent_comments(&self, author_id: UserId, limit: i64)
    -> BlogResult<Vec<RecentComment>>;
}

/// Everything a user wrote, for `GET /user/export-data`
#[trait_variant::make(ExportRepository: Send)]
pub trait LocalExportRepository {
    async fn export_posts(&self, author_id: UserId) -> BlogResult<Vec<Post>>;

    async fn export_comments(&self, author_id: UserId) -> BlogResult<Vec<ExportedComment>>;
}

/// Every repository the blog needs, behind one bound
pub trait BlogRepository:
    PostRepository
    + CommentRepository
    + InteractionRepository
    + SubscriberRepository
    + AnalyticsRepository
    + DashboardRepository
    + ExportRepository
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> BlogRepository for T where
    T: PostRepository
        + CommentRepository
        + InteractionRepository
        + SubscriberRepository
        + AnalyticsRepository
        + DashboardRepository
        + ExportRepository
        + Clone
        + Send
        + Sync
        + 'static
{
}
