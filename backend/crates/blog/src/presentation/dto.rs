//! API DTOs (Data Transfer Objects)
//!
//! Entity payloads are snake_case; analytics and dashboard aggregates use
//! camelCase keys.

use auth::models::UserResponse;
use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{CommentId, PostId, SubscriberId, UserId};
use serde::{Deserialize, Serialize};

use crate::application::{CreatePostInput, Overview, UserExport};
use crate::domain::entities::{
    AuthorSummary, CommentDetails, LikeToggle, Post, PostDetails, PostPatch, SubscribeOutcome,
    ViewOutcome,
};
use crate::domain::reports::{
    ActivityEntry, DailyCount, DashboardCounts, ExportedComment, PostRef, RecentComment,
    RecentPost, TopPost,
};
use crate::domain::value_objects::{Slug, TimeRange};

// ============================================================================
// Posts
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub is_published: bool,
}

impl From<CreatePostRequest> for CreatePostInput {
    fn from(req: CreatePostRequest) -> Self {
        Self {
            title: req.title,
            content: req.content,
            summary: req.summary,
            is_published: req.is_published,
        }
    }
}

/// Absent fields stay unchanged; `"summary": null` clears the summary
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePostRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "kernel::patch::double_option")]
    pub summary: Option<Option<String>>,
    #[serde(default)]
    pub is_published: Option<bool>,
}

impl From<UpdatePostRequest> for PostPatch {
    fn from(req: UpdatePostRequest) -> Self {
        Self {
            title: req.title,
            content: req.content,
            summary: req.summary,
            is_published: req.is_published,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub summary: Option<String>,
    pub slug: Slug,
    pub is_published: bool,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub author: AuthorSummary,
}

impl From<PostDetails> for PostResponse {
    fn from(details: PostDetails) -> Self {
        let PostDetails { post, author } = details;
        Self {
            id: post.post_id,
            title: post.title,
            content: post.content,
            summary: post.summary,
            slug: post.slug,
            is_published: post.is_published,
            author_id: post.author_id,
            created_at: post.created_at,
            updated_at: post.updated_at,
            author,
        }
    }
}

// ============================================================================
// Comments
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
    pub post_id: PostId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCommentRequest {
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: CommentId,
    pub content: String,
    pub post_id: PostId,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub author: AuthorSummary,
}

impl From<CommentDetails> for CommentResponse {
    fn from(details: CommentDetails) -> Self {
        let CommentDetails { comment, author } = details;
        Self {
            id: comment.comment_id,
            content: comment.content,
            post_id: comment.post_id,
            author_id: comment.author_id,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
            author,
        }
    }
}

// ============================================================================
// Interactions
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct PostInteractionRequest {
    pub post_id: PostId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShareRequest {
    pub post_id: PostId,
    #[serde(default)]
    pub platform: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_id: Option<i64>,
}

impl From<ViewOutcome> for ViewResponse {
    fn from(outcome: ViewOutcome) -> Self {
        match outcome {
            ViewOutcome::Tracked { view_id } => Self {
                message: "View tracked successfully".to_string(),
                view_id: Some(view_id),
            },
            ViewOutcome::AlreadyTracked => Self {
                message: "View already tracked".to_string(),
                view_id: None,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeResponse {
    pub message: String,
    pub liked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub like_id: Option<i64>,
}

impl From<LikeToggle> for LikeResponse {
    fn from(toggle: LikeToggle) -> Self {
        match toggle {
            LikeToggle::Liked { like_id } => Self {
                message: "Post liked".to_string(),
                liked: true,
                like_id: Some(like_id),
            },
            LikeToggle::Unliked => Self {
                message: "Post unliked".to_string(),
                liked: false,
                like_id: None,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ShareResponse {
    pub message: String,
    pub share_id: i64,
}

impl ShareResponse {
    pub fn new(share_id: i64) -> Self {
        Self {
            message: "Share tracked successfully".to_string(),
            share_id,
        }
    }
}

// ============================================================================
// Subscriptions
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct SubscribeRequest {
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UnsubscribeQuery {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscribeResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscriber_id: Option<SubscriberId>,
}

impl From<SubscribeOutcome> for SubscribeResponse {
    fn from(outcome: SubscribeOutcome) -> Self {
        let (message, subscriber_id) = match outcome {
            SubscribeOutcome::Subscribed { subscriber_id } => {
                ("Successfully subscribed", Some(subscriber_id))
            }
            SubscribeOutcome::Reactivated => ("Subscription reactivated", None),
            SubscribeOutcome::AlreadySubscribed => ("Email already subscribed", None),
        };
        Self {
            message: message.to_string(),
            subscriber_id,
        }
    }
}

// ============================================================================
// Analytics
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyticsQuery {
    #[serde(default)]
    pub time_range: Option<String>,
    #[serde(default)]
    pub limit: Option<i64>,
}

impl AnalyticsQuery {
    pub fn range(&self) -> TimeRange {
        self.time_range
            .as_deref()
            .map(TimeRange::parse)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewBody {
    pub total_posts: i64,
    pub published_posts: i64,
    pub draft_posts: i64,
    pub total_views: i64,
    pub total_likes: i64,
    pub total_comments: i64,
    pub total_shares: i64,
    pub total_subscribers: i64,
    pub views_change: f64,
    pub likes_change: f64,
    pub comments_change: f64,
    pub shares_change: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewResponse {
    pub overview: OverviewBody,
    pub time_range: &'static str,
}

impl OverviewResponse {
    pub fn new(overview: Overview, range: TimeRange) -> Self {
        Self {
            overview: OverviewBody {
                total_posts: overview.posts.total,
                published_posts: overview.posts.published,
                draft_posts: overview.posts.drafts(),
                total_views: overview.current.views,
                total_likes: overview.current.likes,
                total_comments: overview.current.comments,
                total_shares: overview.current.shares,
                total_subscribers: overview.total_subscribers,
                views_change: overview.views_change,
                likes_change: overview.likes_change,
                comments_change: overview.comments_change,
                shares_change: overview.shares_change,
            },
            time_range: range.as_str(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPostsResponse {
    pub top_posts: Vec<TopPost>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyViews {
    pub date: NaiveDate,
    pub views: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewsOverTimeResponse {
    pub views_over_time: Vec<DailyViews>,
}

impl From<Vec<DailyCount>> for ViewsOverTimeResponse {
    fn from(days: Vec<DailyCount>) -> Self {
        Self {
            views_over_time: days
                .into_iter()
                .map(|d| DailyViews {
                    date: d.day,
                    views: d.count,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DailySubscribers {
    pub date: NaiveDate,
    pub subscribers: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudienceGrowthResponse {
    pub audience_growth: Vec<DailySubscribers>,
}

impl From<Vec<DailyCount>> for AudienceGrowthResponse {
    fn from(days: Vec<DailyCount>) -> Self {
        Self {
            audience_growth: days
                .into_iter()
                .map(|d| DailySubscribers {
                    date: d.day,
                    subscribers: d.count,
                })
                .collect(),
        }
    }
}

// ============================================================================
// Dashboard
// ============================================================================

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct LimitQuery {
    #[serde(default)]
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatsResponse {
    pub total_posts: i64,
    pub published_posts: i64,
    pub draft_posts: i64,
    pub total_views: i64,
    pub total_likes: i64,
    pub total_comments: i64,
    pub total_subscribers: i64,
}

impl From<DashboardCounts> for DashboardStatsResponse {
    fn from(counts: DashboardCounts) -> Self {
        Self {
            total_posts: counts.posts.total,
            published_posts: counts.posts.published,
            draft_posts: counts.posts.drafts(),
            total_views: counts.views,
            total_likes: counts.likes,
            total_comments: counts.comments,
            total_subscribers: counts.subscribers,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecentPostItem {
    pub id: PostId,
    pub title: String,
    pub slug: Slug,
    pub summary: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub views: i64,
    pub likes: i64,
    pub comments: i64,
}

impl From<RecentPost> for RecentPostItem {
    fn from(recent: RecentPost) -> Self {
        let post = recent.post;
        Self {
            id: post.post_id,
            title: post.title,
            slug: post.slug,
            summary: post.summary,
            is_published: post.is_published,
            created_at: post.created_at,
            updated_at: post.updated_at,
            views: recent.views,
            likes: recent.likes,
            comments: recent.comments,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentPostsResponse {
    pub recent_posts: Vec<RecentPostItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecentCommentItem {
    pub id: CommentId,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub author: AuthorSummary,
    pub post: PostRef,
}

impl From<RecentComment> for RecentCommentItem {
    fn from(recent: RecentComment) -> Self {
        Self {
            id: recent.comment.comment_id,
            content: recent.comment.content,
            created_at: recent.comment.created_at,
            author: recent.author,
            post: recent.post,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentCommentsResponse {
    pub recent_comments: Vec<RecentCommentItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivityFeedResponse {
    pub activities: Vec<ActivityEntry>,
}

// ============================================================================
// Export
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ExportedPostItem {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub summary: Option<String>,
    pub slug: Slug,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Post> for ExportedPostItem {
    fn from(post: Post) -> Self {
        Self {
            id: post.post_id,
            title: post.title,
            content: post.content,
            summary: post.summary,
            slug: post.slug,
            is_published: post.is_published,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportedCommentItem {
    pub id: CommentId,
    pub content: String,
    pub post_id: PostId,
    pub post_title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<ExportedComment> for ExportedCommentItem {
    fn from(exported: ExportedComment) -> Self {
        let comment = exported.comment;
        Self {
            id: comment.comment_id,
            content: comment.content,
            post_id: comment.post_id,
            post_title: exported.post_title,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportResponse {
    pub user: UserResponse,
    pub posts: Vec<ExportedPostItem>,
    pub comments: Vec<ExportedCommentItem>,
}

impl From<UserExport> for ExportResponse {
    fn from(export: UserExport) -> Self {
        Self {
            user: UserResponse::from(&export.user),
            posts: export.posts.into_iter().map(Into::into).collect(),
            comments: export.comments.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary_null_clears_and_absent_keeps() {
        let absent: UpdatePostRequest = serde_json::from_str(r#"{"title":"T"}"#).unwrap();
        assert_eq!(PostPatch::from(absent).summary, None);

        let null: UpdatePostRequest = serde_json::from_str(r#"{"summary":null}"#).unwrap();
        assert_eq!(PostPatch::from(null).summary, Some(None));
    }

    #[test]
    fn test_create_post_defaults_to_draft() {
        let req: CreatePostRequest =
            serde_json::from_str(r#"{"title":"T","content":"C"}"#).unwrap();
        assert!(!req.is_published);
        assert_eq!(req.summary, None);
    }

    #[test]
    fn test_view_response_shapes() {
        let tracked = serde_json::to_value(ViewResponse::from(ViewOutcome::Tracked { view_id: 4 }))
            .unwrap();
        assert_eq!(
            tracked,
            json!({"message": "View tracked successfully", "view_id": 4})
        );

        let repeat = serde_json::to_value(ViewResponse::from(ViewOutcome::AlreadyTracked)).unwrap();
        assert_eq!(repeat, json!({"message": "View already tracked"}));
    }

    #[test]
    fn test_like_response_shapes() {
        let liked = serde_json::to_value(LikeResponse::from(LikeToggle::Liked { like_id: 9 }))
            .unwrap();
        assert_eq!(
            liked,
            json!({"message": "Post liked", "liked": true, "like_id": 9})
        );

        let unliked = serde_json::to_value(LikeResponse::from(LikeToggle::Unliked)).unwrap();
        assert_eq!(unliked, json!({"message": "Post unliked", "liked": false}));
    }

    #[test]
    fn test_subscribe_response_messages() {
        let created = SubscribeResponse::from(SubscribeOutcome::Subscribed {
            subscriber_id: SubscriberId::new(3),
        });
        assert_eq!(created.message, "Successfully subscribed");
        assert_eq!(created.subscriber_id, Some(SubscriberId::new(3)));

        assert_eq!(
            SubscribeResponse::from(SubscribeOutcome::Reactivated).message,
            "Subscription reactivated"
        );
        assert_eq!(
            SubscribeResponse::from(SubscribeOutcome::AlreadySubscribed).message,
            "Email already subscribed"
        );
    }

    #[test]
    fn test_analytics_query_range() {
        let query: AnalyticsQuery = serde_json::from_str(r#"{"time_range":"7d"}"#).unwrap();
        assert_eq!(query.range(), TimeRange::Week);
        assert_eq!(AnalyticsQuery::default().range(), TimeRange::Month);
    }

    #[test]
    fn test_dashboard_stats_keys_are_camel_case() {
        let counts = DashboardCounts {
            posts: crate::domain::reports::PostCounts {
                total: 3,
                published: 2,
            },
            views: 10,
            likes: 4,
            comments: 1,
            subscribers: 7,
        };
        let value = serde_json::to_value(DashboardStatsResponse::from(counts)).unwrap();
        assert_eq!(value["totalPosts"], 3);
        assert_eq!(value["draftPosts"], 1);
        assert_eq!(value["totalSubscribers"], 7);
    }
}
