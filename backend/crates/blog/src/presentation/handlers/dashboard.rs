use axum::Json;
use axum::extract::{Query, State};

use auth::CurrentUser;
use auth::domain::repository::UserRepository;

use super::BlogAppState;
use crate::application::DashboardUseCase;
use crate::domain::repository::BlogRepository;
use crate::error::BlogResult;
use crate::presentation::dto::{
    ActivityFeedResponse, DashboardStatsResponse, LimitQuery, RecentCommentItem,
    RecentCommentsResponse, RecentPostItem, RecentPostsResponse,
};

/// GET /dashboard/stats
pub async fn dashboard_stats<R, U>(
    State(state): State<BlogAppState<R, U>>,
    CurrentUser(user): CurrentUser,
) -> BlogResult<Json<DashboardStatsResponse>>
where
    R: BlogRepository,
    U: UserRepository + Send + Sync + 'static,
{
    let counts = DashboardUseCase::new(state.repo.clone())
        .stats(user.user_id)
        .await?;

    Ok(Json(counts.into()))
}

/// GET /dashboard/recent-posts
pub async fn recent_posts<R, U>(
    State(state): State<BlogAppState<R, U>>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<LimitQuery>,
) -> BlogResult<Json<RecentPostsResponse>>
where
    R: BlogRepository,
    U: UserRepository + Send + Sync + 'static,
{
    let posts = DashboardUseCase::new(state.repo.clone())
        .recent_posts(user.user_id, query.limit)
        .await?;

    Ok(Json(RecentPostsResponse {
        recent_posts: posts.into_iter().map(RecentPostItem::from).collect(),
    }))
}

/// GET /dashboard/recent-comments
pub async fn recent_comments<R, U>(
    State(state): State<BlogAppState<R, U>>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<LimitQuery>,
) -> BlogResult<Json<RecentCommentsResponse>>
where
    R: BlogRepository,
    U: UserRepository + Send + Sync + 'static,
{
    let comments = DashboardUseCase::new(state.repo.clone())
        .recent_comments(user.user_id, query.limit)
        .await?;

    Ok(Json(RecentCommentsResponse {
        recent_comments: comments.into_iter().map(RecentCommentItem::from).collect(),
    }))
}

/// GET /dashboard/activity-feed
pub async fn activity_feed<R, U>(
    State(state): State<BlogAppState<R, U>>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<LimitQuery>,
) -> BlogResult<Json<ActivityFeedResponse>>
where
    R: BlogRepository,
    U: UserRepository + Send + Sync + 'static,
{
    let activities = DashboardUseCase::new(state.repo.clone())
        .activity_feed(user.user_id, query.limit)
        .await?;

    Ok(Json(ActivityFeedResponse { activities }))
}
