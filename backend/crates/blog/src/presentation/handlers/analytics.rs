use axum::Json;
use axum::extract::{Query, State};

use auth::CurrentUser;
use auth::domain::repository::UserRepository;

use super::BlogAppState;
use crate::application::AnalyticsUseCase;
use crate::domain::repository::BlogRepository;
use crate::error::BlogResult;
use crate::presentation::dto::{
    AnalyticsQuery, AudienceGrowthResponse, OverviewResponse, TopPostsResponse,
    ViewsOverTimeResponse,
};

/// GET /analytics/overview
pub async fn overview<R, U>(
    State(state): State<BlogAppState<R, U>>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<AnalyticsQuery>,
) -> BlogResult<Json<OverviewResponse>>
where
    R: BlogRepository,
    U: UserRepository + Send + Sync + 'static,
{
    let range = query.range();
    let overview = AnalyticsUseCase::new(state.repo.clone())
        .overview(user.user_id, range)
        .await?;

    Ok(Json(OverviewResponse::new(overview, range)))
}

/// GET /analytics/top-posts
pub async fn top_posts<R, U>(
    State(state): State<BlogAppState<R, U>>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<AnalyticsQuery>,
) -> BlogResult<Json<TopPostsResponse>>
where
    R: BlogRepository,
    U: UserRepository + Send + Sync + 'static,
{
    let top_posts = AnalyticsUseCase::new(state.repo.clone())
        .top_posts(user.user_id, query.range(), query.limit)
        .await?;

    Ok(Json(TopPostsResponse { top_posts }))
}

/// GET /analytics/views-over-time
pub async fn views_over_time<R, U>(
    State(state): State<BlogAppState<R, U>>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<AnalyticsQuery>,
) -> BlogResult<Json<ViewsOverTimeResponse>>
where
    R: BlogRepository,
    U: UserRepository + Send + Sync + 'static,
{
    let days = AnalyticsUseCase::new(state.repo.clone())
        .views_over_time(user.user_id, query.range())
        .await?;

    Ok(Json(days.into()))
}

/// GET /analytics/audience-growth
pub async fn audience_growth<R, U>(
    State(state): State<BlogAppState<R, U>>,
    CurrentUser(_user): CurrentUser,
    Query(query): Query<AnalyticsQuery>,
) -> BlogResult<Json<AudienceGrowthResponse>>
where
    R: BlogRepository,
    U: UserRepository + Send + Sync + 'static,
{
    let days = AnalyticsUseCase::new(state.repo.clone())
        .audience_growth(query.range())
        .await?;

    Ok(Json(days.into()))
}
