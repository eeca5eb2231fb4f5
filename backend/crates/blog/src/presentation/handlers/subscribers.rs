use axum::Json;
use axum::extract::{Query, State};

use auth::CurrentUser;
use auth::domain::repository::UserRepository;
use kernel::pagination::PageQuery;

use super::BlogAppState;
use crate::application::SubscriptionsUseCase;
use crate::application::subscriptions::DEFAULT_SUBSCRIBERS_LIMIT;
use crate::domain::entities::{Subscriber, SubscriberStats};
use crate::domain::repository::BlogRepository;
use crate::error::BlogResult;

/// GET /subscribers/
pub async fn list_subscribers<R, U>(
    State(state): State<BlogAppState<R, U>>,
    CurrentUser(_user): CurrentUser,
    Query(query): Query<PageQuery>,
) -> BlogResult<Json<Vec<Subscriber>>>
where
    R: BlogRepository,
    U: UserRepository + Send + Sync + 'static,
{
    let page = query.resolve(DEFAULT_SUBSCRIBERS_LIMIT)?;
    let subscribers = SubscriptionsUseCase::new(state.repo.clone())
        .list_active(page)
        .await?;

    Ok(Json(subscribers))
}

/// GET /subscribers/stats
pub async fn subscriber_stats<R, U>(
    State(state): State<BlogAppState<R, U>>,
    CurrentUser(_user): CurrentUser,
) -> BlogResult<Json<SubscriberStats>>
where
    R: BlogRepository,
    U: UserRepository + Send + Sync + 'static,
{
    let stats = SubscriptionsUseCase::new(state.repo.clone()).stats().await?;

    Ok(Json(stats))
}
