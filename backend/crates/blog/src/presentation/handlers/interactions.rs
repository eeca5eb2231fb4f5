use axum::Json;
use axum::extract::{Path, Query, State};

use auth::domain::repository::UserRepository;
use auth::models::MessageResponse;
use auth::{CurrentUser, Identity};
use kernel::id::PostId;
use platform::client::ClientInfo;

use super::BlogAppState;
use crate::application::{InteractionsUseCase, SubscribeInput, SubscriptionsUseCase};
use crate::domain::entities::{PostStats, UserPostInteractions};
use crate::domain::repository::BlogRepository;
use crate::error::BlogResult;
use crate::presentation::dto::{
    LikeResponse, PostInteractionRequest, ShareRequest, ShareResponse, SubscribeRequest,
    SubscribeResponse, UnsubscribeQuery, ViewResponse,
};

/// POST /interactions/view
pub async fn track_view<R, U>(
    State(state): State<BlogAppState<R, U>>,
    identity: Identity,
    client: ClientInfo,
    Json(req): Json<PostInteractionRequest>,
) -> BlogResult<Json<ViewResponse>>
where
    R: BlogRepository,
    U: UserRepository + Send + Sync + 'static,
{
    let outcome = InteractionsUseCase::new(state.repo.clone())
        .track_view(req.post_id, &identity, &client)
        .await?;

    Ok(Json(outcome.into()))
}

/// POST /interactions/like
pub async fn toggle_like<R, U>(
    State(state): State<BlogAppState<R, U>>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<PostInteractionRequest>,
) -> BlogResult<Json<LikeResponse>>
where
    R: BlogRepository,
    U: UserRepository + Send + Sync + 'static,
{
    let toggle = InteractionsUseCase::new(state.repo.clone())
        .toggle_like(req.post_id, &user)
        .await?;

    Ok(Json(toggle.into()))
}

/// POST /interactions/share
pub async fn track_share<R, U>(
    State(state): State<BlogAppState<R, U>>,
    identity: Identity,
    Json(req): Json<ShareRequest>,
) -> BlogResult<Json<ShareResponse>>
where
    R: BlogRepository,
    U: UserRepository + Send + Sync + 'static,
{
    let share_id = InteractionsUseCase::new(state.repo.clone())
        .track_share(req.post_id, &identity, req.platform)
        .await?;

    Ok(Json(ShareResponse::new(share_id)))
}

/// GET /interactions/post/{id}/stats
pub async fn post_stats<R, U>(
    State(state): State<BlogAppState<R, U>>,
    identity: Identity,
    Path(post_id): Path<PostId>,
) -> BlogResult<Json<PostStats>>
where
    R: BlogRepository,
    U: UserRepository + Send + Sync + 'static,
{
    let stats = InteractionsUseCase::new(state.repo.clone())
        .stats(post_id, &identity)
        .await?;

    Ok(Json(stats))
}

/// GET /interactions/post/{id}/user-interactions
pub async fn user_interactions<R, U>(
    State(state): State<BlogAppState<R, U>>,
    CurrentUser(user): CurrentUser,
    Path(post_id): Path<PostId>,
) -> BlogResult<Json<UserPostInteractions>>
where
    R: BlogRepository,
    U: UserRepository + Send + Sync + 'static,
{
    let interactions = InteractionsUseCase::new(state.repo.clone())
        .user_interactions(post_id, &user)
        .await?;

    Ok(Json(interactions))
}

/// POST /interactions/subscribe
pub async fn subscribe<R, U>(
    State(state): State<BlogAppState<R, U>>,
    identity: Identity,
    Json(req): Json<SubscribeRequest>,
) -> BlogResult<Json<SubscribeResponse>>
where
    R: BlogRepository,
    U: UserRepository + Send + Sync + 'static,
{
    let outcome = SubscriptionsUseCase::new(state.repo.clone())
        .subscribe(SubscribeInput {
            email: req.email,
            full_name: req.full_name,
            user_id: identity.user_id(),
        })
        .await?;

    Ok(Json(outcome.into()))
}

/// POST /interactions/unsubscribe?email=
pub async fn unsubscribe<R, U>(
    State(state): State<BlogAppState<R, U>>,
    Query(query): Query<UnsubscribeQuery>,
) -> BlogResult<Json<MessageResponse>>
where
    R: BlogRepository,
    U: UserRepository + Send + Sync + 'static,
{
    SubscriptionsUseCase::new(state.repo.clone())
        .unsubscribe(&query.email)
        .await?;

    Ok(Json(MessageResponse::new("Successfully unsubscribed")))
}
