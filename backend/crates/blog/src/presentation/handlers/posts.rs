use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use auth::domain::repository::UserRepository;
use auth::models::MessageResponse;
use auth::{CurrentUser, Identity};
use kernel::id::PostId;
use kernel::pagination::PageQuery;

use super::BlogAppState;
use crate::application::PostsUseCase;
use crate::application::posts::{DEFAULT_MY_POSTS_LIMIT, DEFAULT_POSTS_LIMIT};
use crate::domain::repository::BlogRepository;
use crate::error::BlogResult;
use crate::presentation::dto::{CreatePostRequest, PostResponse, UpdatePostRequest};

/// GET /posts/
///
/// Public feed; the Authorization header is not looked at, so a stale
/// token never hides it.
pub async fn list_posts<R, U>(
    State(state): State<BlogAppState<R, U>>,
    Query(query): Query<PageQuery>,
) -> BlogResult<Json<Vec<PostResponse>>>
where
    R: BlogRepository,
    U: UserRepository + Send + Sync + 'static,
{
    let page = query.resolve(DEFAULT_POSTS_LIMIT)?;
    let posts = PostsUseCase::new(state.repo.clone())
        .list_published(page)
        .await?;

    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

/// GET /posts/my-posts
pub async fn my_posts<R, U>(
    State(state): State<BlogAppState<R, U>>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<PageQuery>,
) -> BlogResult<Json<Vec<PostResponse>>>
where
    R: BlogRepository,
    U: UserRepository + Send + Sync + 'static,
{
    let page = query.resolve(DEFAULT_MY_POSTS_LIMIT)?;
    let posts = PostsUseCase::new(state.repo.clone())
        .list_mine(&user, page)
        .await?;

    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

/// GET /posts/{id}
pub async fn get_post<R, U>(
    State(state): State<BlogAppState<R, U>>,
    identity: Identity,
    Path(post_id): Path<PostId>,
) -> BlogResult<Json<PostResponse>>
where
    R: BlogRepository,
    U: UserRepository + Send + Sync + 'static,
{
    let post = PostsUseCase::new(state.repo.clone())
        .get(post_id, &identity)
        .await?;

    Ok(Json(post.into()))
}

/// POST /posts/
pub async fn create_post<R, U>(
    State(state): State<BlogAppState<R, U>>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<CreatePostRequest>,
) -> BlogResult<(StatusCode, Json<PostResponse>)>
where
    R: BlogRepository,
    U: UserRepository + Send + Sync + 'static,
{
    let post = PostsUseCase::new(state.repo.clone())
        .create(&user, req.into())
        .await?;

    Ok((StatusCode::CREATED, Json(post.into())))
}

/// PUT /posts/{id}
pub async fn update_post<R, U>(
    State(state): State<BlogAppState<R, U>>,
    CurrentUser(user): CurrentUser,
    Path(post_id): Path<PostId>,
    Json(req): Json<UpdatePostRequest>,
) -> BlogResult<Json<PostResponse>>
where
    R: BlogRepository,
    U: UserRepository + Send + Sync + 'static,
{
    let post = PostsUseCase::new(state.repo.clone())
        .update(&user, post_id, req.into())
        .await?;

    Ok(Json(post.into()))
}

/// DELETE /posts/{id}
pub async fn delete_post<R, U>(
    State(state): State<BlogAppState<R, U>>,
    CurrentUser(user): CurrentUser,
    Path(post_id): Path<PostId>,
) -> BlogResult<Json<MessageResponse>>
where
    R: BlogRepository,
    U: UserRepository + Send + Sync + 'static,
{
    PostsUseCase::new(state.repo.clone())
        .delete(&user, post_id)
        .await?;

    Ok(Json(MessageResponse::new("Post deleted successfully")))
}
