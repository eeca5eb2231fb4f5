use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use auth::{CurrentUser, Identity};
use auth::domain::repository::UserRepository;
use auth::models::MessageResponse;
use kernel::id::{CommentId, PostId};
use kernel::pagination::PageQuery;

use super::BlogAppState;
use crate::application::CommentsUseCase;
use crate::application::comments::DEFAULT_COMMENTS_LIMIT;
use crate::domain::repository::BlogRepository;
use crate::error::BlogResult;
use crate::presentation::dto::{CommentResponse, CreateCommentRequest, UpdateCommentRequest};

/// GET /comments/post/{post_id}
pub async fn post_comments<R, U>(
    State(state): State<BlogAppState<R, U>>,
    identity: Identity,
    Path(post_id): Path<PostId>,
    Query(query): Query<PageQuery>,
) -> BlogResult<Json<Vec<CommentResponse>>>
where
    R: BlogRepository,
    U: UserRepository + Send + Sync + 'static,
{
    let page = query.resolve(DEFAULT_COMMENTS_LIMIT)?;
    let comments = CommentsUseCase::new(state.repo.clone())
        .list_for_post(post_id, &identity, page)
        .await?;

    Ok(Json(comments.into_iter().map(CommentResponse::from).collect()))
}

/// GET /comments/my-comments
pub async fn my_comments<R, U>(
    State(state): State<BlogAppState<R, U>>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<PageQuery>,
) -> BlogResult<Json<Vec<CommentResponse>>>
where
    R: BlogRepository,
    U: UserRepository + Send + Sync + 'static,
{
    let page = query.resolve(DEFAULT_COMMENTS_LIMIT)?;
    let comments = CommentsUseCase::new(state.repo.clone())
        .list_mine(&user, page)
        .await?;

    Ok(Json(comments.into_iter().map(CommentResponse::from).collect()))
}

/// POST /comments/
pub async fn create_comment<R, U>(
    State(state): State<BlogAppState<R, U>>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<CreateCommentRequest>,
) -> BlogResult<(StatusCode, Json<CommentResponse>)>
where
    R: BlogRepository,
    U: UserRepository + Send + Sync + 'static,
{
    let comment = CommentsUseCase::new(state.repo.clone())
        .create(&user, req.post_id, req.content)
        .await?;

    Ok((StatusCode::CREATED, Json(comment.into())))
}

/// PUT /comments/{id}
pub async fn update_comment<R, U>(
    State(state): State<BlogAppState<R, U>>,
    CurrentUser(user): CurrentUser,
    Path(comment_id): Path<CommentId>,
    Json(req): Json<UpdateCommentRequest>,
) -> BlogResult<Json<CommentResponse>>
where
    R: BlogRepository,
    U: UserRepository + Send + Sync + 'static,
{
    let comment = CommentsUseCase::new(state.repo.clone())
        .update(&user, comment_id, req.content)
        .await?;

    Ok(Json(comment.into()))
}

/// DELETE /comments/{id}
pub async fn delete_comment<R, U>(
    State(state): State<BlogAppState<R, U>>,
    CurrentUser(user): CurrentUser,
    Path(comment_id): Path<CommentId>,
) -> BlogResult<Json<MessageResponse>>
where
    R: BlogRepository,
    U: UserRepository + Send + Sync + 'static,
{
    CommentsUseCase::new(state.repo.clone())
        .delete(&user, comment_id)
        .await?;

    Ok(Json(MessageResponse::new("Comment deleted successfully")))
}
