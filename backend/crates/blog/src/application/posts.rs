//! Post Use Cases

use std::sync::Arc;

use auth::{Identity, User};
use kernel::id::PostId;
use kernel::pagination::Page;

use crate::domain::entities::{NewPost, PostDetails, PostPatch};
use crate::domain::repository::PostRepository;
use crate::domain::services::{Actor, ensure};
use crate::error::{BlogError, BlogResult};

pub const DEFAULT_POSTS_LIMIT: i64 = 10;
pub const DEFAULT_MY_POSTS_LIMIT: i64 = 100;

pub struct CreatePostInput {
    pub title: String,
    pub content: String,
    pub summary: Option<String>,
    pub is_published: bool,
}

pub struct PostsUseCase<R>
where
    R: PostRepository,
{
    repo: Arc<R>,
}

impl<R> PostsUseCase<R>
where
    R: PostRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list_published(&self, page: Page) -> BlogResult<Vec<PostDetails>> {
        self.repo.list_published_posts(page).await
    }

    pub async fn list_mine(&self, user: &User, page: Page) -> BlogResult<Vec<PostDetails>> {
        self.repo.list_author_posts(user.user_id, page).await
    }

    /// Drafts are only visible to their author and admins
    pub async fn get(&self, post_id: PostId, identity: &Identity) -> BlogResult<PostDetails> {
        find_visible_post(self.repo.as_ref(), post_id, identity).await
    }

    pub async fn create(&self, user: &User, input: CreatePostInput) -> BlogResult<PostDetails> {
        let new_post = NewPost::new(
            user.user_id,
            input.title,
            input.content,
            input.summary,
            input.is_published,
        )?;

        if self.repo.slug_taken(&new_post.slug, None).await? {
            return Err(BlogError::SlugTaken);
        }

        // the unique index settles concurrent creates with the same slug
        let details = self.repo.create_post(&new_post).await?;

        tracing::info!(
            post_id = %details.post.post_id,
            author_id = %user.user_id,
            slug = %details.post.slug,
            "Post created"
        );

        Ok(details)
    }

    pub async fn update(
        &self,
        user: &User,
        post_id: PostId,
        patch: PostPatch,
    ) -> BlogResult<PostDetails> {
        let mut post = self
            .repo
            .find_post(post_id)
            .await?
            .ok_or(BlogError::PostNotFound)?
            .post;

        ensure(Actor::from(user).can_manage_post(&post))?;

        let retitled = patch.title.is_some();
        post.apply(patch)?;

        if retitled && self.repo.slug_taken(&post.slug, Some(post_id)).await? {
            return Err(BlogError::SlugTaken);
        }

        let details = self.repo.update_post(&post).await?;

        tracing::info!(post_id = %post_id, user_id = %user.user_id, "Post updated");

        Ok(details)
    }

    pub async fn delete(&self, user: &User, post_id: PostId) -> BlogResult<()> {
        let post = self
            .repo
            .find_post(post_id)
            .await?
            .ok_or(BlogError::PostNotFound)?
            .post;

        ensure(Actor::from(user).can_manage_post(&post))?;

        if !self.repo.delete_post(post_id).await? {
            return Err(BlogError::PostNotFound);
        }

        tracing::info!(post_id = %post_id, user_id = %user.user_id, "Post deleted");

        Ok(())
    }
}

/// Look up a post as `identity` sees it; a draft reads as missing to
/// anyone but its author and admins
pub(crate) async fn find_visible_post<R>(
    repo: &R,
    post_id: PostId,
    identity: &Identity,
) -> BlogResult<PostDetails>
where
    R: PostRepository,
{
    let details = repo
        .find_post(post_id)
        .await?
        .ok_or(BlogError::PostNotFound)?;

    if details.post.is_published {
        return Ok(details);
    }
    match identity.user().map(Actor::from) {
        Some(actor) if actor.can_see_draft(&details.post) => Ok(details),
        _ => Err(BlogError::PostNotFound),
    }
}
