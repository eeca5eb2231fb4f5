//! Comment Use Cases

use std::sync::Arc;

use auth::{Identity, User};
use kernel::id::{CommentId, PostId};
use kernel::pagination::Page;

use crate::application::posts::find_visible_post;
use crate::domain::entities::{CommentDetails, NewComment};
use crate::domain::repository::{CommentRepository, PostRepository};
use crate::domain::services::{Actor, ensure};
use crate::error::{BlogError, BlogResult};

pub const DEFAULT_COMMENTS_LIMIT: i64 = 50;

pub struct CommentsUseCase<R>
where
    R: PostRepository + CommentRepository,
{
    repo: Arc<R>,
}

impl<R> CommentsUseCase<R>
where
    R: PostRepository + CommentRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Comments of a post the caller can see
    pub async fn list_for_post(
        &self,
        post_id: PostId,
        identity: &Identity,
        page: Page,
    ) -> BlogResult<Vec<CommentDetails>> {
        find_visible_post(self.repo.as_ref(), post_id, identity).await?;
        self.repo.list_post_comments(post_id, page).await
    }

    pub async fn list_mine(&self, user: &User, page: Page) -> BlogResult<Vec<CommentDetails>> {
        self.repo.list_author_comments(user.user_id, page).await
    }

    /// Only published posts accept new comments
    pub async fn create(
        &self,
        user: &User,
        post_id: PostId,
        content: String,
    ) -> BlogResult<CommentDetails> {
        let new_comment = NewComment::new(user.user_id, post_id, content)?;

        match self.repo.find_post(post_id).await? {
            Some(details) if details.post.is_published => {}
            _ => return Err(BlogError::PostNotFound),
        }

        let details = self.repo.create_comment(&new_comment).await?;

        tracing::info!(
            comment_id = %details.comment.comment_id,
            post_id = %post_id,
            author_id = %user.user_id,
            "Comment created"
        );

        Ok(details)
    }

    pub async fn update(
        &self,
        user: &User,
        comment_id: CommentId,
        content: String,
    ) -> BlogResult<CommentDetails> {
        let mut comment = self
            .repo
            .find_comment(comment_id)
            .await?
            .ok_or(BlogError::CommentNotFound)?;

        ensure(Actor::from(user).can_edit_comment(&comment))?;

        comment.edit(content)?;
        let details = self.repo.update_comment(&comment).await?;

        tracing::info!(comment_id = %comment_id, user_id = %user.user_id, "Comment updated");

        Ok(details)
    }

    pub async fn delete(&self, user: &User, comment_id: CommentId) -> BlogResult<()> {
        let comment = self
            .repo
            .find_comment(comment_id)
            .await?
            .ok_or(BlogError::CommentNotFound)?;

        let post_author = self
            .repo
            .find_post(comment.post_id)
            .await?
            .map(|details| details.post.author_id);

        let actor = Actor::from(user);
        let allowed = match post_author {
            Some(post_author) => actor.can_delete_comment(&comment, post_author),
            None => actor.can_edit_comment(&comment),
        };
        ensure(allowed)?;

        if !self.repo.delete_comment(comment_id).await? {
            return Err(BlogError::CommentNotFound);
        }

        tracing::info!(comment_id = %comment_id, user_id = %user.user_id, "Comment deleted");

        Ok(())
    }
}
