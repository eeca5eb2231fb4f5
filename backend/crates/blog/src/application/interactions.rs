//! Interaction Use Cases
//!
//! Views, likes and shares on published posts.

use std::sync::Arc;

use auth::{Identity, User};
use kernel::id::PostId;
use platform::client::ClientInfo;

use crate::application::posts::find_visible_post;
use crate::domain::entities::{
    LikeToggle, NewShare, NewView, PostStats, UserPostInteractions, ViewOutcome,
};
use crate::domain::repository::{InteractionRepository, PostRepository};
use crate::domain::value_objects::{UNKNOWN_ADDRESS, ViewerKey};
use crate::error::{BlogError, BlogResult};

pub const SHARE_PLATFORM_MAX_LENGTH: usize = 50;

pub struct InteractionsUseCase<R>
where
    R: PostRepository + InteractionRepository,
{
    repo: Arc<R>,
}

impl<R> InteractionsUseCase<R>
where
    R: PostRepository + InteractionRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    async fn ensure_published(&self, post_id: PostId) -> BlogResult<()> {
        match self.repo.find_post(post_id).await? {
            Some(details) if details.post.is_published => Ok(()),
            _ => Err(BlogError::PostNotFound),
        }
    }

    /// Record at most one view per user, or per address when anonymous
    pub async fn track_view(
        &self,
        post_id: PostId,
        identity: &Identity,
        client: &ClientInfo,
    ) -> BlogResult<ViewOutcome> {
        self.ensure_published(post_id).await?;

        let ip_address = client
            .ip_string()
            .unwrap_or_else(|| UNKNOWN_ADDRESS.to_string());
        let view = NewView {
            post_id,
            viewer: ViewerKey::new(identity.user_id(), Some(ip_address.clone())),
            ip_address,
            user_agent: client.user_agent.clone(),
        };

        let outcome = match self.repo.record_view(&view).await? {
            Some(view_id) => {
                tracing::debug!(post_id = %post_id, view_id, "View tracked");
                ViewOutcome::Tracked { view_id }
            }
            None => ViewOutcome::AlreadyTracked,
        };
        Ok(outcome)
    }

    pub async fn toggle_like(&self, post_id: PostId, user: &User) -> BlogResult<LikeToggle> {
        self.ensure_published(post_id).await?;

        let toggle = self.repo.toggle_like(post_id, user.user_id).await?;

        tracing::info!(
            post_id = %post_id,
            user_id = %user.user_id,
            liked = toggle.is_liked(),
            "Like toggled"
        );

        Ok(toggle)
    }

    /// Every share is recorded; there is no deduplication
    pub async fn track_share(
        &self,
        post_id: PostId,
        identity: &Identity,
        platform: Option<String>,
    ) -> BlogResult<i64> {
        if platform
            .as_ref()
            .is_some_and(|p| p.chars().count() > SHARE_PLATFORM_MAX_LENGTH)
        {
            return Err(BlogError::Validation(format!(
                "platform must be at most {SHARE_PLATFORM_MAX_LENGTH} characters"
            )));
        }
        self.ensure_published(post_id).await?;

        let share_id = self
            .repo
            .record_share(&NewShare {
                post_id,
                user_id: identity.user_id(),
                platform,
            })
            .await?;

        tracing::debug!(post_id = %post_id, share_id, "Share tracked");

        Ok(share_id)
    }

    /// Counters of a post the caller can see, drafts included for their author
    pub async fn stats(&self, post_id: PostId, identity: &Identity) -> BlogResult<PostStats> {
        find_visible_post(self.repo.as_ref(), post_id, identity).await?;
        self.repo.post_stats(post_id).await
    }

    pub async fn user_interactions(
        &self,
        post_id: PostId,
        user: &User,
    ) -> BlogResult<UserPostInteractions> {
        self.repo.user_post_interactions(post_id, user.user_id).await
    }
}
