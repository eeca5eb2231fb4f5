//! Dashboard Use Cases

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::reports::{ActivityEntry, DashboardCounts, RecentComment, RecentPost};
use crate::domain::repository::DashboardRepository;
use crate::domain::services::activity_feed;
use crate::error::{BlogError, BlogResult};

pub const DEFAULT_RECENT_LIMIT: i64 = 5;
pub const DEFAULT_ACTIVITY_LIMIT: i64 = 10;
pub const MAX_DASHBOARD_LIMIT: i64 = 100;

/// Posts and comments merged into the activity feed
const ACTIVITY_SOURCE_LIMIT: i64 = 5;

fn resolve_limit(limit: Option<i64>, default: i64) -> BlogResult<i64> {
    let limit = limit.unwrap_or(default);
    if (1..=MAX_DASHBOARD_LIMIT).contains(&limit) {
        Ok(limit)
    } else {
        Err(BlogError::Validation(format!(
            "limit must be between 1 and {MAX_DASHBOARD_LIMIT}"
        )))
    }
}

pub struct DashboardUseCase<R>
where
    R: DashboardRepository,
{
    repo: Arc<R>,
}

impl<R> DashboardUseCase<R>
where
    R: DashboardRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn stats(&self, author_id: UserId) -> BlogResult<DashboardCounts> {
        self.repo.dashboard_counts(author_id).await
    }

    pub async fn recent_posts(
        &self,
        author_id: UserId,
        limit: Option<i64>,
    ) -> BlogResult<Vec<RecentPost>> {
        let limit = resolve_limit(limit, DEFAULT_RECENT_LIMIT)?;
        self.repo.recent_posts(author_id, limit).await
    }

    pub async fn recent_comments(
        &self,
        author_id: UserId,
        limit: Option<i64>,
    ) -> BlogResult<Vec<RecentComment>> {
        let limit = resolve_limit(limit, DEFAULT_RECENT_LIMIT)?;
        self.repo.recent_comments(author_id, limit).await
    }

    pub async fn activity_feed(
        &self,
        author_id: UserId,
        limit: Option<i64>,
    ) -> BlogResult<Vec<ActivityEntry>> {
        let limit = resolve_limit(limit, DEFAULT_ACTIVITY_LIMIT)?;

        let posts: Vec<_> = self
            .repo
            .recent_posts(author_id, ACTIVITY_SOURCE_LIMIT)
            .await?
            .into_iter()
            .map(|recent| recent.post)
            .collect();
        let comments = self
            .repo
            .recent_comments(author_id, ACTIVITY_SOURCE_LIMIT)
            .await?;

        Ok(activity_feed(&posts, &comments, limit as usize))
    }
}
