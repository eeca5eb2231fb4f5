//! Analytics Use Cases
//!
//! Windowed reports over the caller's own posts.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::reports::{DailyCount, InteractionCounts, PostCounts, TopPost};
use crate::domain::repository::AnalyticsRepository;
use crate::domain::services::{cumulative_days, day_buckets, fill_days, percentage_change};
use crate::domain::value_objects::TimeRange;
use crate::error::{BlogError, BlogResult};

pub const DEFAULT_TOP_POSTS_LIMIT: i64 = 10;
pub const MAX_TOP_POSTS_LIMIT: i64 = 100;

/// Current-window totals and their change against the previous window
#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    pub posts: PostCounts,
    pub current: InteractionCounts,
    pub total_subscribers: i64,
    pub views_change: f64,
    pub likes_change: f64,
    pub comments_change: f64,
    pub shares_change: f64,
}

impl Overview {
    fn new(
        posts: PostCounts,
        current: InteractionCounts,
        previous: InteractionCounts,
        total_subscribers: i64,
    ) -> Self {
        Self {
            posts,
            current,
            total_subscribers,
            views_change: percentage_change(current.views, previous.views),
            likes_change: percentage_change(current.likes, previous.likes),
            comments_change: percentage_change(current.comments, previous.comments),
            shares_change: percentage_change(current.shares, previous.shares),
        }
    }
}

pub struct AnalyticsUseCase<R>
where
    R: AnalyticsRepository,
{
    repo: Arc<R>,
}

impl<R> AnalyticsUseCase<R>
where
    R: AnalyticsRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn overview(&self, author_id: UserId, range: TimeRange) -> BlogResult<Overview> {
        self.overview_at(author_id, range, Utc::now()).await
    }

    pub(crate) async fn overview_at(
        &self,
        author_id: UserId,
        range: TimeRange,
        now: DateTime<Utc>,
    ) -> BlogResult<Overview> {
        let posts = self.repo.author_post_counts(author_id).await?;
        let current = self
            .repo
            .interaction_counts(author_id, range.current(now))
            .await?;
        let previous = self
            .repo
            .interaction_counts(author_id, range.previous(now))
            .await?;
        let subscribers = self.repo.active_subscriber_count().await?;

        Ok(Overview::new(posts, current, previous, subscribers))
    }

    pub async fn top_posts(
        &self,
        author_id: UserId,
        range: TimeRange,
        limit: Option<i64>,
    ) -> BlogResult<Vec<TopPost>> {
        let limit = limit.unwrap_or(DEFAULT_TOP_POSTS_LIMIT);
        if !(1..=MAX_TOP_POSTS_LIMIT).contains(&limit) {
            return Err(BlogError::Validation(format!(
                "limit must be between 1 and {MAX_TOP_POSTS_LIMIT}"
            )));
        }

        self.repo
            .top_posts(author_id, range.current(Utc::now()), limit)
            .await
    }

    /// One entry per UTC day of the range, ending today
    pub async fn views_over_time(
        &self,
        author_id: UserId,
        range: TimeRange,
    ) -> BlogResult<Vec<DailyCount>> {
        let buckets = day_buckets(Utc::now().date_naive(), range.days());
        let Some(first) = buckets.first() else {
            return Ok(Vec::new());
        };

        let since = first.and_time(chrono::NaiveTime::MIN).and_utc();
        let counts = self.repo.daily_views(author_id, since).await?;

        Ok(fill_days(&buckets, &counts))
    }

    /// Active subscribers on record at the end of each day of the range
    pub async fn audience_growth(&self, range: TimeRange) -> BlogResult<Vec<DailyCount>> {
        let buckets = day_buckets(Utc::now().date_naive(), range.days());
        let signups = self.repo.daily_active_signups().await?;

        Ok(cumulative_days(&buckets, &signups))
    }
}
