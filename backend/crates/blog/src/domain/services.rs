//! Domain Services
//!
//! Pure rules: ownership checks and the arithmetic behind the reports.

use auth::User;
use chrono::{Duration, NaiveDate};
use kernel::id::UserId;

use crate::domain::entities::{Comment, Post};
use crate::domain::reports::{
    ActivityData, ActivityEntry, ActivityKind, DailyCount, RecentComment,
};
use crate::error::{BlogError, BlogResult};

pub const EXCERPT_LENGTH: usize = 100;

// ============================================================================
// Ownership
// ============================================================================

/// The caller of a mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: UserId,
    pub is_admin: bool,
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id,
            is_admin: user.is_admin,
        }
    }
}

impl Actor {
    fn owns(&self, owner: UserId) -> bool {
        self.is_admin || self.user_id == owner
    }

    /// Update or delete a post
    pub fn can_manage_post(&self, post: &Post) -> bool {
        self.owns(post.author_id)
    }

    /// Read a post regardless of its publication state
    pub fn can_see_draft(&self, post: &Post) -> bool {
        self.owns(post.author_id)
    }

    /// Only the comment author may edit; owning the post is not enough
    pub fn can_edit_comment(&self, comment: &Comment) -> bool {
        self.owns(comment.author_id)
    }

    /// The comment author, the post author or an admin may delete
    pub fn can_delete_comment(&self, comment: &Comment, post_author: UserId) -> bool {
        self.owns(comment.author_id) || self.user_id == post_author
    }
}

pub fn ensure(allowed: bool) -> BlogResult<()> {
    if allowed {
        Ok(())
    } else {
        Err(BlogError::Forbidden)
    }
}

// ============================================================================
// Reporting arithmetic
// ============================================================================

/// Period-over-period change in percent, rounded to one decimal.
///
/// A previous value of zero yields 100 when anything happened, else 0.
pub fn percentage_change(current: i64, previous: i64) -> f64 {
    let change = if previous == 0 {
        if current > 0 { 100.0 } else { 0.0 }
    } else {
        (current - previous) as f64 / previous as f64 * 100.0
    };
    (change * 10.0).round() / 10.0
}

/// `days` consecutive calendar days ending with `today`
pub fn day_buckets(today: NaiveDate, days: i64) -> Vec<NaiveDate> {
    (0..days)
        .rev()
        .map(|offset| today - Duration::days(offset))
        .collect()
}

/// Per-day counts for every bucket, zero where nothing happened
pub fn fill_days(buckets: &[NaiveDate], counts: &[DailyCount]) -> Vec<DailyCount> {
    buckets
        .iter()
        .map(|&day| DailyCount {
            day,
            count: counts
                .iter()
                .filter(|c| c.day == day)
                .map(|c| c.count)
                .sum(),
        })
        .collect()
}

/// Running totals: each bucket counts everything on or before its day
pub fn cumulative_days(buckets: &[NaiveDate], counts: &[DailyCount]) -> Vec<DailyCount> {
    let mut sorted = counts.to_vec();
    sorted.sort_by_key(|c| c.day);

    let mut total = 0;
    let mut pending = sorted.into_iter().peekable();
    buckets
        .iter()
        .map(|&day| {
            while let Some(c) = pending.next_if(|c| c.day <= day) {
                total += c.count;
            }
            DailyCount { day, count: total }
        })
        .collect()
}

/// First `EXCERPT_LENGTH` characters followed by "..."
pub fn excerpt(text: &str) -> String {
    let mut out: String = text.chars().take(EXCERPT_LENGTH).collect();
    out.push_str("...");
    out
}

// ============================================================================
// Activity feed
// ============================================================================

pub fn post_activity(post: &Post) -> ActivityEntry {
    let (kind, verb) = if post.is_published {
        (ActivityKind::PostCreated, "Published")
    } else {
        (ActivityKind::DraftCreated, "Created draft")
    };

    ActivityEntry {
        id: format!("post_{}", post.post_id),
        kind,
        title: format!("{verb}: {}", post.title),
        description: post
            .summary
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| excerpt(&post.content)),
        timestamp: post.created_at,
        data: ActivityData::Post {
            post_id: post.post_id,
            post_title: post.title.clone(),
            post_slug: post.slug.clone(),
        },
    }
}

pub fn comment_activity(recent: &RecentComment) -> ActivityEntry {
    let comment = &recent.comment;
    ActivityEntry {
        id: format!("comment_{}", comment.comment_id),
        kind: ActivityKind::CommentReceived,
        title: format!("New comment on: {}", recent.post.title),
        description: format!("{}: {}", recent.author.username, excerpt(&comment.content)),
        timestamp: comment.created_at,
        data: ActivityData::Comment {
            comment_id: comment.comment_id,
            post_id: recent.post.id,
            post_title: recent.post.title.clone(),
            commenter: recent.author.username.clone(),
        },
    }
}

/// Merge, newest first, truncated to `limit`
pub fn activity_feed(
    posts: &[Post],
    comments: &[RecentComment],
    limit: usize,
) -> Vec<ActivityEntry> {
    let mut entries: Vec<ActivityEntry> = posts
        .iter()
        .map(post_activity)
        .chain(comments.iter().map(comment_activity))
        .collect();
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    entries.truncate(limit);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::AuthorSummary;
    use crate::domain::reports::PostRef;
    use crate::domain::value_objects::Slug;
    use chrono::{TimeZone, Utc};
    use kernel::id::{CommentId, PostId};

    fn post(id: i64, author: i64, published: bool, minute: u32) -> Post {
        Post {
            post_id: PostId::new(id),
            title: format!("Post {id}"),
            content: "x".repeat(150),
            summary: None,
            slug: Slug::from_title(&format!("Post {id}")).unwrap(),
            is_published: published,
            author_id: UserId::new(author),
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 12, minute, 0).unwrap(),
            updated_at: None,
        }
    }

    fn comment(id: i64, author: i64, post_id: i64) -> Comment {
        Comment {
            comment_id: CommentId::new(id),
            content: "Nice".to_string(),
            post_id: PostId::new(post_id),
            author_id: UserId::new(author),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn actor(id: i64, is_admin: bool) -> Actor {
        Actor {
            user_id: UserId::new(id),
            is_admin,
        }
    }

    #[test]
    fn test_percentage_change_edge_cases() {
        assert_eq!(percentage_change(0, 0), 0.0);
        assert_eq!(percentage_change(5, 0), 100.0);
        assert_eq!(percentage_change(10, 5), 100.0);
        assert_eq!(percentage_change(5, 10), -50.0);
    }

    #[test]
    fn test_percentage_change_rounds_to_one_decimal() {
        assert_eq!(percentage_change(1, 3), -66.7);
        assert_eq!(percentage_change(4, 3), 33.3);
    }

    #[test]
    fn test_post_ownership() {
        let post = post(1, 1, true, 0);
        assert!(actor(1, false).can_manage_post(&post));
        assert!(actor(2, true).can_manage_post(&post));
        assert!(!actor(2, false).can_manage_post(&post));
        assert!(ensure(actor(2, false).can_manage_post(&post)).is_err());
    }

    #[test]
    fn test_comment_edit_is_narrower_than_delete() {
        // user 1 owns the post, user 2 wrote the comment
        let comment = comment(1, 2, 10);
        let post_owner = actor(1, false);
        assert!(!post_owner.can_edit_comment(&comment));
        assert!(post_owner.can_delete_comment(&comment, UserId::new(1)));

        assert!(actor(2, false).can_edit_comment(&comment));
        assert!(actor(2, false).can_delete_comment(&comment, UserId::new(1)));

        assert!(actor(3, true).can_edit_comment(&comment));
        assert!(actor(3, true).can_delete_comment(&comment, UserId::new(1)));

        assert!(!actor(3, false).can_edit_comment(&comment));
        assert!(!actor(3, false).can_delete_comment(&comment, UserId::new(1)));
    }

    #[test]
    fn test_day_buckets_end_today() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        let days = day_buckets(today, 3);
        assert_eq!(
            days,
            vec![
                NaiveDate::from_ymd_opt(2025, 2, 28).unwrap(),
                NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
                today,
            ]
        );
    }

    #[test]
    fn test_fill_days_zero_fills() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        let days = day_buckets(today, 3);
        let counts = vec![DailyCount { day: today, count: 4 }];
        let filled = fill_days(&days, &counts);
        assert_eq!(
            filled.iter().map(|c| c.count).collect::<Vec<_>>(),
            vec![0, 0, 4]
        );
    }

    #[test]
    fn test_cumulative_days_is_non_decreasing() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
        let days = day_buckets(today, 4);
        let counts = vec![
            DailyCount {
                day: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                count: 10,
            },
            DailyCount {
                day: NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
                count: 2,
            },
            DailyCount {
                day: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
                count: 1,
            },
        ];
        let series = cumulative_days(&days, &counts);
        assert_eq!(
            series.iter().map(|c| c.count).collect::<Vec<_>>(),
            vec![10, 11, 13, 13]
        );
        assert!(series.windows(2).all(|w| w[0].count <= w[1].count));
    }

    #[test]
    fn test_excerpt_counts_characters() {
        assert_eq!(excerpt("short"), "short...");
        let long = "é".repeat(120);
        assert_eq!(excerpt(&long).chars().count(), 103);
    }

    #[test]
    fn test_activity_feed_merges_newest_first() {
        let posts = vec![post(1, 1, true, 10), post(2, 1, false, 30)];
        let mut recent = RecentComment {
            comment: comment(7, 2, 1),
            author: AuthorSummary {
                id: UserId::new(2),
                username: "bob".to_string(),
                full_name: None,
            },
            post: PostRef {
                id: PostId::new(1),
                title: "Post 1".to_string(),
                slug: Slug::from_title("Post 1").unwrap(),
            },
        };
        recent.comment.created_at = Utc.with_ymd_and_hms(2025, 1, 1, 12, 20, 0).unwrap();

        let feed = activity_feed(&posts, &[recent], 10);
        let ids: Vec<_> = feed.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["post_2", "comment_7", "post_1"]);

        assert_eq!(feed[0].kind, ActivityKind::DraftCreated);
        assert_eq!(feed[0].title, "Created draft: Post 2");
        assert_eq!(feed[0].description.chars().count(), 103);
        assert_eq!(feed[1].title, "New comment on: Post 1");
        assert_eq!(feed[1].description, "bob: Nice...");
        assert_eq!(feed[2].title, "Published: Post 1");

        assert_eq!(activity_feed(&posts, &[], 1).len(), 1);
    }
}
