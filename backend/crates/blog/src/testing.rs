//! In-memory blog repository for tests
//!
//! Mirrors the schema's uniqueness rules and cascades, and reads authors
//! from a shared `InMemoryUserStore`.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use auth::models::email::Email;
use auth::testing::InMemoryUserStore;
use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{CommentId, PostId, SubscriberId, UserId};
use kernel::pagination::Page;

use crate::domain::entities::{
    AuthorSummary, Comment, CommentDetails, LikeToggle, NewComment, NewPost, NewShare,
    NewSubscriber, NewView, Post, PostDetails, PostStats, Subscriber, SubscriberStats,
    UserPostInteractions,
};
use crate::domain::reports::{
    DailyCount, DashboardCounts, ExportedComment, InteractionCounts, PostCounts, PostRef,
    RecentComment, RecentPost, TopPost,
};
use crate::domain::repository::{
    AnalyticsRepository, CommentRepository, DashboardRepository, ExportRepository,
    InteractionRepository, PostRepository, SubscriberRepository,
};
use crate::domain::value_objects::{Slug, ViewerKey, Window};
use crate::error::{BlogError, BlogResult};

struct ViewRecord {
    post_id: PostId,
    viewer: ViewerKey,
    created_at: DateTime<Utc>,
}

struct LikeRecord {
    post_id: PostId,
    user_id: UserId,
    created_at: DateTime<Utc>,
}

struct ShareRecord {
    post_id: PostId,
    created_at: DateTime<Utc>,
}

#[derive(Default)]
struct Store {
    posts: Vec<Post>,
    comments: Vec<Comment>,
    views: Vec<ViewRecord>,
    likes: Vec<LikeRecord>,
    shares: Vec<ShareRecord>,
    subscribers: Vec<Subscriber>,
    next_id: i64,
}

impl Store {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn post(&self, post_id: PostId) -> Option<&Post> {
        self.posts.iter().find(|p| p.post_id == post_id)
    }

    fn is_authors(&self, post_id: PostId, author_id: UserId, published_only: bool) -> bool {
        self.post(post_id)
            .is_some_and(|p| p.author_id == author_id && (p.is_published || !published_only))
    }
}

/// Shared in-memory blog store; clones see the same data
#[derive(Clone)]
pub struct InMemoryBlogStore {
    users: InMemoryUserStore,
    inner: Arc<Mutex<Store>>,
}

impl InMemoryBlogStore {
    pub fn new(users: InMemoryUserStore) -> Self {
        Self {
            users,
            inner: Arc::new(Mutex::new(Store::default())),
        }
    }

    fn store(&self) -> MutexGuard<'_, Store> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn author(&self, user_id: UserId) -> BlogResult<AuthorSummary> {
        let user = self
            .users
            .user(user_id)
            .ok_or_else(|| BlogError::Internal(format!("no user {user_id}")))?;
        Ok(AuthorSummary {
            id: user.user_id,
            username: user.user_name.original().to_string(),
            full_name: user.full_name,
        })
    }

    fn post_details(&self, post: Post) -> BlogResult<PostDetails> {
        let author = self.author(post.author_id)?;
        Ok(PostDetails { post, author })
    }

    fn comment_details(&self, comment: Comment) -> BlogResult<CommentDetails> {
        let author = self.author(comment.author_id)?;
        Ok(CommentDetails { comment, author })
    }

    /// Record a view with an explicit timestamp, for windowed reports
    pub fn insert_view_at(&self, post_id: PostId, user_id: UserId, at: DateTime<Utc>) {
        let mut store = self.store();
        store.views.push(ViewRecord {
            post_id,
            viewer: ViewerKey::User(user_id),
            created_at: at,
        });
    }

    /// Move a post's creation time, for windowed reports
    pub fn set_post_created_at(&self, post_id: PostId, at: DateTime<Utc>) {
        if let Some(post) = self.store().posts.iter_mut().find(|p| p.post_id == post_id) {
            post.created_at = at;
        }
    }

    pub fn view_count(&self) -> usize {
        self.store().views.len()
    }

    pub fn comment_count(&self) -> usize {
        self.store().comments.len()
    }
}

fn newest_first<T>(items: &mut [T], key: impl Fn(&T) -> (DateTime<Utc>, i64)) {
    items.sort_by_key(|item| std::cmp::Reverse(key(item)));
}

fn daily(days: impl Iterator<Item = NaiveDate>) -> Vec<DailyCount> {
    let mut counts: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    for day in days {
        *counts.entry(day).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(day, count)| DailyCount { day, count })
        .collect()
}

// ============================================================================
// Posts and comments
// ============================================================================

impl PostRepository for InMemoryBlogStore {
    async fn create_post(&self, post: &NewPost) -> BlogResult<PostDetails> {
        let created = {
            let mut store = self.store();
            if store.posts.iter().any(|p| p.slug == post.slug) {
                return Err(BlogError::SlugTaken);
            }
            let id = store.next_id();
            let created = Post {
                post_id: PostId::new(id),
                title: post.title.clone(),
                content: post.content.clone(),
                summary: post.summary.clone(),
                slug: post.slug.clone(),
                is_published: post.is_published,
                author_id: post.author_id,
                created_at: Utc::now(),
                updated_at: None,
            };
            store.posts.push(created.clone());
            created
        };
        self.post_details(created)
    }

    async fn find_post(&self, post_id: PostId) -> BlogResult<Option<PostDetails>> {
        let post = self.store().post(post_id).cloned();
        post.map(|p| self.post_details(p)).transpose()
    }

    async fn list_published_posts(&self, page: Page) -> BlogResult<Vec<PostDetails>> {
        let mut posts: Vec<Post> = self
            .store()
            .posts
            .iter()
            .filter(|p| p.is_published)
            .cloned()
            .collect();
        newest_first(&mut posts, |p| (p.created_at, p.post_id.get()));
        page.slice(posts)
            .into_iter()
            .map(|p| self.post_details(p))
            .collect()
    }

    async fn list_author_posts(
        &self,
        author_id: UserId,
        page: Page,
    ) -> BlogResult<Vec<PostDetails>> {
        let mut posts: Vec<Post> = self
            .store()
            .posts
            .iter()
            .filter(|p| p.author_id == author_id)
            .cloned()
            .collect();
        newest_first(&mut posts, |p| (p.created_at, p.post_id.get()));
        page.slice(posts)
            .into_iter()
            .map(|p| self.post_details(p))
            .collect()
    }

    async fn slug_taken(&self, slug: &Slug, except: Option<PostId>) -> BlogResult<bool> {
        Ok(self
            .store()
            .posts
            .iter()
            .any(|p| p.slug == *slug && Some(p.post_id) != except))
    }

    async fn update_post(&self, post: &Post) -> BlogResult<PostDetails> {
        {
            let mut store = self.store();
            if store
                .posts
                .iter()
                .any(|p| p.slug == post.slug && p.post_id != post.post_id)
            {
                return Err(BlogError::SlugTaken);
            }
            let slot = store
                .posts
                .iter_mut()
                .find(|p| p.post_id == post.post_id)
                .ok_or(BlogError::PostNotFound)?;
            *slot = post.clone();
        }
        self.post_details(post.clone())
    }

    async fn delete_post(&self, post_id: PostId) -> BlogResult<bool> {
        let mut store = self.store();
        let before = store.posts.len();
        store.posts.retain(|p| p.post_id != post_id);
        if store.posts.len() == before {
            return Ok(false);
        }
        store.comments.retain(|c| c.post_id != post_id);
        store.views.retain(|v| v.post_id != post_id);
        store.likes.retain(|l| l.post_id != post_id);
        store.shares.retain(|s| s.post_id != post_id);
        Ok(true)
    }
}

impl CommentRepository for InMemoryBlogStore {
    async fn create_comment(&self, comment: &NewComment) -> BlogResult<CommentDetails> {
        let created = {
            let mut store = self.store();
            let id = store.next_id();
            let created = Comment {
                comment_id: CommentId::new(id),
                content: comment.content.clone(),
                post_id: comment.post_id,
                author_id: comment.author_id,
                created_at: Utc::now(),
                updated_at: None,
            };
            store.comments.push(created.clone());
            created
        };
        self.comment_details(created)
    }

    async fn find_comment(&self, comment_id: CommentId) -> BlogResult<Option<Comment>> {
        Ok(self
            .store()
            .comments
            .iter()
            .find(|c| c.comment_id == comment_id)
            .cloned())
    }

    async fn list_post_comments(
        &self,
        post_id: PostId,
        page: Page,
    ) -> BlogResult<Vec<CommentDetails>> {
        let mut comments: Vec<Comment> = self
            .store()
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by_key(|c| (c.created_at, c.comment_id.get()));
        page.slice(comments)
            .into_iter()
            .map(|c| self.comment_details(c))
            .collect()
    }

    async fn list_author_comments(
        &self,
        author_id: UserId,
        page: Page,
    ) -> BlogResult<Vec<CommentDetails>> {
        let mut comments: Vec<Comment> = self
            .store()
            .comments
            .iter()
            .filter(|c| c.author_id == author_id)
            .cloned()
            .collect();
        newest_first(&mut comments, |c| (c.created_at, c.comment_id.get()));
        page.slice(comments)
            .into_iter()
            .map(|c| self.comment_details(c))
            .collect()
    }

    async fn update_comment(&self, comment: &Comment) -> BlogResult<CommentDetails> {
        {
            let mut store = self.store();
            let slot = store
                .comments
                .iter_mut()
                .find(|c| c.comment_id == comment.comment_id)
                .ok_or(BlogError::CommentNotFound)?;
            *slot = comment.clone();
        }
        self.comment_details(comment.clone())
    }

    async fn delete_comment(&self, comment_id: CommentId) -> BlogResult<bool> {
        let mut store = self.store();
        let before = store.comments.len();
        store.comments.retain(|c| c.comment_id != comment_id);
        Ok(store.comments.len() < before)
    }
}

// ============================================================================
// Interactions and subscribers
// ============================================================================

impl InteractionRepository for InMemoryBlogStore {
    async fn record_view(&self, view: &NewView) -> BlogResult<Option<i64>> {
        let mut store = self.store();
        if store
            .views
            .iter()
            .any(|v| v.post_id == view.post_id && v.viewer == view.viewer)
        {
            return Ok(None);
        }
        let id = store.next_id();
        store.views.push(ViewRecord {
            post_id: view.post_id,
            viewer: view.viewer.clone(),
            created_at: Utc::now(),
        });
        Ok(Some(id))
    }

    async fn toggle_like(&self, post_id: PostId, user_id: UserId) -> BlogResult<LikeToggle> {
        let mut store = self.store();
        let before = store.likes.len();
        store
            .likes
            .retain(|l| !(l.post_id == post_id && l.user_id == user_id));
        if store.likes.len() < before {
            return Ok(LikeToggle::Unliked);
        }
        let like_id = store.next_id();
        store.likes.push(LikeRecord {
            post_id,
            user_id,
            created_at: Utc::now(),
        });
        Ok(LikeToggle::Liked { like_id })
    }

    async fn record_share(&self, share: &NewShare) -> BlogResult<i64> {
        let mut store = self.store();
        let id = store.next_id();
        store.shares.push(ShareRecord {
            post_id: share.post_id,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn post_stats(&self, post_id: PostId) -> BlogResult<PostStats> {
        let store = self.store();
        Ok(PostStats {
            post_id,
            views: store.views.iter().filter(|v| v.post_id == post_id).count() as i64,
            likes: store.likes.iter().filter(|l| l.post_id == post_id).count() as i64,
            comments: store.comments.iter().filter(|c| c.post_id == post_id).count() as i64,
            shares: store.shares.iter().filter(|s| s.post_id == post_id).count() as i64,
        })
    }

    async fn user_post_interactions(
        &self,
        post_id: PostId,
        user_id: UserId,
    ) -> BlogResult<UserPostInteractions> {
        let store = self.store();
        Ok(UserPostInteractions {
            post_id,
            has_liked: store
                .likes
                .iter()
                .any(|l| l.post_id == post_id && l.user_id == user_id),
            has_viewed: store
                .views
                .iter()
                .any(|v| v.post_id == post_id && v.viewer.user_id() == Some(user_id)),
        })
    }
}

impl SubscriberRepository for InMemoryBlogStore {
    async fn find_subscriber_by_email(&self, email: &Email) -> BlogResult<Option<Subscriber>> {
        Ok(self
            .store()
            .subscribers
            .iter()
            .find(|s| s.email == *email)
            .cloned())
    }

    async fn create_subscriber(
        &self,
        subscriber: &NewSubscriber,
    ) -> BlogResult<Option<Subscriber>> {
        let mut store = self.store();
        if store.subscribers.iter().any(|s| s.email == subscriber.email) {
            return Ok(None);
        }
        let id = store.next_id();
        let created = Subscriber {
            subscriber_id: SubscriberId::new(id),
            email: subscriber.email.clone(),
            full_name: subscriber.full_name.clone(),
            is_active: true,
            subscribed_at: Utc::now(),
            unsubscribed_at: None,
            user_id: subscriber.user_id,
        };
        store.subscribers.push(created.clone());
        Ok(Some(created))
    }

    async fn reactivate_subscriber(&self, subscriber_id: SubscriberId) -> BlogResult<bool> {
        let mut store = self.store();
        match store
            .subscribers
            .iter_mut()
            .find(|s| s.subscriber_id == subscriber_id && !s.is_active)
        {
            Some(subscriber) => {
                subscriber.is_active = true;
                subscriber.unsubscribed_at = None;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn deactivate_subscriber(&self, email: &Email) -> BlogResult<Option<Subscriber>> {
        let mut store = self.store();
        Ok(store
            .subscribers
            .iter_mut()
            .find(|s| s.email == *email && s.is_active)
            .map(|subscriber| {
                subscriber.is_active = false;
                subscriber.unsubscribed_at = Some(Utc::now());
                subscriber.clone()
            }))
    }

    async fn list_active_subscribers(&self, page: Page) -> BlogResult<Vec<Subscriber>> {
        let mut active: Vec<Subscriber> = self
            .store()
            .subscribers
            .iter()
            .filter(|s| s.is_active)
            .cloned()
            .collect();
        newest_first(&mut active, |s| (s.subscribed_at, s.subscriber_id.get()));
        Ok(page.slice(active))
    }

    async fn subscriber_stats(&self) -> BlogResult<SubscriberStats> {
        let store = self.store();
        let active = store.subscribers.iter().filter(|s| s.is_active).count() as i64;
        let total = store.subscribers.len() as i64;
        Ok(SubscriberStats::new(active, total - active))
    }
}

// ============================================================================
// Reports
// ============================================================================

impl AnalyticsRepository for InMemoryBlogStore {
    async fn author_post_counts(&self, author_id: UserId) -> BlogResult<PostCounts> {
        let store = self.store();
        let mine = store.posts.iter().filter(|p| p.author_id == author_id);
        Ok(PostCounts {
            total: mine.clone().count() as i64,
            published: mine.filter(|p| p.is_published).count() as i64,
        })
    }

    async fn interaction_counts(
        &self,
        author_id: UserId,
        window: Window,
    ) -> BlogResult<InteractionCounts> {
        let store = self.store();
        let published = |post_id| store.is_authors(post_id, author_id, true);
        Ok(InteractionCounts {
            views: store
                .views
                .iter()
                .filter(|v| published(v.post_id) && window.contains(v.created_at))
                .count() as i64,
            likes: store
                .likes
                .iter()
                .filter(|l| published(l.post_id) && window.contains(l.created_at))
                .count() as i64,
            comments: store
                .comments
                .iter()
                .filter(|c| {
                    store.is_authors(c.post_id, author_id, false) && window.contains(c.created_at)
                })
                .count() as i64,
            shares: store
                .shares
                .iter()
                .filter(|s| published(s.post_id) && window.contains(s.created_at))
                .count() as i64,
        })
    }

    async fn active_subscriber_count(&self) -> BlogResult<i64> {
        Ok(self.store().subscribers.iter().filter(|s| s.is_active).count() as i64)
    }

    async fn top_posts(
        &self,
        author_id: UserId,
        window: Window,
        limit: i64,
    ) -> BlogResult<Vec<TopPost>> {
        let store = self.store();
        let mut top: Vec<TopPost> = store
            .posts
            .iter()
            .filter(|p| p.author_id == author_id && p.is_published && window.contains(p.created_at))
            .map(|p| {
                let id = p.post_id;
                TopPost {
                    id,
                    title: p.title.clone(),
                    slug: p.slug.clone(),
                    views: store
                        .views
                        .iter()
                        .filter(|v| v.post_id == id && window.contains(v.created_at))
                        .count() as i64,
                    likes: store
                        .likes
                        .iter()
                        .filter(|l| l.post_id == id && window.contains(l.created_at))
                        .count() as i64,
                    comments: store
                        .comments
                        .iter()
                        .filter(|c| c.post_id == id && window.contains(c.created_at))
                        .count() as i64,
                    shares: store
                        .shares
                        .iter()
                        .filter(|s| s.post_id == id && window.contains(s.created_at))
                        .count() as i64,
                    published_at: p.created_at,
                }
            })
            .collect();
        top.sort_by_key(|t| std::cmp::Reverse((t.views, t.published_at)));
        top.truncate(limit as usize);
        Ok(top)
    }

    async fn daily_views(
        &self,
        author_id: UserId,
        since: DateTime<Utc>,
    ) -> BlogResult<Vec<DailyCount>> {
        let store = self.store();
        Ok(daily(
            store
                .views
                .iter()
                .filter(|v| store.is_authors(v.post_id, author_id, true) && v.created_at >= since)
                .map(|v| v.created_at.date_naive()),
        ))
    }

    async fn daily_active_signups(&self) -> BlogResult<Vec<DailyCount>> {
        let store = self.store();
        Ok(daily(
            store
                .subscribers
                .iter()
                .filter(|s| s.is_active)
                .map(|s| s.subscribed_at.date_naive()),
        ))
    }
}

impl DashboardRepository for InMemoryBlogStore {
    async fn dashboard_counts(&self, author_id: UserId) -> BlogResult<DashboardCounts> {
        let posts = self.author_post_counts(author_id).await?;
        let store = self.store();
        Ok(DashboardCounts {
            posts,
            views: store
                .views
                .iter()
                .filter(|v| store.is_authors(v.post_id, author_id, true))
                .count() as i64,
            likes: store
                .likes
                .iter()
                .filter(|l| store.is_authors(l.post_id, author_id, true))
                .count() as i64,
            comments: store
                .comments
                .iter()
                .filter(|c| store.is_authors(c.post_id, author_id, false))
                .count() as i64,
            subscribers: store.subscribers.iter().filter(|s| s.is_active).count() as i64,
        })
    }

    async fn recent_posts(&self, author_id: UserId, limit: i64) -> BlogResult<Vec<RecentPost>> {
        let store = self.store();
        let mut posts: Vec<Post> = store
            .posts
            .iter()
            .filter(|p| p.author_id == author_id)
            .cloned()
            .collect();
        newest_first(&mut posts, |p| (p.created_at, p.post_id.get()));
        posts.truncate(limit as usize);
        Ok(posts
            .into_iter()
            .map(|post| {
                let id = post.post_id;
                RecentPost {
                    views: store.views.iter().filter(|v| v.post_id == id).count() as i64,
                    likes: store.likes.iter().filter(|l| l.post_id == id).count() as i64,
                    comments: store.comments.iter().filter(|c| c.post_id == id).count() as i64,
                    post,
                }
            })
            .collect())
    }

    async fn recent_comments(
        &self,
        author_id: UserId,
        limit: i64,
    ) -> BlogResult<Vec<RecentComment>> {
        let pairs: Vec<(Comment, Post)> = {
            let store = self.store();
            let mut comments: Vec<Comment> = store
                .comments
                .iter()
                .filter(|c| store.is_authors(c.post_id, author_id, false))
                .cloned()
                .collect();
            newest_first(&mut comments, |c| (c.created_at, c.comment_id.get()));
            comments.truncate(limit as usize);
            comments
                .into_iter()
                .filter_map(|c| store.post(c.post_id).cloned().map(|p| (c, p)))
                .collect()
        };

        pairs
            .into_iter()
            .map(|(comment, post)| {
                Ok(RecentComment {
                    author: self.author(comment.author_id)?,
                    post: PostRef {
                        id: post.post_id,
                        title: post.title,
                        slug: post.slug,
                    },
                    comment,
                })
            })
            .collect()
    }
}

impl ExportRepository for InMemoryBlogStore {
    async fn export_posts(&self, author_id: UserId) -> BlogResult<Vec<Post>> {
        let mut posts: Vec<Post> = self
            .store()
            .posts
            .iter()
            .filter(|p| p.author_id == author_id)
            .cloned()
            .collect();
        newest_first(&mut posts, |p| (p.created_at, p.post_id.get()));
        Ok(posts)
    }

    async fn export_comments(&self, author_id: UserId) -> BlogResult<Vec<ExportedComment>> {
        let store = self.store();
        let mut comments: Vec<&Comment> = store
            .comments
            .iter()
            .filter(|c| c.author_id == author_id)
            .collect();
        newest_first(&mut comments, |c| (c.created_at, c.comment_id.get()));
        Ok(comments
            .into_iter()
            .filter_map(|c| {
                store.post(c.post_id).map(|p| ExportedComment {
                    comment: c.clone(),
                    post_title: p.title.clone(),
                })
            })
            .collect())
    }
}
