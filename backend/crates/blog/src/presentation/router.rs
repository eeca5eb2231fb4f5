//! Blog Router

use axum::{
    Router,
    routing::{get, post, put},
};

use auth::domain::repository::UserRepository;
use auth::{Authenticator, PgAuthRepository};

use crate::domain::repository::BlogRepository;
use crate::infra::postgres::PgBlogRepository;
use crate::presentation::handlers::{self, BlogAppState};

/// Create the Blog router with PostgreSQL repositories
pub fn blog_router(
    repo: PgBlogRepository,
    authenticator: Authenticator<PgAuthRepository>,
) -> Router {
    blog_router_generic(repo, authenticator)
}

/// Create a generic Blog router for any repository implementation
pub fn blog_router_generic<R, U>(repo: R, authenticator: Authenticator<U>) -> Router
where
    R: BlogRepository,
    U: UserRepository + Send + Sync + 'static,
{
    let state = BlogAppState::new(repo, authenticator);

    Router::new()
        // Posts
        .route(
            "/posts",
            get(handlers::list_posts::<R, U>).post(handlers::create_post::<R, U>),
        )
        .route(
            "/posts/",
            get(handlers::list_posts::<R, U>).post(handlers::create_post::<R, U>),
        )
        .route("/posts/my-posts", get(handlers::my_posts::<R, U>))
        .route(
            "/posts/{id}",
            get(handlers::get_post::<R, U>)
                .put(handlers::update_post::<R, U>)
                .delete(handlers::delete_post::<R, U>),
        )
        // Comments
        .route("/comments", post(handlers::create_comment::<R, U>))
        .route("/comments/", post(handlers::create_comment::<R, U>))
        .route(
            "/comments/post/{post_id}",
            get(handlers::post_comments::<R, U>),
        )
        .route("/comments/my-comments", get(handlers::my_comments::<R, U>))
        .route(
            "/comments/{id}",
            put(handlers::update_comment::<R, U>)
                .delete(handlers::delete_comment::<R, U>),
        )
        // Interactions
        .route("/interactions/view", post(handlers::track_view::<R, U>))
        .route("/interactions/like", post(handlers::toggle_like::<R, U>))
        .route("/interactions/share", post(handlers::track_share::<R, U>))
        .route("/interactions/subscribe", post(handlers::subscribe::<R, U>))
        .route(
            "/interactions/unsubscribe",
            post(handlers::unsubscribe::<R, U>),
        )
        .route(
            "/interactions/post/{id}/stats",
            get(handlers::post_stats::<R, U>),
        )
        .route(
            "/interactions/post/{id}/user-interactions",
            get(handlers::user_interactions::<R, U>),
        )
        // Subscribers
        .route("/subscribers", get(handlers::list_subscribers::<R, U>))
        .route("/subscribers/", get(handlers::list_subscribers::<R, U>))
        .route(
            "/subscribers/stats",
            get(handlers::subscriber_stats::<R, U>),
        )
        // Analytics
        .route("/analytics/overview", get(handlers::overview::<R, U>))
        .route("/analytics/top-posts", get(handlers::top_posts::<R, U>))
        .route(
            "/analytics/views-over-time",
            get(handlers::views_over_time::<R, U>),
        )
        .route(
            "/analytics/audience-growth",
            get(handlers::audience_growth::<R, U>),
        )
        // Dashboard
        .route("/dashboard/stats", get(handlers::dashboard_stats::<R, U>))
        .route(
            "/dashboard/recent-posts",
            get(handlers::recent_posts::<R, U>),
        )
        .route(
            "/dashboard/recent-comments",
            get(handlers::recent_comments::<R, U>),
        )
        .route(
            "/dashboard/activity-feed",
            get(handlers::activity_feed::<R, U>),
        )
        // Data export
        .route("/user/export-data", get(handlers::export_data::<R, U>))
        .with_state(state)
}
