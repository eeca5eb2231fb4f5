//! Blog Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits, pure rules
//! - `application/` - Use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Posts with unique slugs; drafts visible only to their author and admins
//! - Comments, views, likes, shares and newsletter subscriptions
//! - Windowed analytics and a dashboard over the caller's own posts
//! - Personal data export
//!
//! ## Authorization
//! - Handlers resolve the caller through `auth::CurrentUser` or
//!   `auth::Identity`
//! - Mutations require ownership; `is_admin` bypasses it

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod testing;


// Re-exports for convenience
pub use domain::repository::BlogRepository;
pub use error::{BlogError, BlogResult};
pub use infra::postgres::PgBlogRepository;
pub use presentation::router::blog_router;

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::reports::*;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}
