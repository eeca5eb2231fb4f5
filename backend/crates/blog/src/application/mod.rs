//! Application Layer
//!
//! Use cases orchestrating the blog domain.

pub mod analytics;
pub mod comments;
pub mod dashboard;
pub mod export;
pub mod interactions;
pub mod posts;
pub mod subscriptions;

pub use analytics::{AnalyticsUseCase, Overview};
pub use comments::CommentsUseCase;
pub use dashboard::DashboardUseCase;
pub use export::{ExportUseCase, UserExport};
pub use interactions::InteractionsUseCase;
pub use posts::{CreatePostInput, PostsUseCase};
pub use subscriptions::{SubscribeInput, SubscriptionsUseCase};
