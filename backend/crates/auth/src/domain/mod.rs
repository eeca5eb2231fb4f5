//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{user::User, user_settings::UserSettings};
pub use repository::{UserRepository, UserSettingsRepository};
