//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod config;
pub mod login;
pub mod profile;
pub mod register;
pub mod settings;

// Re-exports
pub use authenticate::{Authenticator, Identity};
pub use config::AuthConfig;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use profile::{ChangePasswordInput, ProfileInput, ProfileUseCase};
pub use register::{RegisterInput, RegisterUseCase};
pub use settings::SettingsUseCase;
