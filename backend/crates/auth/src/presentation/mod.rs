//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and request extractors.

pub mod dto;
pub mod extractor;
pub mod handlers;
pub mod router;

pub use extractor::{AuthState, CurrentUser};
pub use handlers::AuthAppState;
pub use router::{auth_router, auth_router_generic};
