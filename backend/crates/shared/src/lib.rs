//! Shared Kernel - vocabulary used by every domain crate
//!
//! - Common error type and result alias
//! - Typed integer ids for the persisted entities
//! - Pagination and partial-update helpers shared by the HTTP layer
//!
//! Only things with the same meaning in every domain belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
pub mod pagination;
pub mod patch;
