//! Infrastructure Layer
//!
//! Database implementations of the blog repositories.

pub mod postgres;

pub use postgres::PgBlogRepository;
