//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Post, Comment, Subscriber, interaction records)
//! - Domain value objects (Slug, TimeRange, ViewerKey)
//! - Read models for the reports
//! - Domain services (ownership rules, report arithmetic)
//! - Repository traits (interfaces)

pub mod entities;
pub mod reports;
pub mod repository;
pub mod services;
pub mod value_objects;
