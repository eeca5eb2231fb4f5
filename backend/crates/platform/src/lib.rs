//! Platform Crate - Technical Infrastructure
//!
//! Shared technical building blocks with no domain knowledge:
//! - Password hashing (Argon2id) and password policy
//! - Signed bearer tokens (JWT, HS256)
//! - Client address / User-Agent extraction

pub mod client;
pub mod password;
pub mod token;
