//! Repository implementations for database access
//!
//! Repositories borrow a single connection for their lifetime. Callers
//! decide whether that connection is a plain pooled session (reads) or
//! an open transaction (mutations), and commit it themselves.

pub mod todos;

pub use todos::{Todo, TodoRepo};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}
