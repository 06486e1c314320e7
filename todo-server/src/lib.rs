//! todo-server: CRUD HTTP service for todo items
//!
//! A single `todos` table in PostgreSQL exposed over JSON/HTTP:
//! list, create, get, replace and delete, plus a health check.

pub mod db;
pub mod http;
pub mod models;

pub use http::{build_router, run_server, ApiError, ServerConfig, ServerError};
