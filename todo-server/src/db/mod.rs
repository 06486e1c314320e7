//! Database layer - connection pool, schema bootstrap, repositories
//!
//! - One pool per process, sessions borrowed per request
//! - Reads run on a pooled connection, mutations inside a transaction
//! - Sessions are released on drop, so every exit path gives them back

pub mod pool;
pub mod repos;
pub mod schema;

pub use pool::{create_lazy_pool, create_pool, create_pool_with_options, PoolSettings};
pub use repos::*;
pub use schema::ensure_schema;
