//! Request-side models with validation at the boundary
//!
//! Client input is shaped into these types before any store access.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod todo;
pub mod pagination;

pub use validation::{Validate, ValidationError};
pub use todo::TodoFields;
pub use pagination::{Pagination, PaginationParams};
