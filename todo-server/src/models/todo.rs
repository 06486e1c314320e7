//! Create/update input for todo items
//!
//! The same shape is accepted by POST and PUT. PUT replaces every
//! mutable field, so omitted optional fields reset to their defaults.

use serde::Deserialize;

use super::validation::{reject_nul, Validate, ValidationError};

/// Client-supplied todo fields (never carries an id)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TodoFields {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

impl Validate for TodoFields {
    fn validate(&self) -> Result<(), ValidationError> {
        reject_nul("title", &self.title)?;
        if let Some(description) = &self.description {
            reject_nul("description", description)?;
        }
        Ok(())
    }
}
