//! Error types for dropdown construction and configuration.
//!
//! Runtime interaction never fails; these only surface at the boundaries
//! where a caller hands the engine data or settings.

use thiserror::Error;

/// Errors that can occur when building option lists or configuring a dropdown.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DropdownError {
    /// Two options share the same id
    #[error("Duplicate option id: {id}")]
    DuplicateOptionId {
        /// The repeated id
        id: String,
    },

    /// An option id is empty
    #[error("Option at position {position} has an empty id")]
    EmptyOptionId {
        /// Position of the offending option in the caller's sequence
        position: usize,
    },

    /// A configuration value is out of range
    #[error("Invalid dropdown configuration: {message}")]
    InvalidConfig {
        /// Description of the problem
        message: String,
    },
}

impl DropdownError {
    /// Create a duplicate option id error.
    pub fn duplicate_option_id(id: impl Into<String>) -> Self {
        Self::DuplicateOptionId { id: id.into() }
    }

    /// Create an invalid configuration error with a message.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
