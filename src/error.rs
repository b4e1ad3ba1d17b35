// src/error.rs
use std::fmt;

/// Failure raised before any number is computed. Numerical dead ends (no IRR,
/// no payback, no doubling) are not errors and travel inside the result.
#[derive(Debug, Clone, PartialEq)]
pub enum CalcError {
    /// An input field is missing, out of range or not a known variant.
    Validation { field: &'static str, message: String },
    /// A collaborator lookup (market data, scenario) yielded no record.
    NotFound(String),
}

impl CalcError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        CalcError::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        CalcError::NotFound(message.into())
    }
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CalcError::Validation { field, message } => write!(f, "invalid {}: {}", field, message),
            CalcError::NotFound(message) => write!(f, "not found: {}", message),
        }
    }
}

impl std::error::Error for CalcError {}
