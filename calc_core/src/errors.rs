//! # Error Types
//!
//! Structured error type for calc_core. Every rejected calculation collapses
//! to a single kind, [`CalcError::InvalidInput`]: a field that is missing,
//! malformed, non-finite, zero or negative all look the same to the caller.
//!
//! The public `calculate` entry points never surface this type; they return
//! `None` instead. It is available through each engine's `evaluate` so a
//! front end can explain *why* no result was produced.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::errors::{CalcError, CalcResult};
//!
//! fn validate_volume(volume_ml: f64) -> CalcResult<()> {
//!     if volume_ml <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "volume",
//!             volume_ml.to_string(),
//!             "Value must be greater than zero",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for calc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value could not be used (unparseable, non-finite, or not positive)
    #[error("Invalid input for '{field}': '{value}' - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field
    pub fn field(&self) -> &str {
        match self {
            CalcError::InvalidInput { field, .. } => field,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
        }
    }
}
