//! # Error Types
//!
//! Domain-specific error types for nextcar-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  nextcar-core errors (this file)                                       │
//! │  ├── CoreError        - Draft / photo rule violations                  │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  nextcar-store errors   └── StoreError   - Session store failures      │
//! │  nextcar-api errors     └── ClientError  - Backend request failures    │
//! │                                                                         │
//! │  App errors (apps/nextcar)                                             │
//! │  └── AppError         - What the screen shows (code + notice)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Rule violations raised while editing a draft.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The draft already holds the maximum number of photos.
    #[error("A listing cannot have more than {max} photos")]
    PhotoLimitReached { max: usize },

    /// The picker handed back an empty image.
    #[error("Picked image has no data")]
    EmptyPhoto,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Always raised before any request leaves the device.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

impl ValidationError {
    /// Creates a Required error for the given field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
