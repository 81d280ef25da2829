//! # Error Types
//!
//! Domain-specific error types for caja-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  caja-core errors (this file)                                       │
//! │  ├── ValidationError  - Input validation failures                   │
//! │  └── ReceiptError     - Receipt rendering preconditions             │
//! │                                                                     │
//! │  caja-store errors (separate crate)                                 │
//! │  └── StoreError       - Archive / directory failures                │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (code, identification, etc.)
//! 3. Errors are enum variants, never String
//!
//! Malformed lines encountered while *parsing* a receipt are deliberately
//! not represented here: the parser recovers locally (logs and skips), so
//! no error type ever crosses that boundary.

use thiserror::Error;

// =============================================================================
// Receipt Error
// =============================================================================

/// Preconditions for rendering a sale as receipt text.
///
/// ## When This Occurs
/// - Rendering a sale that has no associated customer: the
///   "DATOS DEL CLIENTE" section cannot be produced, so the caller must
///   associate a customer before finalizing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReceiptError {
    /// Render called on a sale without an associated customer.
    #[error("sale has no associated customer")]
    MissingCustomer,
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value length is outside the allowed range.
    #[error("{field} must be between {min} and {max} characters")]
    LengthOutOfRange {
        field: String,
        min: usize,
        max: usize,
    },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., non-numeric phone, malformed product code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// A computed amount exceeds the representable money range.
    #[error("{field} exceeds the representable amount range")]
    AmountOverflow { field: String },
}

// =============================================================================
// Unit Tests
// =============================================================================
