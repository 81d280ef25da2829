//! # Storage Error Types
//!
//! Error types for the plain-text storage layer.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Error Propagation                              │
//! │                                                                     │
//! │  std::io::Error / caja-core errors                                  │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  StoreError (this module) ← adds the path / lookup context          │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Caller presents directory-level failures as fatal to the           │
//! │  operation; per-file failures never reach here (logged + skipped)   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Policy: structural failures that prevent any work (blank path, missing
//! directory) abort and surface. A single corrupt historical receipt must
//! not prevent loading the rest of the archive, so per-record failures are
//! recovered inside the rebuild loop and only show up as log lines.

use std::io;

use thiserror::Error;

use caja_core::{ReceiptError, ValidationError};

/// Storage layer errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A blank or empty path was supplied. Raised before any filesystem
    /// access is attempted.
    #[error("path must not be blank")]
    BlankPath,

    /// The sales directory does not exist.
    #[error("sales directory not found: {path}")]
    DirectoryMissing { path: String },

    /// The sales directory exists but cannot be listed.
    #[error("could not list sales directory {path}: {source}")]
    DirectoryUnreadable {
        path: String,
        #[source]
        source: io::Error,
    },

    /// A file read or write failed outside the recoverable rebuild loop.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Receipt rendering precondition failed (no associated customer).
    #[error(transparent)]
    Receipt(#[from] ReceiptError),

    /// Customer lookup found no record for the identification.
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// Product lookup found no record for the code.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A record failed field validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(StoreError::BlankPath.to_string(), "path must not be blank");

        let err = StoreError::DirectoryMissing {
            path: "Ventas".to_string(),
        };
        assert_eq!(err.to_string(), "sales directory not found: Ventas");

        let err = StoreError::ProductNotFound("AB001".to_string());
        assert_eq!(err.to_string(), "Product not found: AB001");
    }

    #[test]
    fn test_receipt_error_converts() {
        let err: StoreError = ReceiptError::MissingCustomer.into();
        assert!(matches!(err, StoreError::Receipt(_)));
    }
}
