//! # caja-core: Pure Business Logic for Caja POS
//!
//! The heart of the point-of-sale record keeper: every rule that does not
//! touch a disk lives here.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Caja POS Architecture                          │
//! │                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────┐    │
//! │  │               ★ caja-core (THIS CRATE) ★                    │    │
//! │  │                                                             │    │
//! │  │  ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌───────┐  │    │
//! │  │  │  types  │ │  money  │ │ receipt │ │  index  │ │valida-│  │    │
//! │  │  │ Sale    │ │ Money   │ │ render  │ │ BST by  │ │ tion  │  │    │
//! │  │  │ Customer│ │ TaxRate │ │ parse   │ │ total   │ │ rules │  │    │
//! │  │  └─────────┘ └─────────┘ └─────────┘ └─────────┘ └───────┘  │    │
//! │  │                                                             │    │
//! │  │   NO I/O • NO FILESYSTEM • PURE FUNCTIONS                   │    │
//! │  └─────────────────────────────────────────────────────────────┘    │
//! │                               │                                     │
//! │  ┌────────────────────────────▼────────────────────────────────┐    │
//! │  │                 caja-store (storage layer)                  │    │
//! │  │     receipt archive, customer book, product catalog         │    │
//! │  └─────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Sale, LineItem, Customer, Product, TaxRate)
//! - [`money`] - Integer-cents money with the receipt text round-trip
//! - [`receipt`] - Canonical ticket text: render and tolerant parse
//! - [`index`] - Unbalanced BST over sales, keyed by total
//! - [`validation`] - Field validation rules for records
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: deterministic, no side effects beyond `tracing`
//! 2. **No I/O**: the filesystem belongs to caja-store
//! 3. **Integer money**: all amounts are cents (i64), never floats
//! 4. **Tolerant reads, strict writes**: rendering recomputes and formats
//!    exactly; parsing degrades gracefully line by line

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod index;
pub mod money;
pub mod receipt;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{ReceiptError, ValidationError};
pub use index::SalesIndex;
pub use money::Money;
pub use types::{Customer, LineItem, Product, Sale, TaxRate, IVA};
