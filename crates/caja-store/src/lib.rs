//! # caja-store: Plain-Text Storage Layer for Caja POS
//!
//! Every file the system touches is owned by this crate.
//!
//! ## Layout on Disk
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Caja POS on disk                             │
//! │                                                                     │
//! │  Ventas/                  the receipt archive (SalesArchive)        │
//! │  ├── VEN001.txt           one rendered receipt per completed sale   │
//! │  ├── VEN002.txt                                                     │
//! │  └── ...                                                            │
//! │                                                                     │
//! │  data/                                                              │
//! │  ├── clientes.txt         customer records (CustomerBook)           │
//! │  └── productos.txt        product records (ProductCatalog)          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`archive`] - Receipt directory: record, read back, rebuild the index
//! - [`customers`] - Customer book (`lookupCustomer` collaborator)
//! - [`products`] - Product catalog (`lookupProduct` collaborator)
//! - [`checkout`] - Lookup + validate + mutate operations on a sale
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use caja_core::Sale;
//! use caja_store::{archive::SalesArchive, checkout, customers::CustomerBook,
//!                  products::ProductCatalog};
//!
//! # fn main() -> Result<(), caja_store::StoreError> {
//! let book = CustomerBook::open("data/clientes.txt")?;
//! let catalog = ProductCatalog::open("data/productos.txt")?;
//! let mut archive = SalesArchive::open("Ventas")?;
//!
//! let mut sale = Sale::new();
//! checkout::attach_customer(&mut sale, &book, "1234567890")?;
//! checkout::add_product(&mut sale, &catalog, "AB001", 2)?;
//! let receipt_file = archive.record_sale(sale)?;
//!
//! let listed = archive.list_sales(); // ascending by total
//! let ticket = archive.receipt_text(&receipt_file)?;
//! # let _ = (listed, ticket);
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod archive;
pub mod checkout;
pub mod customers;
pub mod error;
pub mod products;

// =============================================================================
// Re-exports
// =============================================================================

pub use archive::{rebuild_index, SalesArchive};
pub use customers::CustomerBook;
pub use error::{StoreError, StoreResult};
pub use products::ProductCatalog;
