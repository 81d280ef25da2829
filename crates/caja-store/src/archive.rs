//! # Sales Archive
//!
//! The receipt store: a single flat directory holding one UTF-8 text file
//! per completed sale, named `VEN###.txt`.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Sales Archive                                │
//! │                                                                     │
//! │  STARTUP                                                            │
//! │    open(dir) ── count VEN*.txt ──► next sequence number             │
//! │              └─ parse each file ──► SalesIndex (BST by total)       │
//! │                                                                     │
//! │  RUNTIME                                                            │
//! │    record_sale(sale)                                                │
//! │      ├── assign "VEN007"                                            │
//! │      ├── render receipt text                                        │
//! │      ├── write VEN007.txt                                           │
//! │      └── insert into index                                          │
//! │                                                                     │
//! │    list_sales() ──► index in-order (ascending total)                │
//! │    receipt_text("VEN007.txt") ──► raw file content                  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The archive is the sole writer of receipt files. Receipts are never
//! updated or deleted; the index only grows within a session.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use caja_core::{receipt, Sale, SalesIndex};

use crate::error::{StoreError, StoreResult};

/// Receipt file name prefix; also the sale number prefix.
pub const RECEIPT_PREFIX: &str = "VEN";

/// Receipt file name extension.
pub const RECEIPT_SUFFIX: &str = ".txt";

// =============================================================================
// Archive
// =============================================================================

/// Owns the receipt directory and the in-memory ordered index.
///
/// Single-threaded by design: no internal locking, callers embedding this
/// in a concurrent host must serialize access.
#[derive(Debug)]
pub struct SalesArchive {
    dir: PathBuf,
    next_sequence: u32,
    index: SalesIndex,
}

impl SalesArchive {
    /// Opens (creating if necessary) the archive directory and rebuilds
    /// the index from the receipts already on disk.
    ///
    /// The next sale number is seeded from the count of existing receipt
    /// files, continuing the sequence across restarts.
    pub fn open(dir: impl AsRef<Path>) -> StoreResult<Self> {
        let dir = dir.as_ref();
        ensure_path_not_blank(dir)?;
        fs::create_dir_all(dir)?;

        let files = receipt_files(dir)?;
        let next_sequence = files.len() as u32 + 1;
        let index = build_index(&files);

        debug!(
            dir = %dir.display(),
            receipts = files.len(),
            "sales archive opened"
        );

        Ok(SalesArchive {
            dir: dir.to_path_buf(),
            next_sequence,
            index,
        })
    }

    /// Seals and persists a completed sale.
    ///
    /// Assigns the next sale number, renders the receipt (which requires
    /// an associated customer), writes it as a new file and inserts the
    /// sale into the index. Returns the receipt file name.
    pub fn record_sale(&mut self, mut sale: Sale) -> StoreResult<String> {
        let number = format!("{RECEIPT_PREFIX}{:03}", self.next_sequence);
        sale.set_number(&number);

        let text = receipt::render(&sale)?;
        let file_name = format!("{number}{RECEIPT_SUFFIX}");
        fs::write(self.dir.join(&file_name), &text)?;

        self.index.insert(sale);
        self.next_sequence += 1;

        debug!(receipt = %file_name, "sale recorded");
        Ok(file_name)
    }

    /// All sales in ascending order of total (index in-order traversal).
    pub fn list_sales(&self) -> Vec<Sale> {
        self.index.in_order()
    }

    /// Number of sales currently in the index.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the archive currently holds no sales.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Raw read-back of a receipt file for display.
    pub fn receipt_text(&self, file_name: &str) -> StoreResult<String> {
        Ok(fs::read_to_string(self.dir.join(file_name))?)
    }

    /// Discards the in-memory index and rebuilds it from the directory.
    pub fn rebuild(&mut self) -> StoreResult<()> {
        self.index = rebuild_index(&self.dir)?;
        Ok(())
    }

    /// The archive directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

// =============================================================================
// Rebuild
// =============================================================================

/// Reconstructs a [`SalesIndex`] from every receipt file in `dir`.
///
/// A file that cannot be read is logged and skipped; one corrupt receipt
/// must not prevent loading the rest of the archive. The operation itself
/// fails only when the directory is absent or cannot be listed.
pub fn rebuild_index(dir: impl AsRef<Path>) -> StoreResult<SalesIndex> {
    let dir = dir.as_ref();
    ensure_path_not_blank(dir)?;
    if !dir.exists() {
        return Err(StoreError::DirectoryMissing {
            path: dir.display().to_string(),
        });
    }

    let files = receipt_files(dir)?;
    Ok(build_index(&files))
}

/// Lists receipt files (`VEN*.txt`) in `dir`, sorted by file name so that
/// rebuild insertion order is reproducible.
fn receipt_files(dir: &Path) -> StoreResult<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|source| StoreError::DirectoryUnreadable {
        path: dir.display().to_string(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(dir = %dir.display(), error = %err, "unreadable directory entry skipped");
                continue;
            }
        };
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with(RECEIPT_PREFIX) && name.ends_with(RECEIPT_SUFFIX) {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

/// Parses each receipt file and inserts the result into a fresh index.
fn build_index(files: &[PathBuf]) -> SalesIndex {
    let mut index = SalesIndex::new();
    for path in files {
        match fs::read_to_string(path) {
            Ok(text) => {
                let sale = receipt::parse(&text);
                debug!(file = %path.display(), number = sale.sale_number(), "receipt loaded");
                index.insert(sale);
            }
            Err(err) => {
                warn!(file = %path.display(), error = %err, "unreadable receipt skipped");
            }
        }
    }
    index
}

/// Rejects blank paths before any filesystem access.
fn ensure_path_not_blank(path: &Path) -> StoreResult<()> {
    if path.as_os_str().is_empty() || path.to_string_lossy().trim().is_empty() {
        return Err(StoreError::BlankPath);
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use caja_core::{Customer, Money, Product};
    use tempfile::TempDir;

    fn customer() -> Customer {
        Customer {
            identification: "1234567890".to_string(),
            id_type: "CC".to_string(),
            first_names: "Juan".to_string(),
            last_names: "Pérez González".to_string(),
            phone: "3101234567".to_string(),
            email: "juan.perez@email.com".to_string(),
        }
    }

    fn sale_with_price(price_cents: i64) -> Sale {
        let mut sale = Sale::new();
        sale.set_customer(customer());
        sale.add_item(
            Product {
                code: "AB001".to_string(),
                name: "Laptop HP".to_string(),
                unit_price: Money::from_cents(price_cents),
            },
            1,
        )
        .unwrap();
        sale
    }

    #[test]
    fn test_record_sale_assigns_sequential_numbers() {
        let tmp = TempDir::new().unwrap();
        let mut archive = SalesArchive::open(tmp.path()).unwrap();

        assert_eq!(archive.record_sale(sale_with_price(10_000)).unwrap(), "VEN001.txt");
        assert_eq!(archive.record_sale(sale_with_price(20_000)).unwrap(), "VEN002.txt");

        assert!(tmp.path().join("VEN001.txt").exists());
        assert!(tmp.path().join("VEN002.txt").exists());
        assert_eq!(archive.len(), 2);
    }

    #[test]
    fn test_record_sale_without_customer_fails() {
        let tmp = TempDir::new().unwrap();
        let mut archive = SalesArchive::open(tmp.path()).unwrap();

        let mut sale = Sale::new();
        sale.add_item(
            Product {
                code: "AB001".to_string(),
                name: "Laptop HP".to_string(),
                unit_price: Money::from_cents(10_000),
            },
            1,
        )
        .unwrap();
        let err = archive.record_sale(sale).unwrap_err();
        assert!(matches!(err, StoreError::Receipt(_)));
        // Nothing was written and the sequence did not advance.
        assert!(!tmp.path().join("VEN001.txt").exists());
        assert_eq!(archive.record_sale(sale_with_price(10_000)).unwrap(), "VEN001.txt");
    }

    #[test]
    fn test_sequence_continues_across_reopen() {
        let tmp = TempDir::new().unwrap();
        {
            let mut archive = SalesArchive::open(tmp.path()).unwrap();
            archive.record_sale(sale_with_price(10_000)).unwrap();
            archive.record_sale(sale_with_price(20_000)).unwrap();
        }

        let mut archive = SalesArchive::open(tmp.path()).unwrap();
        assert_eq!(archive.len(), 2);
        assert_eq!(archive.record_sale(sale_with_price(30_000)).unwrap(), "VEN003.txt");
    }

    #[test]
    fn test_list_sales_is_ordered_by_total() {
        let tmp = TempDir::new().unwrap();
        let mut archive = SalesArchive::open(tmp.path()).unwrap();
        for price in [30_000, 10_000, 50_000, 10_000, 45_000] {
            archive.record_sale(sale_with_price(price)).unwrap();
        }

        let totals: Vec<i64> = archive.list_sales().iter().map(|s| s.total().cents()).collect();
        let mut expected = totals.clone();
        expected.sort_unstable();
        assert_eq!(totals, expected);
        assert_eq!(totals.len(), 5);
    }

    #[test]
    fn test_receipt_text_reads_back_rendered_ticket() {
        let tmp = TempDir::new().unwrap();
        let mut archive = SalesArchive::open(tmp.path()).unwrap();
        let file_name = archive.record_sale(sale_with_price(10_000)).unwrap();

        let text = archive.receipt_text(&file_name).unwrap();
        assert!(text.contains("Número: VEN001"));
        assert!(text.contains("DATOS DEL CLIENTE"));
        assert!(text.contains("Total: $119.00"));
    }

    #[test]
    fn test_rebuild_recovers_recorded_sales() {
        let tmp = TempDir::new().unwrap();
        let mut archive = SalesArchive::open(tmp.path()).unwrap();
        archive.record_sale(sale_with_price(20_000)).unwrap();
        archive.record_sale(sale_with_price(10_000)).unwrap();

        let rebuilt = rebuild_index(tmp.path()).unwrap();
        assert_eq!(rebuilt.len(), 2);
        let numbers: Vec<String> = rebuilt
            .in_order()
            .iter()
            .map(|s| s.sale_number().to_string())
            .collect();
        // Ascending total: the 10_000 sale (VEN002) first.
        assert_eq!(numbers, ["VEN002", "VEN001"]);
    }

    #[test]
    fn test_rebuild_is_idempotent_within_session() {
        let tmp = TempDir::new().unwrap();
        let mut archive = SalesArchive::open(tmp.path()).unwrap();
        for price in [30_000, 10_000, 10_000] {
            archive.record_sale(sale_with_price(price)).unwrap();
        }

        let first = rebuild_index(tmp.path()).unwrap();
        let second = rebuild_index(tmp.path()).unwrap();

        let numbers = |index: &SalesIndex| -> Vec<String> {
            index
                .in_order()
                .iter()
                .map(|s| s.sale_number().to_string())
                .collect()
        };
        assert_eq!(numbers(&first), numbers(&second));
    }

    #[test]
    fn test_rebuild_skips_non_receipt_files() {
        let tmp = TempDir::new().unwrap();
        let mut archive = SalesArchive::open(tmp.path()).unwrap();
        archive.record_sale(sale_with_price(10_000)).unwrap();
        fs::write(tmp.path().join("notas.txt"), "not a receipt").unwrap();
        fs::write(tmp.path().join("VENTAS.log"), "also not a receipt").unwrap();

        let rebuilt = rebuild_index(tmp.path()).unwrap();
        assert_eq!(rebuilt.len(), 1);
    }

    #[test]
    fn test_rebuild_empty_directory() {
        let tmp = TempDir::new().unwrap();
        let rebuilt = rebuild_index(tmp.path()).unwrap();
        assert!(rebuilt.is_empty());
    }

    #[test]
    fn test_rebuild_missing_directory() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("no-such-dir");
        let err = rebuild_index(&missing).unwrap_err();
        assert!(matches!(err, StoreError::DirectoryMissing { .. }));
    }

    #[test]
    fn test_blank_path_rejected_before_filesystem_access() {
        assert!(matches!(rebuild_index("").unwrap_err(), StoreError::BlankPath));
        assert!(matches!(rebuild_index("   ").unwrap_err(), StoreError::BlankPath));
        assert!(matches!(SalesArchive::open("").unwrap_err(), StoreError::BlankPath));
    }

    #[test]
    fn test_corrupt_receipt_does_not_abort_rebuild() {
        let tmp = TempDir::new().unwrap();
        let mut archive = SalesArchive::open(tmp.path()).unwrap();
        archive.record_sale(sale_with_price(10_000)).unwrap();
        // A receipt-named file with nonsense content still parses to an
        // (empty) sale; rebuild must not fail on it.
        fs::write(tmp.path().join("VEN999.txt"), "garbage\nno labels here\n").unwrap();

        let rebuilt = rebuild_index(tmp.path()).unwrap();
        assert_eq!(rebuilt.len(), 2);
        let numbers: Vec<String> = rebuilt
            .in_order()
            .iter()
            .map(|s| s.sale_number().to_string())
            .collect();
        assert!(numbers.contains(&"VEN001".to_string()));
        assert!(numbers.contains(&String::new()));
    }
}
