//! # Domain Types
//!
//! Core domain types used throughout Caja POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌───────────────┐   ┌───────────────┐   ┌───────────────┐         │
//! │  │   Customer    │   │    Product    │   │     Sale      │         │
//! │  │  ───────────  │   │  ───────────  │   │  ───────────  │         │
//! │  │ identification│   │  code         │   │  sale_number  │         │
//! │  │ id_type       │   │  name         │   │  customer     │         │
//! │  │ names, phone  │   │  unit_price   │   │  line_items   │         │
//! │  │ email         │   └───────┬───────┘   │  totals       │         │
//! │  └───────────────┘           │           └───────────────┘         │
//! │                      ┌───────┴───────┐                             │
//! │                      │   LineItem    │  product snapshot +         │
//! │                      │               │  quantity + line subtotal   │
//! │                      └───────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! Customers and products are copied *by value* into a sale when they are
//! associated. Later edits to the customer book or product catalog never
//! retroactively alter a historical sale.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01% = 1/10000, so 1900 bps = 19%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a whole percentage (for receipt labels).
    #[inline]
    pub const fn percent(&self) -> u32 {
        self.0 / 100
    }
}

/// The fixed VAT rate applied to every sale: 19%.
pub const IVA: TaxRate = TaxRate::from_bps(1900);

// =============================================================================
// Customer
// =============================================================================

/// A customer record.
///
/// `id_type` is the identification document type: "CC" (cédula de
/// ciudadanía) or "CE" (cédula de extranjería).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub identification: String,
    pub id_type: String,
    pub first_names: String,
    pub last_names: String,
    pub phone: String,
    pub email: String,
}

impl Customer {
    /// Full name as it appears on a receipt: first names, a space, last
    /// names. The receipt parser splits this back on the *first* space, so
    /// multi-word given names do not round-trip; that lossy convention is
    /// shared with every receipt already on disk.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_names, self.last_names)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Business identifier: two letters followed by three digits (AB001).
    pub code: String,

    /// Display name shown on the receipt. May contain spaces.
    pub name: String,

    /// Unit sale price.
    pub unit_price: Money,
}

// =============================================================================
// Line Item
// =============================================================================

/// A line item in a sale: a product snapshot plus a quantity.
///
/// Immutable once constructed; the line subtotal is fixed at construction
/// from `unit_price × quantity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    product: Product,
    quantity: i64,
    line_subtotal: Money,
}

impl LineItem {
    /// Creates a line item, computing the line subtotal.
    ///
    /// Returns `None` when `unit_price × quantity` does not fit in the
    /// money range; quantities reach this from parsed receipt text, not
    /// just validated operator input.
    pub fn new(product: Product, quantity: i64) -> Option<Self> {
        let line_subtotal = product.unit_price.checked_mul_quantity(quantity)?;
        Some(LineItem {
            product,
            quantity,
            line_subtotal,
        })
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn line_subtotal(&self) -> Money {
        self.line_subtotal
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A sale in progress or reconstructed from the archive.
///
/// ## Lifecycle
/// ```text
/// Sale::new()            empty: no customer, no items, totals at zero
///      │
///      ▼
/// set_customer(..)       associate a customer snapshot
/// add_item(..)           append line items; totals recomputed each time
///      │
///      ▼
/// set_number("VEN007")   sealed by the archive when the receipt is written
/// ```
///
/// Derived totals are only ever produced by [`Sale::add_item`]; there is no
/// way to set them directly, so a sale's totals always agree with its line
/// items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    sale_number: String,
    timestamp: NaiveDateTime,
    customer: Option<Customer>,
    line_items: Vec<LineItem>,
    subtotal: Money,
    tax_total: Money,
    total: Money,
}

impl Sale {
    /// Creates an empty sale stamped with the current local time.
    pub fn new() -> Self {
        Sale {
            sale_number: String::new(),
            timestamp: Local::now().naive_local(),
            customer: None,
            line_items: Vec::new(),
            subtotal: Money::zero(),
            tax_total: Money::zero(),
            total: Money::zero(),
        }
    }

    /// Associates a customer with this sale (snapshot, by value).
    pub fn set_customer(&mut self, customer: Customer) {
        self.customer = Some(customer);
    }

    /// Adds a line item and recomputes the derived totals.
    ///
    /// Fails when the line subtotal overflows the money range; the sale is
    /// left untouched in that case.
    pub fn add_item(&mut self, product: Product, quantity: i64) -> Result<(), ValidationError> {
        let item = LineItem::new(product, quantity).ok_or(ValidationError::AmountOverflow {
            field: "line subtotal".to_string(),
        })?;
        self.line_items.push(item);
        self.update_totals();
        Ok(())
    }

    /// Assigns the sale number. Called by the archive when sealing.
    pub fn set_number(&mut self, number: impl Into<String>) {
        self.sale_number = number.into();
    }

    /// Overrides the timestamp (used when reconstructing from a receipt).
    pub fn set_timestamp(&mut self, timestamp: NaiveDateTime) {
        self.timestamp = timestamp;
    }

    /// Recomputes subtotal, tax and total from the line items.
    ///
    /// The sums saturate at the money range: individual line subtotals are
    /// already bounded, but an archive full of near-maximum lines must
    /// degrade to a clamped total rather than wrap or panic.
    fn update_totals(&mut self) {
        let mut subtotal = Money::zero();
        for item in &self.line_items {
            subtotal = subtotal.saturating_add(item.line_subtotal());
        }
        self.subtotal = subtotal;
        self.tax_total = subtotal.tax(IVA);
        self.total = subtotal.saturating_add(self.tax_total);
    }

    pub fn sale_number(&self) -> &str {
        &self.sale_number
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn customer(&self) -> Option<&Customer> {
        self.customer.as_ref()
    }

    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    pub fn tax_total(&self) -> Money {
        self.tax_total
    }

    pub fn total(&self) -> Money {
        self.total
    }
}

impl Default for Sale {
    fn default() -> Self {
        Sale::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(code: &str, name: &str, price_cents: i64) -> Product {
        Product {
            code: code.to_string(),
            name: name.to_string(),
            unit_price: Money::from_cents(price_cents),
        }
    }

    #[test]
    fn test_empty_sale() {
        let sale = Sale::new();
        assert!(sale.sale_number().is_empty());
        assert!(sale.customer().is_none());
        assert!(sale.line_items().is_empty());
        assert!(sale.total().is_zero());
    }

    #[test]
    fn test_line_item_subtotal() {
        let item = LineItem::new(product("AB001", "Laptop HP", 120_000_000), 2).unwrap();
        assert_eq!(item.line_subtotal().cents(), 240_000_000);
        assert_eq!(item.quantity(), 2);
    }

    #[test]
    fn test_totals_recomputed_on_add() {
        let mut sale = Sale::new();
        sale.add_item(product("AB001", "Laptop HP", 10_000), 1).unwrap();
        assert_eq!(sale.subtotal().cents(), 10_000);
        assert_eq!(sale.tax_total().cents(), 1_900);
        assert_eq!(sale.total().cents(), 11_900);

        sale.add_item(product("AB004", "Mouse Gamer", 5_000), 2).unwrap();
        assert_eq!(sale.subtotal().cents(), 20_000);
        assert_eq!(sale.tax_total().cents(), 3_800);
        assert_eq!(sale.total().cents(), 23_800);
    }

    #[test]
    fn test_add_item_overflow_leaves_sale_untouched() {
        let mut sale = Sale::new();
        sale.add_item(product("AB001", "Laptop HP", 10_000), 1).unwrap();

        let err = sale
            .add_item(product("AB002", "Monitor LG", i64::MAX), 2)
            .unwrap_err();
        assert!(matches!(err, ValidationError::AmountOverflow { .. }));
        assert_eq!(sale.line_items().len(), 1);
        assert_eq!(sale.total().cents(), 11_900);
    }

    #[test]
    fn test_totals_saturate_instead_of_wrapping() {
        let mut sale = Sale::new();
        sale.add_item(product("AB001", "Laptop HP", i64::MAX), 1).unwrap();
        sale.add_item(product("AB002", "Monitor LG", i64::MAX), 1).unwrap();
        assert_eq!(sale.subtotal().cents(), i64::MAX);
        assert_eq!(sale.total().cents(), i64::MAX);
    }

    #[test]
    fn test_product_snapshot_is_by_value() {
        let mut catalog_entry = product("AB001", "Laptop HP", 10_000);
        let mut sale = Sale::new();
        sale.add_item(catalog_entry.clone(), 1).unwrap();

        // A later catalog price change must not touch the recorded sale.
        catalog_entry.unit_price = Money::from_cents(99_999);
        assert_eq!(sale.line_items()[0].product().unit_price.cents(), 10_000);
        assert_eq!(sale.subtotal().cents(), 10_000);
    }

    #[test]
    fn test_full_name() {
        let customer = Customer {
            identification: "1234567890".to_string(),
            id_type: "CC".to_string(),
            first_names: "Juan Carlos".to_string(),
            last_names: "Pérez González".to_string(),
            phone: "3101234567".to_string(),
            email: "juan.perez@email.com".to_string(),
        };
        assert_eq!(customer.full_name(), "Juan Carlos Pérez González");
    }
}
