//! # Checkout Operations
//!
//! Glue between an in-progress [`Sale`] and the record files: look up the
//! referenced customer or product, validate the input and apply the
//! mutation. The looked-up record is copied into the sale by value, so
//! later edits to the book or catalog never alter the sale.

use caja_core::validation::validate_quantity;
use caja_core::Sale;

use crate::customers::CustomerBook;
use crate::error::{StoreError, StoreResult};
use crate::products::ProductCatalog;

/// Associates the customer with the given identification to the sale.
pub fn attach_customer(
    sale: &mut Sale,
    book: &CustomerBook,
    identification: &str,
) -> StoreResult<()> {
    let customer = book
        .find(identification)?
        .ok_or_else(|| StoreError::CustomerNotFound(identification.to_string()))?;
    sale.set_customer(customer);
    Ok(())
}

/// Adds `quantity` units of the product with the given code to the sale.
///
/// The quantity must be strictly positive; the sale's totals are
/// recomputed by the add.
pub fn add_product(
    sale: &mut Sale,
    catalog: &ProductCatalog,
    code: &str,
    quantity: i64,
) -> StoreResult<()> {
    validate_quantity(quantity)?;
    let product = catalog
        .find(code)?
        .ok_or_else(|| StoreError::ProductNotFound(code.to_string()))?;
    sale.add_item(product, quantity)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use caja_core::{Customer, Money, Product};
    use tempfile::TempDir;

    fn seeded(tmp: &TempDir) -> (CustomerBook, ProductCatalog) {
        let book = CustomerBook::open(tmp.path().join("clientes.txt")).unwrap();
        book.save(&Customer {
            identification: "1234567890".to_string(),
            id_type: "CC".to_string(),
            first_names: "Juan Carlos".to_string(),
            last_names: "Pérez González".to_string(),
            phone: "3101234567".to_string(),
            email: "juan.perez@email.com".to_string(),
        })
        .unwrap();

        let catalog = ProductCatalog::open(tmp.path().join("productos.txt")).unwrap();
        catalog
            .save(&Product {
                code: "AB001".to_string(),
                name: "Laptop HP".to_string(),
                unit_price: Money::from_cents(10_000),
            })
            .unwrap();

        (book, catalog)
    }

    #[test]
    fn test_attach_customer_and_add_product() {
        let tmp = TempDir::new().unwrap();
        let (book, catalog) = seeded(&tmp);

        let mut sale = Sale::new();
        attach_customer(&mut sale, &book, "1234567890").unwrap();
        add_product(&mut sale, &catalog, "AB001", 2).unwrap();

        assert_eq!(sale.customer().unwrap().identification, "1234567890");
        assert_eq!(sale.line_items().len(), 1);
        assert_eq!(sale.subtotal().cents(), 20_000);
    }

    #[test]
    fn test_unknown_customer() {
        let tmp = TempDir::new().unwrap();
        let (book, _) = seeded(&tmp);

        let mut sale = Sale::new();
        let err = attach_customer(&mut sale, &book, "0000000000").unwrap_err();
        assert!(matches!(err, StoreError::CustomerNotFound(_)));
        assert!(sale.customer().is_none());
    }

    #[test]
    fn test_unknown_product() {
        let tmp = TempDir::new().unwrap();
        let (_, catalog) = seeded(&tmp);

        let mut sale = Sale::new();
        let err = add_product(&mut sale, &catalog, "ZZ999", 1).unwrap_err();
        assert!(matches!(err, StoreError::ProductNotFound(_)));
    }

    #[test]
    fn test_overflowing_line_subtotal_rejected() {
        let tmp = TempDir::new().unwrap();
        let (_, catalog) = seeded(&tmp);

        let mut sale = Sale::new();
        let err = add_product(&mut sale, &catalog, "AB001", i64::MAX).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert!(sale.line_items().is_empty());
    }

    #[test]
    fn test_non_positive_quantity_rejected() {
        let tmp = TempDir::new().unwrap();
        let (_, catalog) = seeded(&tmp);

        let mut sale = Sale::new();
        assert!(add_product(&mut sale, &catalog, "AB001", 0).is_err());
        assert!(add_product(&mut sale, &catalog, "AB001", -1).is_err());
        assert!(sale.line_items().is_empty());
    }
}
