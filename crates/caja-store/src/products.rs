//! # Product Catalog
//!
//! File-backed product records: one line per product, fields separated
//! by `*`.
//!
//! ```text
//! code*name*price
//! AB001*Laptop HP*1200000.00
//! ```
//!
//! Same storage discipline as the customer book: append on save, rewrite
//! on update/remove, validate on save and load. The price field accepts
//! both `.` and `,` decimal separators on load (historical files used
//! either convention).

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use caja_core::validation::{validate_price, validate_product_code, validate_product_name};
use caja_core::{Money, Product, ValidationError};

use crate::error::StoreResult;

/// Field separator in record lines.
const SEPARATOR: char = '*';

// =============================================================================
// Product Catalog
// =============================================================================

/// The product record file. Satisfies the `lookupProduct` collaborator
/// role through [`ProductCatalog::find`].
#[derive(Debug, Clone)]
pub struct ProductCatalog {
    path: PathBuf,
}

impl ProductCatalog {
    /// Opens the catalog, creating an empty record file (and its parent
    /// directory) if it does not exist yet.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, "")?;
        }
        Ok(ProductCatalog { path })
    }

    /// Validates and appends a new product record.
    pub fn save(&self, product: &Product) -> StoreResult<()> {
        validate_product(product)?;

        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        writeln!(file, "{}", format_record(product))?;
        debug!(code = %product.code, "product saved");
        Ok(())
    }

    /// Loads all valid product records. Invalid lines are logged and
    /// skipped.
    pub fn load_all(&self) -> StoreResult<Vec<Product>> {
        let content = fs::read_to_string(&self.path)?;

        let mut products = Vec::new();
        for (line_number, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match parse_record(line) {
                Some(product) => match validate_product(&product) {
                    Ok(()) => products.push(product),
                    Err(err) => {
                        warn!(line = line_number + 1, error = %err, "invalid product record skipped")
                    }
                },
                None => warn!(line = line_number + 1, "malformed product record skipped"),
            }
        }
        Ok(products)
    }

    /// Looks up a product by code.
    pub fn find(&self, code: &str) -> StoreResult<Option<Product>> {
        Ok(self.load_all()?.into_iter().find(|p| p.code == code))
    }

    /// Replaces the record matching the product's code.
    pub fn update(&self, product: &Product) -> StoreResult<()> {
        validate_product(product)?;

        let mut products = self.load_all()?;
        for existing in products.iter_mut() {
            if existing.code == product.code {
                *existing = product.clone();
                break;
            }
        }
        self.rewrite_all(&products)
    }

    /// Removes the record with the given code, if present.
    pub fn remove(&self, code: &str) -> StoreResult<()> {
        let mut products = self.load_all()?;
        products.retain(|p| p.code != code);
        self.rewrite_all(&products)
    }

    fn rewrite_all(&self, products: &[Product]) -> StoreResult<()> {
        let mut content = String::new();
        for product in products {
            content.push_str(&format_record(product));
            content.push('\n');
        }
        fs::write(&self.path, content)?;
        Ok(())
    }
}

// =============================================================================
// Record Format
// =============================================================================

fn format_record(product: &Product) -> String {
    format!(
        "{}{SEPARATOR}{}{SEPARATOR}{}",
        product.code,
        product.name,
        product.unit_price.format_plain()
    )
}

fn parse_record(line: &str) -> Option<Product> {
    let fields: Vec<&str> = line.split(SEPARATOR).collect();
    if fields.len() != 3 {
        return None;
    }
    let unit_price = Money::parse_str(fields[2])?;
    Some(Product {
        code: fields[0].to_string(),
        name: fields[1].to_string(),
        unit_price,
    })
}

fn validate_product(product: &Product) -> Result<(), ValidationError> {
    validate_product_code(&product.code)?;
    validate_product_name(&product.name)?;
    validate_price(product.unit_price.cents())?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
