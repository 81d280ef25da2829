//! # Seed Data Generator
//!
//! Populates the record files with test customers and products for
//! development.
//!
//! ## Usage
//! ```bash
//! # Write into ./data (default)
//! cargo run -p caja-store --bin seed
//!
//! # Specify the data directory
//! cargo run -p caja-store --bin seed -- --data-dir ./mi-datos
//! ```

use std::env;
use std::path::{Path, PathBuf};
use std::process;

use tracing::{error, info};

use caja_core::{Customer, Money, Product};
use caja_store::{CustomerBook, ProductCatalog, StoreResult};

/// Test customers: identification, type, first names, last names, phone,
/// email.
const CUSTOMERS: &[(&str, &str, &str, &str, &str, &str)] = &[
    ("1234567890", "CC", "Juan Carlos", "Pérez González", "3101234567", "juan.perez@email.com"),
    ("2345678901", "CC", "María Isabel", "Rodríguez López", "3202345678", "maria.rodriguez@email.com"),
    ("3456789012", "CC", "Carlos Alberto", "Martínez Silva", "3303456789", "carlos.martinez@email.com"),
    ("4567890123", "CE", "Ana Patricia", "Gómez Torres", "3404567890", "ana.gomez@email.com"),
    ("5678901234", "CC", "Luis Fernando", "Díaz Ramírez", "3505678901", "luis.diaz@email.com"),
    ("6789012345", "CC", "Laura Marcela", "Hernández Vargas", "3606789012", "laura.hernandez@email.com"),
    ("7890123456", "CE", "Pedro José", "Sánchez Mendoza", "3707890123", "pedro.sanchez@email.com"),
    ("8901234567", "CC", "Sofía Elena", "Torres Jiménez", "3808901234", "sofia.torres@email.com"),
    ("9012345678", "CC", "Andrés Felipe", "Ramírez Castro", "3909012345", "andres.ramirez@email.com"),
    ("0123456789", "CE", "Carolina Andrea", "Vargas Rojas", "3000123456", "carolina.vargas@email.com"),
];

/// Test products: code, name, price in whole pesos.
const PRODUCTS: &[(&str, &str, i64)] = &[
    ("AB001", "Laptop HP", 1_200_000),
    ("AB002", "Monitor LG", 450_000),
    ("AB003", "Teclado Mec", 150_000),
    ("AB004", "Mouse Gamer", 80_000),
    ("AB005", "Audífonos", 120_000),
    ("CD001", "Impresora HP", 350_000),
    ("CD002", "Scanner Epson", 280_000),
    ("CD003", "Webcam Logi", 95_000),
    ("CD004", "Micrófono", 75_000),
    ("CD005", "Parlantes", 180_000),
    ("EF001", "Tablet Samsung", 850_000),
    ("EF002", "Smartwatch", 320_000),
    ("EF003", "Cargador USB", 25_000),
    ("EF004", "Hub USB", 45_000),
    ("EF005", "Memoria USB", 35_000),
    ("GH001", "Disco SSD", 280_000),
    ("GH002", "Memoria RAM", 180_000),
    ("GH003", "Tarjeta SD", 45_000),
    ("GH004", "Adaptador HDMI", 25_000),
    ("GH005", "Cable USB-C", 15_000),
];

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let data_dir = parse_data_dir();
    if let Err(err) = seed(&data_dir) {
        error!(error = %err, "seeding failed");
        process::exit(1);
    }
}

fn parse_data_dir() -> PathBuf {
    let mut data_dir = PathBuf::from("data");
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--data-dir" {
            if let Some(value) = args.next() {
                data_dir = PathBuf::from(value);
            }
        }
    }
    data_dir
}

/// Seeds both record files, skipping records that already exist so the
/// binary can be rerun without duplicating anything.
fn seed(data_dir: &Path) -> StoreResult<()> {
    let book = CustomerBook::open(data_dir.join("clientes.txt"))?;
    let mut added: usize = 0;
    for (identification, id_type, first_names, last_names, phone, email) in CUSTOMERS {
        if book.find(identification)?.is_some() {
            continue;
        }
        book.save(&Customer {
            identification: identification.to_string(),
            id_type: id_type.to_string(),
            first_names: first_names.to_string(),
            last_names: last_names.to_string(),
            phone: phone.to_string(),
            email: email.to_string(),
        })?;
        added += 1;
    }
    info!(
        added,
        existing = CUSTOMERS.len() - added,
        file = "clientes.txt",
        "customers seeded"
    );

    let catalog = ProductCatalog::open(data_dir.join("productos.txt"))?;
    let mut added: usize = 0;
    for (code, name, pesos) in PRODUCTS {
        if catalog.find(code)?.is_some() {
            continue;
        }
        catalog.save(&Product {
            code: code.to_string(),
            name: name.to_string(),
            unit_price: Money::from_cents(pesos * 100),
        })?;
        added += 1;
    }
    info!(
        added,
        existing = PRODUCTS.len() - added,
        file = "productos.txt",
        "products seeded"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_seed_twice_does_not_duplicate_records() {
        let tmp = TempDir::new().unwrap();
        seed(tmp.path()).unwrap();
        seed(tmp.path()).unwrap();

        let book = CustomerBook::open(tmp.path().join("clientes.txt")).unwrap();
        assert_eq!(book.load_all().unwrap().len(), CUSTOMERS.len());

        let catalog = ProductCatalog::open(tmp.path().join("productos.txt")).unwrap();
        assert_eq!(catalog.load_all().unwrap().len(), PRODUCTS.len());
    }
}
