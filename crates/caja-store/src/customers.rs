//! # Customer Book
//!
//! File-backed customer records: one line per customer, fields separated
//! by `*`.
//!
//! ```text
//! identification*id_type*first_names*last_names*phone*email
//! 1234567890*CC*Juan Carlos*Pérez González*3101234567*juan.perez@email.com
//! ```
//!
//! New records are appended; update and remove rewrite the whole file
//! (the book is small and single-user). Records are validated on save and
//! again on load, so a hand-edited file cannot smuggle malformed records
//! into a sale; an invalid line on load is logged and skipped.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use caja_core::validation::{
    validate_email, validate_first_names, validate_id_type, validate_identification,
    validate_last_names, validate_phone,
};
use caja_core::{Customer, ValidationError};

use crate::error::StoreResult;

/// Field separator in record lines.
const SEPARATOR: char = '*';

// =============================================================================
// Customer Book
// =============================================================================

/// The customer record file. Satisfies the `lookupCustomer` collaborator
/// role through [`CustomerBook::find`].
#[derive(Debug, Clone)]
pub struct CustomerBook {
    path: PathBuf,
}

impl CustomerBook {
    /// Opens the book, creating an empty record file (and its parent
    /// directory) if it does not exist yet.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, "")?;
        }
        Ok(CustomerBook { path })
    }

    /// Validates and appends a new customer record.
    pub fn save(&self, customer: &Customer) -> StoreResult<()> {
        validate_customer(customer)?;

        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        writeln!(file, "{}", format_record(customer))?;
        debug!(identification = %customer.identification, "customer saved");
        Ok(())
    }

    /// Loads all valid customer records. Invalid lines are logged and
    /// skipped.
    pub fn load_all(&self) -> StoreResult<Vec<Customer>> {
        let content = fs::read_to_string(&self.path)?;

        let mut customers = Vec::new();
        for (line_number, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match parse_record(line) {
                Some(customer) => match validate_customer(&customer) {
                    Ok(()) => customers.push(customer),
                    Err(err) => {
                        warn!(line = line_number + 1, error = %err, "invalid customer record skipped")
                    }
                },
                None => warn!(line = line_number + 1, "malformed customer record skipped"),
            }
        }
        Ok(customers)
    }

    /// Looks up a customer by identification number.
    pub fn find(&self, identification: &str) -> StoreResult<Option<Customer>> {
        Ok(self
            .load_all()?
            .into_iter()
            .find(|c| c.identification == identification))
    }

    /// Replaces the record matching the customer's identification.
    pub fn update(&self, customer: &Customer) -> StoreResult<()> {
        validate_customer(customer)?;

        let mut customers = self.load_all()?;
        for existing in customers.iter_mut() {
            if existing.identification == customer.identification {
                *existing = customer.clone();
                break;
            }
        }
        self.rewrite_all(&customers)
    }

    /// Removes the record with the given identification, if present.
    pub fn remove(&self, identification: &str) -> StoreResult<()> {
        let mut customers = self.load_all()?;
        customers.retain(|c| c.identification != identification);
        self.rewrite_all(&customers)
    }

    fn rewrite_all(&self, customers: &[Customer]) -> StoreResult<()> {
        let mut content = String::new();
        for customer in customers {
            content.push_str(&format_record(customer));
            content.push('\n');
        }
        fs::write(&self.path, content)?;
        Ok(())
    }
}

// =============================================================================
// Record Format
// =============================================================================

fn format_record(customer: &Customer) -> String {
    [
        customer.identification.as_str(),
        customer.id_type.as_str(),
        customer.first_names.as_str(),
        customer.last_names.as_str(),
        customer.phone.as_str(),
        customer.email.as_str(),
    ]
    .join(&SEPARATOR.to_string())
}

fn parse_record(line: &str) -> Option<Customer> {
    let fields: Vec<&str> = line.split(SEPARATOR).collect();
    if fields.len() != 6 {
        return None;
    }
    Some(Customer {
        identification: fields[0].to_string(),
        id_type: fields[1].to_string(),
        first_names: fields[2].to_string(),
        last_names: fields[3].to_string(),
        phone: fields[4].to_string(),
        email: fields[5].to_string(),
    })
}

fn validate_customer(customer: &Customer) -> Result<(), ValidationError> {
    validate_identification(&customer.identification)?;
    validate_id_type(&customer.id_type)?;
    validate_first_names(&customer.first_names)?;
    validate_last_names(&customer.last_names)?;
    validate_phone(&customer.phone)?;
    validate_email(&customer.email)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn customer(identification: &str) -> Customer {
        Customer {
            identification: identification.to_string(),
            id_type: "CC".to_string(),
            first_names: "Juan Carlos".to_string(),
            last_names: "Pérez González".to_string(),
            phone: "3101234567".to_string(),
            email: "juan.perez@email.com".to_string(),
        }
    }

    fn book(tmp: &TempDir) -> CustomerBook {
        CustomerBook::open(tmp.path().join("clientes.txt")).unwrap()
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let tmp = TempDir::new().unwrap();
        let book = book(&tmp);

        book.save(&customer("1234567890")).unwrap();
        book.save(&customer("2345678901")).unwrap();

        let loaded = book.load_all().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0], customer("1234567890"));
        assert_eq!(loaded[1], customer("2345678901"));
    }

    #[test]
    fn test_find_by_identification() {
        let tmp = TempDir::new().unwrap();
        let book = book(&tmp);
        book.save(&customer("1234567890")).unwrap();

        assert!(book.find("1234567890").unwrap().is_some());
        assert!(book.find("0000000000").unwrap().is_none());
    }

    #[test]
    fn test_update_replaces_matching_record() {
        let tmp = TempDir::new().unwrap();
        let book = book(&tmp);
        book.save(&customer("1234567890")).unwrap();

        let mut updated = customer("1234567890");
        updated.phone = "3209999999".to_string();
        book.update(&updated).unwrap();

        let found = book.find("1234567890").unwrap().unwrap();
        assert_eq!(found.phone, "3209999999");
        assert_eq!(book.load_all().unwrap().len(), 1);
    }

    #[test]
    fn test_remove_deletes_record() {
        let tmp = TempDir::new().unwrap();
        let book = book(&tmp);
        book.save(&customer("1234567890")).unwrap();
        book.save(&customer("2345678901")).unwrap();

        book.remove("1234567890").unwrap();
        assert!(book.find("1234567890").unwrap().is_none());
        assert_eq!(book.load_all().unwrap().len(), 1);
    }

    #[test]
    fn test_save_rejects_invalid_record() {
        let tmp = TempDir::new().unwrap();
        let book = book(&tmp);

        let mut bad = customer("1234567890");
        bad.phone = "123".to_string();
        assert!(book.save(&bad).is_err());
        assert!(book.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_load_skips_malformed_lines() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("clientes.txt");
        fs::write(
            &path,
            "1234567890*CC*Juan Carlos*Pérez González*3101234567*juan.perez@email.com\n\
             this line has no separators\n\
             9999*CC*Juan Carlos*Pérez González*3101234567*juan.perez@email.com\n",
        )
        .unwrap();

        let book = CustomerBook::open(&path).unwrap();
        let loaded = book.load_all().unwrap();
        // The unsplittable line and the short-identification line are
        // dropped; the good record survives.
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].identification, "1234567890");
    }

    #[test]
    fn test_open_creates_missing_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data").join("clientes.txt");
        let book = CustomerBook::open(&path).unwrap();
        assert!(path.exists());
        assert!(book.load_all().unwrap().is_empty());
    }
}
