//! # Validation Module
//!
//! Field validation rules for customer and product records.
//!
//! These run at the edges: on operator input before a record is appended,
//! and again when records are loaded back from the plain-text files, so a
//! hand-edited data file cannot smuggle malformed records into a sale.
//!
//! The rules are the historical ones the archive was written under;
//! loosening them would accept records older readers reject.

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Customer Validators
// =============================================================================

/// Validates a customer identification number: 8 to 10 digits.
pub fn validate_identification(identification: &str) -> ValidationResult<()> {
    let len = identification.chars().count();
    if !(8..=10).contains(&len) || !identification.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "identification".to_string(),
            reason: "must be 8 to 10 digits".to_string(),
        });
    }
    Ok(())
}

/// Validates an identification document type: "CC" or "CE".
pub fn validate_id_type(id_type: &str) -> ValidationResult<()> {
    if id_type != "CC" && id_type != "CE" {
        return Err(ValidationError::NotAllowed {
            field: "id_type".to_string(),
            allowed: vec!["CC".to_string(), "CE".to_string()],
        });
    }
    Ok(())
}

/// Validates customer first names: 10 to 30 characters.
pub fn validate_first_names(first_names: &str) -> ValidationResult<()> {
    validate_name_length("first names", first_names)
}

/// Validates customer last names: 10 to 30 characters.
pub fn validate_last_names(last_names: &str) -> ValidationResult<()> {
    validate_name_length("last names", last_names)
}

fn validate_name_length(field: &str, value: &str) -> ValidationResult<()> {
    let len = value.chars().count();
    if !(10..=30).contains(&len) {
        return Err(ValidationError::LengthOutOfRange {
            field: field.to_string(),
            min: 10,
            max: 30,
        });
    }
    Ok(())
}

/// Validates a phone number: exactly 10 digits.
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    if phone.chars().count() != 10 || !phone.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must be exactly 10 digits".to_string(),
        });
    }
    Ok(())
}

/// Validates an email address: non-empty local part, `@`, non-empty domain.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && local
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || "+_.-".contains(c))
        }
        None => false,
    };
    if !valid {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must be local@domain".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Product Validators
// =============================================================================

/// Validates a product code: exactly 5 characters, two letters followed by
/// three digits (e.g. "AB001").
pub fn validate_product_code(code: &str) -> ValidationResult<()> {
    let bytes = code.as_bytes();
    let valid = code.is_ascii()
        && bytes.len() == 5
        && bytes[..2].iter().all(u8::is_ascii_alphabetic)
        && bytes[2..].iter().all(u8::is_ascii_digit);
    if !valid {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must be 2 letters followed by 3 digits".to_string(),
        });
    }
    Ok(())
}

/// Validates a product name: at most 20 characters.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    if name.chars().count() > 20 {
        return Err(ValidationError::LengthOutOfRange {
            field: "name".to_string(),
            min: 0,
            max: 20,
        });
    }
    Ok(())
}

/// Validates a unit price: must be strictly positive.
pub fn validate_price(cents: i64) -> ValidationResult<()> {
    if cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Quantity Validator
// =============================================================================

/// Validates a line item quantity: must be strictly positive.
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
