//! # Receipt Format
//!
//! The canonical plain-text receipt: rendering a [`Sale`] into ticket text
//! and parsing that text back into a `Sale`.
//!
//! ## Document Layout
//! ```text
//! EMPRESA                      fixed company header
//! DATOS DE VENTA               sale number + timestamp
//! DATOS DEL CLIENTE            full name, identification, phone, email
//! PRODUCTOS                    tab-separated table, header row "Código ..."
//! TOTALES                      subtotal, IVA (19%), total
//! DATOS DEL PROGRAMA           fixed software tag
//! ```
//!
//! The section labels and their order are the contract: [`parse`] matches
//! them verbatim, and every receipt already on disk was written this way.
//!
//! ## Parsing Policy
//! `parse` is tolerant by design. It exists to rebuild the in-memory index
//! from historical files, not to validate business data: a malformed line
//! is logged at `warn!` and skipped, and any field never found keeps its
//! default. It never fails.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, warn};

use crate::error::ReceiptError;
use crate::money::Money;
use crate::types::{Customer, Product, Sale, IVA};

// =============================================================================
// Fixed Header / Footer Constants
// =============================================================================

/// Company name printed in the EMPRESA section.
pub const COMPANY_NAME: &str = "Mi Empresa S.A.S";

/// Company tax id (NIT) printed in the EMPRESA section.
pub const COMPANY_TAX_ID: &str = "900123456-7";

/// Software tag printed in the DATOS DEL PROGRAMA footer.
pub const SOFTWARE_TAG: &str = "Sistema POS v1.0";

// Section labels the parser matches verbatim.
const LBL_NUMBER: &str = "Número:";
const LBL_TIMESTAMP: &str = "Fecha y Hora:";
const LBL_FULL_NAME: &str = "Nombre Completo:";
const LBL_IDENTIFICATION: &str = "Identificación:";
const LBL_PHONE: &str = "Teléfono:";
const LBL_EMAIL: &str = "Correo:";
const LBL_TOTAL: &str = "Total:";
const PRODUCT_HEADER_TOKEN: &str = "Código";
const TOTALS_SECTION: &str = "TOTALES";

// =============================================================================
// Rendering
// =============================================================================

/// Renders a sale as canonical receipt text.
///
/// Fails with [`ReceiptError::MissingCustomer`] when no customer has been
/// associated; the DATOS DEL CLIENTE section cannot be produced without one.
pub fn render(sale: &Sale) -> Result<String, ReceiptError> {
    let customer = sale.customer().ok_or(ReceiptError::MissingCustomer)?;

    let mut out = String::new();

    out.push_str("EMPRESA\n");
    out.push_str(&format!("Nombre: {COMPANY_NAME}\n"));
    out.push_str(&format!("NIT: {COMPANY_TAX_ID}\n\n"));

    out.push_str("DATOS DE VENTA\n");
    out.push_str(&format!("{LBL_NUMBER} {}\n", sale.sale_number()));
    out.push_str(&format!(
        "{LBL_TIMESTAMP} {}\n\n",
        sale.timestamp().format("%Y-%m-%d %H:%M:%S")
    ));

    out.push_str("DATOS DEL CLIENTE\n");
    out.push_str(&format!("{LBL_FULL_NAME} {}\n", customer.full_name()));
    out.push_str(&format!(
        "{LBL_IDENTIFICATION} {} {}\n",
        customer.id_type, customer.identification
    ));
    out.push_str(&format!("{LBL_PHONE} {}\n", customer.phone));
    out.push_str(&format!("{LBL_EMAIL} {}\n\n", customer.email));

    out.push_str("PRODUCTOS\n");
    out.push_str("Código\tNombre\t\tPrecio\tCantidad\tSubtotal\n");
    for item in sale.line_items() {
        let product = item.product();
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\t\t{}\n",
            product.code,
            product.name,
            product.unit_price.format_plain(),
            item.quantity(),
            item.line_subtotal().format_plain()
        ));
    }
    out.push('\n');

    out.push_str("TOTALES\n");
    out.push_str(&format!("Subtotal: {}\n", sale.subtotal()));
    out.push_str(&format!("IVA ({}%): {}\n", IVA.percent(), sale.tax_total()));
    out.push_str(&format!("{LBL_TOTAL} {}\n\n", sale.total()));

    out.push_str("DATOS DEL PROGRAMA\n");
    out.push_str(SOFTWARE_TAG);
    out.push('\n');

    Ok(out)
}

// =============================================================================
// Parsing
// =============================================================================

/// Line-oriented parser state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Scanning for a labelled line or section header.
    Seeking,
    /// Inside DATOS DEL CLIENTE, collecting the remaining customer fields.
    CustomerBlock,
    /// Inside the PRODUCTOS table, one item per line.
    ProductTable,
}

/// Parses receipt text back into a [`Sale`].
///
/// Best-effort reconstruction for index rebuilds. Totals are not read back:
/// they are recomputed from the parsed line items, and the `Total:` line is
/// only checked for format validity. The timestamp is recovered at
/// date+hour granularity — the value sits between the label colon and the
/// minutes colon, so minutes and seconds are unreachable. That loss is a
/// property of the format, shared with the archive's existing readers.
pub fn parse(text: &str) -> Sale {
    let mut sale = Sale::new();
    let lines: Vec<&str> = text.lines().collect();

    let mut state = ParseState::Seeking;
    // Customer under construction while in CustomerBlock; unseen fields
    // stay empty.
    let mut customer: Option<Customer> = None;

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i].trim();

        match state {
            ParseState::Seeking => {
                if let Some(value) = label_value(line, LBL_NUMBER) {
                    sale.set_number(value);
                } else if let Some(value) = label_value(line, LBL_TIMESTAMP) {
                    // Everything after the label up to the next colon, which
                    // truncates "14:30:00" at the hour.
                    let date_hour = value.split(':').next().unwrap_or("").trim();
                    match parse_date_hour(date_hour) {
                        Some(timestamp) => sale.set_timestamp(timestamp),
                        None => {
                            warn!(line = i + 1, value = date_hour, "unparseable receipt timestamp")
                        }
                    }
                } else if let Some(value) = label_value(line, LBL_FULL_NAME) {
                    let (first_names, last_names) = match value.split_once(' ') {
                        Some((first, rest)) => (first.to_string(), rest.to_string()),
                        None => (value.to_string(), String::new()),
                    };
                    customer = Some(Customer {
                        identification: String::new(),
                        id_type: String::new(),
                        first_names,
                        last_names,
                        phone: String::new(),
                        email: String::new(),
                    });
                    state = ParseState::CustomerBlock;
                } else if line.starts_with(PRODUCT_HEADER_TOKEN) {
                    // The header row itself carries no data.
                    state = ParseState::ProductTable;
                } else if let Some(value) = label_value(line, LBL_TOTAL) {
                    // Parse-and-discard: the stored total is never trusted,
                    // totals are recomputed from line items.
                    if Money::parse_str(value).is_none() {
                        warn!(line = i + 1, value, "unparseable total amount");
                    }
                }
            }

            ParseState::CustomerBlock => {
                let done = fill_customer_field(line, customer.as_mut());
                if done || line.is_empty() {
                    if let Some(c) = customer.take() {
                        sale.set_customer(c);
                    }
                    state = ParseState::Seeking;
                }
            }

            ParseState::ProductTable => {
                if line.starts_with(TOTALS_SECTION) {
                    state = ParseState::Seeking;
                } else if !line.is_empty() {
                    if let Some((product, quantity)) = parse_product_row(line, i + 1) {
                        if sale.add_item(product, quantity).is_err() {
                            warn!(line = i + 1, "product row overflows sale amounts, skipped");
                        }
                    }
                }
            }
        }

        i += 1;
    }

    // EOF while still collecting customer fields.
    if let Some(c) = customer.take() {
        sale.set_customer(c);
    }

    sale
}

/// Returns the trimmed value after a `Label:` prefix, or `None` when the
/// line does not start with that label.
fn label_value<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    line.strip_prefix(label).map(str::trim)
}

/// Fills one customer field from a labelled line. Returns `true` when the
/// block is complete (the correo line is the last field rendered).
fn fill_customer_field(line: &str, customer: Option<&mut Customer>) -> bool {
    let Some(customer) = customer else {
        return true;
    };

    if let Some(value) = label_value(line, LBL_IDENTIFICATION) {
        // "CC 1234567890" → type, number
        match value.split_once(' ') {
            Some((id_type, number)) => {
                customer.id_type = id_type.to_string();
                customer.identification = number.trim().to_string();
            }
            None => customer.id_type = value.to_string(),
        }
    } else if let Some(value) = label_value(line, LBL_PHONE) {
        customer.phone = value.to_string();
    } else if let Some(value) = label_value(line, LBL_EMAIL) {
        customer.email = value.to_string();
        return true;
    }

    false
}

/// Parses one product table row.
///
/// Token layout: `code name... price quantity subtotal` — the name may
/// contain spaces, so it is everything between the code and the third
/// token from the end. The trailing subtotal is ignored (recomputed).
fn parse_product_row(line: &str, line_number: usize) -> Option<(Product, i64)> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 5 {
        debug!(line = line_number, tokens = tokens.len(), "short product row skipped");
        return None;
    }

    let price_idx = tokens.len() - 3;
    let code = tokens[0].to_string();
    let name = tokens[1..price_idx].join(" ");

    let Some(unit_price) = Money::parse_str(tokens[price_idx]) else {
        warn!(line = line_number, value = tokens[price_idx], "unparseable unit price");
        return None;
    };
    let quantity: i64 = match tokens[price_idx + 1].parse() {
        Ok(q) => q,
        Err(_) => {
            warn!(line = line_number, value = tokens[price_idx + 1], "unparseable quantity");
            return None;
        }
    };

    Some((Product { code, name, unit_price }, quantity))
}

/// Parses a `YYYY-MM-DD HH` value into a timestamp at hour granularity.
fn parse_date_hour(value: &str) -> Option<NaiveDateTime> {
    let (date_str, hour_str) = value.rsplit_once(' ')?;
    let date = NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").ok()?;
    let hour: u32 = hour_str.trim().parse().ok()?;
    date.and_hms_opt(hour, 0, 0)
}

// =============================================================================
// Unit Tests
// =============================================================================
