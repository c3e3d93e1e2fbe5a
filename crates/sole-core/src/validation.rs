//! # Validation Module
//!
//! Input validation for the forms that feed the ledger.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: UI form                                                      │
//! │  └── Required markers, input types                                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Back office command                                          │
//! │  └── THIS MODULE: product / supplier / settings rules                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Ledger                                                       │
//! │  └── Empty cart, quantity > 0, unknown ids                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use sole_core::validation::{validate_quantity, validate_email};
//!
//! assert!(validate_quantity(2).is_ok());
//! assert!(validate_email("ahmet@ad.com").is_ok());
//! assert!(validate_email("ahmet").is_err());
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::ledger::StoreState;
use crate::money::Percent;
use crate::types::{Product, Sale, SettingsPatch, Supplier};
use crate::{MAX_ITEM_QUANTITY, MAX_PRICE_CENTS, MAX_SALE_CENTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

fn validate_required(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

fn validate_optional(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    if value.trim().chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }
    Ok(())
}

/// Loose email shape check: one `@` with text on both sides and a dot in
/// the domain.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();
    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    let (local, domain) = email.split_once('@').ok_or_else(|| invalid("missing @"))?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(invalid("must look like name@domain"));
    }
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(invalid("domain must contain a dot"));
    }
    Ok(())
}

/// Barcodes are digits only, 8 to 14 long (EAN-8 up to GTIN-14).
pub fn validate_barcode(barcode: &str) -> ValidationResult<()> {
    let barcode = barcode.trim();
    if !(8..=14).contains(&barcode.len()) || !barcode.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "barcode".to_string(),
            reason: "must be 8-14 digits".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Sale line quantity: 1..=MAX_ITEM_QUANTITY.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Prices may be zero but never negative, and stay under `MAX_PRICE_CENTS`.
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    validate_price_field("price", cents)
}

fn validate_price_field(field: &str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    if cents > MAX_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }
    Ok(())
}

fn validate_threshold(threshold: i64) -> ValidationResult<()> {
    if threshold < 0 {
        return Err(ValidationError::Negative {
            field: "lowStockThreshold".to_string(),
        });
    }
    Ok(())
}

/// A rate between 0% and 100%.
pub fn validate_percent_bps(field: &str, bps: u32) -> ValidationResult<()> {
    if bps > Percent::FULL.bps() {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: Percent::FULL.bps() as i64,
        });
    }
    Ok(())
}

// =============================================================================
// Entity Validators
// =============================================================================

/// Product form rules.
///
/// Name and brand are required; prices within `0..=MAX_PRICE_CENTS`; size positive;
/// barcode, when given, must be numeric. Stock is not constrained here:
/// corrections may legitimately go below zero.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_required("id", &product.id, 64)?;
    validate_required("name", &product.name, 200)?;
    validate_required("brand", &product.brand, 100)?;
    validate_optional("model", &product.model, 100)?;
    validate_optional("color", &product.color, 100)?;

    if !(product.size.is_finite() && product.size > 0.0) {
        return Err(ValidationError::MustBePositive {
            field: "size".to_string(),
        });
    }

    validate_price_field("purchasePrice", product.purchase_price_cents)?;
    validate_price_field("sellingPrice", product.selling_price_cents)?;

    if let Some(barcode) = product.barcode.as_deref().filter(|b| !b.trim().is_empty()) {
        validate_barcode(barcode)?;
    }

    Ok(())
}

/// Supplier form rules: company name required, email shape when given.
pub fn validate_supplier(supplier: &Supplier) -> ValidationResult<()> {
    validate_required("id", &supplier.id, 64)?;
    validate_required("companyName", &supplier.company_name, 200)?;
    validate_optional("contactPerson", &supplier.contact_person, 200)?;
    validate_optional("phone", &supplier.phone, 50)?;
    validate_optional("address", &supplier.address, 500)?;

    if !supplier.email.trim().is_empty() {
        validate_email(&supplier.email)?;
    }

    Ok(())
}

/// Settings patch ranges: VAT and staff cap within 0-100%, threshold ≥ 0.
pub fn validate_settings_patch(patch: &SettingsPatch) -> ValidationResult<()> {
    if let Some(name) = &patch.store_name {
        validate_required("storeName", name, 200)?;
    }
    if let Some(bps) = patch.vat_rate_bps {
        validate_percent_bps("vatRate", bps)?;
    }
    if let Some(bps) = patch.max_staff_discount_bps {
        validate_percent_bps("maxStaffDiscount", bps)?;
    }
    if let Some(threshold) = patch.low_stock_threshold {
        validate_threshold(threshold)?;
    }
    Ok(())
}

fn ensure_unique<'a>(field: &str, ids: impl Iterator<Item = &'a str>) -> ValidationResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ValidationError::Duplicate {
                field: field.to_string(),
                value: id.to_string(),
            });
        }
    }
    Ok(())
}

fn validate_sale_totals(sale: &Sale) -> ValidationResult<()> {
    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: format!("sale {}", sale.id),
        reason: reason.to_string(),
    };

    for item in &sale.items {
        validate_quantity(item.quantity)?;
        validate_price_cents(item.unit_price_cents)?;
        if item.total_price_cents != item.unit_price_cents * item.quantity {
            return Err(invalid("line total does not equal quantity × unit price"));
        }
    }

    let amounts = [
        sale.subtotal_cents,
        sale.discount_cents,
        sale.vat_cents,
        sale.total_cents,
    ];
    if amounts.iter().any(|c| !(-MAX_SALE_CENTS..=MAX_SALE_CENTS).contains(c)) {
        return Err(invalid("amount out of range"));
    }

    let expected = sale
        .subtotal_cents
        .checked_sub(sale.discount_cents)
        .and_then(|c| c.checked_add(sale.vat_cents));
    if expected != Some(sale.total_cents) {
        return Err(invalid("total does not equal subtotal - discount + vat"));
    }
    Ok(())
}

/// Whole-snapshot checks run before a restore is accepted.
///
/// Entity shapes are already enforced by deserialization; this adds id
/// uniqueness, settings ranges, price bounds and sale arithmetic
/// consistency.
pub fn validate_snapshot(state: &StoreState) -> ValidationResult<()> {
    ensure_unique("product id", state.products.iter().map(|p| p.id.as_str()))?;
    ensure_unique("sale id", state.sales.iter().map(|s| s.id.as_str()))?;
    ensure_unique("supplier id", state.suppliers.iter().map(|s| s.id.as_str()))?;
    ensure_unique("stock log id", state.stock_logs.iter().map(|l| l.id.as_str()))?;

    validate_percent_bps("vatRate", state.settings.vat_rate_bps)?;
    validate_percent_bps("maxStaffDiscount", state.settings.max_staff_discount_bps)?;
    validate_threshold(state.settings.low_stock_threshold)?;

    for product in &state.products {
        validate_price_field("purchasePrice", product.purchase_price_cents)?;
        validate_price_field("sellingPrice", product.selling_price_cents)?;
    }
    for sale in &state.sales {
        validate_sale_totals(sale)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
