//! # Error Types
//!
//! Domain-specific error types for sole-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  sole-core errors (this file)                                          │
//! │  ├── CoreError        - Rejected ledger operations                     │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  sole-store errors (separate crate)                                    │
//! │  └── StoreError       - Backup file read/parse/shape failures          │
//! │                                                                         │
//! │  Back office errors (in app)                                           │
//! │  └── ApiError         - What the UI sees (serialized)                  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → UI message             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error here is raised BEFORE a new snapshot is built, so a failed
//! operation never leaves a partially applied state behind.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Ledger operation rejections.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No product with this id.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// No supplier with this id.
    #[error("Supplier not found: {0}")]
    SupplierNotFound(String),

    /// Checkout was attempted with nothing in the cart.
    #[error("Cannot record a sale with an empty cart")]
    EmptyCart,

    /// Supplier is still referenced by products.
    ///
    /// Raised by callers that check references before dispatching a
    /// delete; the ledger itself never raises it.
    #[error("Supplier {supplier_id} is used by {product_count} product(s)")]
    SupplierInUse {
        supplier_id: String,
        product_count: usize,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g., malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., two products with one id in a backup).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::SupplierInUse {
            supplier_id: "sup2".to_string(),
            product_count: 3,
        };
        assert_eq!(err.to_string(), "Supplier sup2 is used by 3 product(s)");
        assert_eq!(
            CoreError::EmptyCart.to_string(),
            "Cannot record a sale with an empty cart"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let err: CoreError = ValidationError::Required {
            field: "name".to_string(),
        }
        .into();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(err.to_string(), "Validation error: name is required");
    }
}
