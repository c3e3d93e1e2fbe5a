//! # Search
//!
//! In-memory lookups for the stock, checkout and supplier screens.
//!
//! ## Checkout Search Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cashier types or scans "8691234567890"                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Is query a barcode? (8-13 digits)                                     │
//! │  YES: exact barcode match, in stock ──► Found? Return [1]              │
//! │  NO / not found: name, brand or barcode substring                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Only stock > 0, at most CHECKOUT_RESULT_LIMIT results                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::types::{Product, Supplier};

/// Results shown under the checkout search box.
pub const CHECKOUT_RESULT_LIMIT: usize = 5;

/// Checks if a query looks like a scanned barcode (8-13 digits).
pub fn is_barcode_query(query: &str) -> bool {
    let len = query.len();
    (8..=13).contains(&len) && query.chars().all(|c| c.is_ascii_digit())
}

/// Name or brand contains the query (case-insensitive), or the barcode
/// contains it verbatim.
pub fn product_matches(product: &Product, query: &str) -> bool {
    let needle = query.to_lowercase();
    product.name.to_lowercase().contains(&needle)
        || product.brand.to_lowercase().contains(&needle)
        || product
            .barcode
            .as_deref()
            .is_some_and(|b| b.contains(query))
}

/// Stock screen search. An empty query lists everything.
pub fn search_products<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let query = query.trim();
    if query.is_empty() {
        return products.iter().collect();
    }
    products
        .iter()
        .filter(|p| product_matches(p, query))
        .collect()
}

/// Checkout search: sellable products only, capped result count, and an
/// empty query returns nothing.
pub fn search_checkout<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }

    if is_barcode_query(query) {
        if let Some(exact) = products
            .iter()
            .find(|p| p.is_sellable() && p.barcode.as_deref() == Some(query))
        {
            return vec![exact];
        }
    }

    products
        .iter()
        .filter(|p| p.is_sellable() && product_matches(p, query))
        .take(CHECKOUT_RESULT_LIMIT)
        .collect()
}

/// Supplier screen search on company name or contact person.
pub fn search_suppliers<'a>(suppliers: &'a [Supplier], query: &str) -> Vec<&'a Supplier> {
    let needle = query.trim().to_lowercase();
    suppliers
        .iter()
        .filter(|s| {
            needle.is_empty()
                || s.company_name.to_lowercase().contains(&needle)
                || s.contact_person.to_lowercase().contains(&needle)
        })
        .collect()
}
