//! # Product Commands
//!
//! Stock screen: product search, CRUD, low stock and stock history.
//!
//! ## Save Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Product Save Flow                                    │
//! │                                                                         │
//! │  Product form ──► ProductInput                                          │
//! │                        │                                                │
//! │                        ▼                                                │
//! │  ┌───────────────────────────────────────────┐                          │
//! │  │  1. Normalise blank barcode / supplier    │                          │
//! │  │  2. validate_product                      │──► VALIDATION_ERROR      │
//! │  │  3. Supplier must exist                   │──► NOT_FOUND             │
//! │  └───────────────────────────────────────────┘                          │
//! │                        │                                                │
//! │                        ▼                                                │
//! │  dispatch(AddProduct | UpdateProduct)                                   │
//! │       (the ledger writes the StockIn / Correction log)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use sole_core::search::search_products;
use sole_core::types::{Product, Section, StockLog};
use sole_core::validation::validate_product;
use sole_core::{Operation, StoreState};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::state::{LedgerState, SessionState};

/// Product row as the stock screen shows it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    #[serde(flatten)]
    pub product: Product,
    /// Company name of the supplier, if any and still on file
    pub supplier_name: Option<String>,
    /// Stock at or below the configured threshold
    pub low_stock: bool,
}

impl ProductDto {
    fn from_state(product: &Product, state: &StoreState) -> Self {
        ProductDto {
            supplier_name: product
                .supplier_id
                .as_deref()
                .and_then(|id| state.supplier(id))
                .map(|s| s.company_name.clone()),
            low_stock: product.is_low_stock(state.settings.low_stock_threshold),
            product: product.clone(),
        }
    }
}

/// Product form payload. The id is assigned on add and taken from the
/// call on update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    pub brand: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub color: String,
    pub size: f32,
    pub purchase_price_cents: i64,
    pub selling_price_cents: i64,
    pub stock: i64,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub supplier_id: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl ProductInput {
    fn into_product(self, id: String) -> Product {
        Product {
            id,
            name: self.name.trim().to_string(),
            brand: self.brand.trim().to_string(),
            model: self.model.trim().to_string(),
            color: self.color.trim().to_string(),
            size: self.size,
            purchase_price_cents: self.purchase_price_cents,
            selling_price_cents: self.selling_price_cents,
            stock: self.stock,
            barcode: non_blank(self.barcode),
            supplier_id: non_blank(self.supplier_id),
        }
    }
}

/// Validates a product against the current store before dispatch.
fn check_product(ledger: &LedgerState, product: &Product) -> ApiResult<()> {
    validate_product(product)?;
    if let Some(supplier_id) = &product.supplier_id {
        let known = ledger.with_state(|s| s.supplier(supplier_id).is_some());
        if !known {
            return Err(ApiError::not_found("Supplier", supplier_id));
        }
    }
    Ok(())
}

fn product_dto(ledger: &LedgerState, id: &str) -> ApiResult<ProductDto> {
    ledger.with_state(|s| {
        s.product(id)
            .map(|p| ProductDto::from_state(p, s))
            .ok_or_else(|| ApiError::not_found("Product", id))
    })
}

/// Lists products, optionally filtered by name, brand or barcode.
pub fn list_products(
    ledger: &LedgerState,
    session: &SessionState,
    query: Option<String>,
) -> ApiResult<Vec<ProductDto>> {
    session.require_section(Section::Stock)?;
    let query = query.unwrap_or_default();
    debug!(query = %query, "list_products command");

    Ok(ledger.with_state(|s| {
        search_products(&s.products, &query)
            .into_iter()
            .map(|p| ProductDto::from_state(p, s))
            .collect()
    }))
}

pub fn get_product(ledger: &LedgerState, session: &SessionState, id: String) -> ApiResult<ProductDto> {
    session.require_section(Section::Stock)?;
    debug!(product_id = %id, "get_product command");
    product_dto(ledger, &id)
}

/// Adds a product with a fresh id; its opening stock is logged as stock-in.
pub fn add_product(
    ledger: &LedgerState,
    session: &SessionState,
    input: ProductInput,
) -> ApiResult<ProductDto> {
    let user = session.require_section(Section::Stock)?;
    let product = input.into_product(Uuid::new_v4().to_string());
    debug!(name = %product.name, "add_product command");

    check_product(ledger, &product)?;
    let id = product.id.clone();
    ledger.dispatch(Operation::AddProduct(product))?;

    info!(product_id = %id, by = %user.username, "Product added");
    product_dto(ledger, &id)
}

/// Replaces product `id`; a stock change is logged as a correction.
pub fn update_product(
    ledger: &LedgerState,
    session: &SessionState,
    id: String,
    input: ProductInput,
) -> ApiResult<ProductDto> {
    let user = session.require_section(Section::Stock)?;
    debug!(product_id = %id, "update_product command");

    let product = input.into_product(id.clone());
    check_product(ledger, &product)?;
    ledger.dispatch(Operation::UpdateProduct(product))?;

    info!(product_id = %id, by = %user.username, "Product updated");
    product_dto(ledger, &id)
}

/// Deletes a product. Past sales and stock logs keep their references.
pub fn delete_product(ledger: &LedgerState, session: &SessionState, id: String) -> ApiResult<()> {
    let user = session.require_section(Section::Stock)?;
    debug!(product_id = %id, "delete_product command");

    ledger.dispatch(Operation::DeleteProduct(id.clone()))?;
    info!(product_id = %id, by = %user.username, "Product deleted");
    Ok(())
}

/// Products at or below the low-stock threshold, for the dashboard.
pub fn low_stock_products(ledger: &LedgerState, session: &SessionState) -> ApiResult<Vec<ProductDto>> {
    session.require_section(Section::Dashboard)?;
    debug!("low_stock_products command");

    Ok(ledger.with_state(|s| {
        s.low_stock_products()
            .into_iter()
            .map(|p| ProductDto::from_state(p, s))
            .collect()
    }))
}

/// Stock movements, newest first, optionally for one product.
pub fn stock_history(
    ledger: &LedgerState,
    session: &SessionState,
    product_id: Option<String>,
) -> ApiResult<Vec<StockLog>> {
    session.require_section(Section::Stock)?;
    debug!(product_id = ?product_id, "stock_history command");

    let mut logs: Vec<StockLog> = ledger.with_state(|s| {
        s.stock_logs
            .iter()
            .filter(|l| product_id.as_deref().map_or(true, |id| l.product_id == id))
            .cloned()
            .collect()
    });
    logs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    Ok(logs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing;
    use crate::error::ErrorCode;
    use sole_core::types::StockLogReason;

    fn input(stock: i64) -> ProductInput {
        ProductInput {
            name: "  Loafer ".to_string(),
            brand: "Derimod".to_string(),
            size: 42.0,
            purchase_price_cents: 50_000,
            selling_price_cents: 99_000,
            stock,
            barcode: Some("".to_string()),
            supplier_id: Some("sup3".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_add_product_logs_opening_stock() {
        let f = testing::staff();
        let dto = add_product(&f.ledger, &f.session, input(4)).unwrap();

        assert_eq!(dto.product.name, "Loafer");
        assert_eq!(dto.product.barcode, None);
        assert_eq!(dto.supplier_name.as_deref(), Some("Deri Mamülleri Co."));
        assert!(dto.low_stock);

        let history = stock_history(&f.ledger, &f.session, Some(dto.product.id.clone())).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].change, 4);
        assert_eq!(history[0].reason, StockLogReason::StockIn);
    }

    #[test]
    fn test_unknown_supplier_is_refused() {
        let f = testing::admin();
        let mut bad = input(1);
        bad.supplier_id = Some("sup9".to_string());

        let err = add_product(&f.ledger, &f.session, bad).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(f.ledger.with_state(|s| s.products.len()), 6);
    }

    #[test]
    fn test_invalid_product_is_refused() {
        let f = testing::admin();
        let mut bad = input(1);
        bad.name = "   ".to_string();
        let err = add_product(&f.ledger, &f.session, bad).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_update_logs_correction() {
        let f = testing::admin();
        let mut edit = input(10);
        edit.supplier_id = None;
        update_product(&f.ledger, &f.session, "4".to_string(), edit).unwrap();

        let history = stock_history(&f.ledger, &f.session, Some("4".to_string())).unwrap();
        assert_eq!(history[0].reason, StockLogReason::Correction);
        assert_eq!(history[0].change, 7);
    }

    #[test]
    fn test_update_unknown_product() {
        let f = testing::admin();
        let err = update_product(&f.ledger, &f.session, "99".to_string(), input(1)).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_list_and_low_stock() {
        let f = testing::staff();
        assert_eq!(list_products(&f.ledger, &f.session, None).unwrap().len(), 6);

        let hits = list_products(&f.ledger, &f.session, Some("jordan".to_string())).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].product.id, "6");

        let low = low_stock_products(&f.ledger, &f.session).unwrap();
        let ids: Vec<&str> = low.iter().map(|p| p.product.id.as_str()).collect();
        assert_eq!(ids, vec!["4", "6"]);
    }

    #[test]
    fn test_delete_keeps_history() {
        let f = testing::admin();
        delete_product(&f.ledger, &f.session, "1".to_string()).unwrap();
        assert!(get_product(&f.ledger, &f.session, "1".to_string()).is_err());

        let history = stock_history(&f.ledger, &f.session, Some("1".to_string())).unwrap();
        assert!(!history.is_empty());
    }

    #[test]
    fn test_requires_sign_in() {
        let f = testing::admin();
        f.session.logout();
        let err = list_products(&f.ledger, &f.session, None).unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
    }

    #[test]
    fn test_dto_flattens_product_fields() {
        let f = testing::admin();
        let dto = get_product(&f.ledger, &f.session, "1".to_string()).unwrap();
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["brand"], "Nike");
        assert_eq!(json["supplierName"], "Spor Giyim Ltd.");
        assert_eq!(json["lowStock"], false);
    }
}
