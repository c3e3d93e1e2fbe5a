//! # Supplier Commands
//!
//! Supplier directory. Administrators only.

use serde::{Deserialize, Serialize};
use sole_core::search::search_suppliers;
use sole_core::types::{Section, Supplier};
use sole_core::validation::validate_supplier;
use sole_core::{CoreError, Operation, StoreState};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::state::{LedgerState, SessionState};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierDto {
    #[serde(flatten)]
    pub supplier: Supplier,
    /// Products that name this supplier
    pub product_count: usize,
}

impl SupplierDto {
    fn from_state(supplier: &Supplier, state: &StoreState) -> Self {
        SupplierDto {
            product_count: state.supplier_usage(&supplier.id),
            supplier: supplier.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierInput {
    pub company_name: String,
    #[serde(default)]
    pub contact_person: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
}

impl SupplierInput {
    fn into_supplier(self, id: String) -> Supplier {
        Supplier {
            id,
            company_name: self.company_name.trim().to_string(),
            contact_person: self.contact_person.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            address: self.address.trim().to_string(),
        }
    }
}

fn supplier_dto(ledger: &LedgerState, id: &str) -> ApiResult<SupplierDto> {
    ledger.with_state(|s| {
        s.supplier(id)
            .map(|sup| SupplierDto::from_state(sup, s))
            .ok_or_else(|| ApiError::not_found("Supplier", id))
    })
}

/// Lists suppliers matching company name or contact person.
pub fn list_suppliers(
    ledger: &LedgerState,
    session: &SessionState,
    query: Option<String>,
) -> ApiResult<Vec<SupplierDto>> {
    session.require_section(Section::Suppliers)?;
    let query = query.unwrap_or_default();
    debug!(query = %query, "list_suppliers command");

    Ok(ledger.with_state(|s| {
        search_suppliers(&s.suppliers, &query)
            .into_iter()
            .map(|sup| SupplierDto::from_state(sup, s))
            .collect()
    }))
}

pub fn add_supplier(
    ledger: &LedgerState,
    session: &SessionState,
    input: SupplierInput,
) -> ApiResult<SupplierDto> {
    session.require_section(Section::Suppliers)?;
    let supplier = input.into_supplier(Uuid::new_v4().to_string());
    debug!(company = %supplier.company_name, "add_supplier command");

    validate_supplier(&supplier)?;
    let id = supplier.id.clone();
    ledger.dispatch(Operation::AddSupplier(supplier))?;

    info!(supplier_id = %id, "Supplier added");
    supplier_dto(ledger, &id)
}

pub fn update_supplier(
    ledger: &LedgerState,
    session: &SessionState,
    id: String,
    input: SupplierInput,
) -> ApiResult<SupplierDto> {
    session.require_section(Section::Suppliers)?;
    debug!(supplier_id = %id, "update_supplier command");

    let supplier = input.into_supplier(id.clone());
    validate_supplier(&supplier)?;
    ledger.dispatch(Operation::UpdateSupplier(supplier))?;

    info!(supplier_id = %id, "Supplier updated");
    supplier_dto(ledger, &id)
}

/// Deletes a supplier that no product refers to.
///
/// ## Errors
/// - `NOT_FOUND` for an unknown id
/// - `CONFLICT` while products still name the supplier
pub fn delete_supplier(ledger: &LedgerState, session: &SessionState, id: String) -> ApiResult<()> {
    session.require_section(Section::Suppliers)?;
    debug!(supplier_id = %id, "delete_supplier command");

    let product_count = ledger.with_state(|s| s.supplier_usage(&id));
    if product_count > 0 {
        warn!(supplier_id = %id, product_count, "Supplier still in use");
        return Err(CoreError::SupplierInUse {
            supplier_id: id,
            product_count,
        }
        .into());
    }

    ledger.dispatch(Operation::DeleteSupplier(id.clone()))?;
    info!(supplier_id = %id, "Supplier deleted");
    Ok(())
}
