//! Company service: the boundary the HTTP layer depends on.
//!
//! Each method is a single store round-trip. Store failures are mapped into
//! [`CoreError`]: a missing identity stays a `NotFound`, everything else
//! becomes `Internal` with the operation name prepended.

use std::sync::Arc;

use crate::company::{Company, CompanyInput};
use crate::error::CoreError;
use crate::store::{CompanyStore, StoreError};
use crate::types::CompanyId;

const ENTITY: &str = "Company";

#[derive(Clone)]
pub struct CompanyService {
    store: Arc<dyn CompanyStore>,
}

impl CompanyService {
    pub fn new(store: Arc<dyn CompanyStore>) -> Self {
        Self { store }
    }

    /// Persist a validated company and return its new identity.
    pub async fn create(&self, company: &CompanyInput) -> Result<CompanyId, CoreError> {
        let id = self
            .store
            .insert(company)
            .await
            .map_err(|e| map_store_error("insert company", e))?;
        tracing::debug!(%id, "Company created");
        Ok(id)
    }

    pub async fn get(&self, id: CompanyId) -> Result<Company, CoreError> {
        self.store
            .get(id)
            .await
            .map_err(|e| map_store_error("get company", e))
    }

    /// Replace every field of an existing company.
    pub async fn update(&self, id: CompanyId, company: &CompanyInput) -> Result<(), CoreError> {
        self.store
            .update(id, company)
            .await
            .map_err(|e| map_store_error("update company", e))?;
        tracing::debug!(%id, "Company updated");
        Ok(())
    }

    pub async fn delete(&self, id: CompanyId) -> Result<(), CoreError> {
        self.store
            .delete(id)
            .await
            .map_err(|e| map_store_error("delete company", e))?;
        tracing::debug!(%id, "Company deleted");
        Ok(())
    }
}

fn map_store_error(context: &str, err: StoreError) -> CoreError {
    match err {
        StoreError::NotFound(id) => CoreError::NotFound { entity: ENTITY, id },
        StoreError::Backend(source) => CoreError::Internal(format!("{context}: {source}")),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
