//! [`CompanyStore`] backed by PostgreSQL.
//!
//! Delegates to [`CompanyRepo`] and turns "no row found" / "zero rows
//! affected" into [`StoreError::NotFound`]. Every other `sqlx` failure is
//! reported as [`StoreError::Backend`].

use async_trait::async_trait;
use registry_core::company::{Company, CompanyInput};
use registry_core::store::{CompanyStore, StoreError};
use registry_core::types::CompanyId;

use crate::repositories::CompanyRepo;
use crate::DbPool;

#[derive(Debug, Clone)]
pub struct PgCompanyStore {
    pool: DbPool,
}

impl PgCompanyStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CompanyStore for PgCompanyStore {
    async fn insert(&self, company: &CompanyInput) -> Result<CompanyId, StoreError> {
        CompanyRepo::insert(&self.pool, company)
            .await
            .map_err(StoreError::backend)
    }

    async fn update(&self, id: CompanyId, company: &CompanyInput) -> Result<(), StoreError> {
        let updated = CompanyRepo::update(&self.pool, id, company)
            .await
            .map_err(StoreError::backend)?;
        if !updated {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn get(&self, id: CompanyId) -> Result<Company, StoreError> {
        CompanyRepo::find_by_id(&self.pool, id)
            .await
            .map_err(StoreError::backend)?
            .map(Company::from)
            .ok_or(StoreError::NotFound(id))
    }

    async fn delete(&self, id: CompanyId) -> Result<(), StoreError> {
        let deleted = CompanyRepo::delete(&self.pool, id)
            .await
            .map_err(StoreError::backend)?;
        if !deleted {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}
