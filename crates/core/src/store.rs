//! Persistence capability for companies.
//!
//! [`CompanyStore`] is the narrow contract the service depends on. The
//! PostgreSQL implementation lives in `registry-db`; [`crate::memory`] holds
//! an in-process one.

use async_trait::async_trait;

use crate::company::{Company, CompanyInput};
use crate::types::CompanyId;

/// Boxed backend error, kept opaque so this crate stays driver-agnostic.
pub type BackendError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No row matched the identity (missing on read, zero rows affected on
    /// update or delete).
    #[error("company {0} not found")]
    NotFound(CompanyId),

    /// Transport, query, or decode failure in the backing store.
    #[error("store failure: {0}")]
    Backend(#[source] BackendError),
}

impl StoreError {
    pub fn backend(err: impl Into<BackendError>) -> Self {
        StoreError::Backend(err.into())
    }
}

/// CRUD over a single logical `companies` table.
///
/// Implementations must be safe for concurrent use and must report a missing
/// identity as [`StoreError::NotFound`] from `update`, `get` and `delete`.
/// Callers validate input before handing it over; stores do not re-validate.
#[async_trait]
pub trait CompanyStore: Send + Sync {
    /// Persist a new company and return the identity the store assigned.
    async fn insert(&self, company: &CompanyInput) -> Result<CompanyId, StoreError>;

    /// Replace every mutable field of an existing company.
    async fn update(&self, id: CompanyId, company: &CompanyInput) -> Result<(), StoreError>;

    async fn get(&self, id: CompanyId) -> Result<Company, StoreError>;

    async fn delete(&self, id: CompanyId) -> Result<(), StoreError>;
}
