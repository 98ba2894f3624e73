//! In-process [`CompanyStore`] backed by a hash map.
//!
//! Used by tests and local runs that have no PostgreSQL available. Follows
//! the same not-found policy as the database store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::company::{Company, CompanyInput};
use crate::store::{CompanyStore, StoreError};
use crate::types::CompanyId;

#[derive(Debug, Default)]
pub struct MemoryCompanyStore {
    rows: RwLock<HashMap<CompanyId, Company>>,
}

impl MemoryCompanyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored companies.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl CompanyStore for MemoryCompanyStore {
    async fn insert(&self, company: &CompanyInput) -> Result<CompanyId, StoreError> {
        let id = Uuid::new_v4();
        self.rows
            .write()
            .await
            .insert(id, Company::from_input(id, company.clone()));
        Ok(id)
    }

    async fn update(&self, id: CompanyId, company: &CompanyInput) -> Result<(), StoreError> {
        let mut rows = self.rows.write().await;
        let row = rows.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        *row = Company::from_input(id, company.clone());
        Ok(())
    }

    async fn get(&self, id: CompanyId) -> Result<Company, StoreError> {
        self.rows
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn delete(&self, id: CompanyId) -> Result<(), StoreError> {
        self.rows
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::company::CompanyType;
    use assert_matches::assert_matches;

    fn acme() -> CompanyInput {
        CompanyInput {
            name: "Acme".to_string(),
            description: "widgets".to_string(),
            employees: 5,
            registered: true,
            kind: CompanyType::Corporation,
        }
    }

    #[tokio::test]
    async fn insert_then_get_round_trips() {
        let store = MemoryCompanyStore::new();
        let id = store.insert(&acme()).await.unwrap();
        assert_eq!(store.len().await, 1);

        let company = store.get(id).await.unwrap();
        assert_eq!(company.id, id);
        assert_eq!(CompanyInput::from(company), acme());
    }

    #[tokio::test]
    async fn update_replaces_all_fields() {
        let store = MemoryCompanyStore::new();
        let id = store.insert(&acme()).await.unwrap();

        let replacement = CompanyInput {
            name: "Acme Co-op".to_string(),
            description: String::new(),
            employees: 12,
            registered: false,
            kind: CompanyType::Cooperative,
        };
        store.update(id, &replacement).await.unwrap();

        let company = store.get(id).await.unwrap();
        assert_eq!(CompanyInput::from(company), replacement);
    }

    #[tokio::test]
    async fn missing_identity_is_not_found() {
        let store = MemoryCompanyStore::new();
        let id = Uuid::new_v4();

        assert_matches!(store.get(id).await, Err(StoreError::NotFound(missing)) if missing == id);
        assert_matches!(store.update(id, &acme()).await, Err(StoreError::NotFound(_)));
        assert_matches!(store.delete(id).await, Err(StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn second_delete_is_not_found() {
        let store = MemoryCompanyStore::new();
        let id = store.insert(&acme()).await.unwrap();

        store.delete(id).await.unwrap();
        assert!(store.is_empty().await);
        assert_matches!(store.delete(id).await, Err(StoreError::NotFound(_)));
    }
}
