//! Repository for the `companies` table.

use registry_core::company::CompanyInput;
use registry_core::types::CompanyId;
use sqlx::PgPool;

use crate::models::company::CompanyRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, employees, registered, type";

/// Provides CRUD operations for companies.
pub struct CompanyRepo;

impl CompanyRepo {
    /// Insert a new company, returning the identity generated by the database.
    pub async fn insert(pool: &PgPool, input: &CompanyInput) -> Result<CompanyId, sqlx::Error> {
        sqlx::query_scalar::<_, CompanyId>(
            "INSERT INTO companies (name, description, employees, registered, type)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.employees)
        .bind(input.registered)
        .bind(input.kind.as_str())
        .fetch_one(pool)
        .await
    }

    /// Find a company by its identity.
    pub async fn find_by_id(
        pool: &PgPool,
        id: CompanyId,
    ) -> Result<Option<CompanyRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM companies WHERE id = $1");
        sqlx::query_as::<_, CompanyRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Replace every mutable column. Returns `true` if a row was updated.
    pub async fn update(
        pool: &PgPool,
        id: CompanyId,
        input: &CompanyInput,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE companies SET
                name = $2,
                description = $3,
                employees = $4,
                registered = $5,
                type = $6
             WHERE id = $1",
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.employees)
        .bind(input.registered)
        .bind(input.kind.as_str())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete a company by identity. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: CompanyId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
