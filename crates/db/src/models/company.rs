//! Company row model.

use registry_core::company::{Company, CompanyType};
use registry_core::types::CompanyId;
use sqlx::FromRow;

/// A row from the `companies` table.
#[derive(Debug, Clone, FromRow)]
pub struct CompanyRow {
    pub id: CompanyId,
    pub name: String,
    pub description: String,
    pub employees: i32,
    pub registered: bool,
    #[sqlx(rename = "type")]
    pub kind: String,
}

impl From<CompanyRow> for Company {
    fn from(row: CompanyRow) -> Self {
        Company {
            id: row.id,
            name: row.name,
            description: row.description,
            employees: row.employees,
            registered: row.registered,
            kind: CompanyType::from(row.kind),
        }
    }
}
