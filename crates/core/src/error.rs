use crate::company::CompanyValidationError;
use crate::types::CompanyId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: CompanyId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<CompanyValidationError> for CoreError {
    fn from(err: CompanyValidationError) -> Self {
        CoreError::Validation(err.to_string())
    }
}
