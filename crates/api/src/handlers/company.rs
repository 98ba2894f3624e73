//! Handlers for the company resource.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use registry_core::company::{Company, CompanyInput};
use registry_core::error::CoreError;
use registry_core::types::CompanyId;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Body of a successful create.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: CompanyId,
}

/// POST {COMPANY_SUBROUTE}
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CompanyInput>, JsonRejection>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    let input = validated(body)?;
    let id = state.companies.create(&input).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// GET {COMPANY_SUBROUTE}/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    id: Result<Path<CompanyId>, PathRejection>,
) -> AppResult<Json<Company>> {
    let id = parse_id(id)?;
    let company = state.companies.get(id).await?;
    Ok(Json(company))
}

/// PATCH {COMPANY_SUBROUTE}/{id}
///
/// Replaces every field; omitted fields take their zero value and must
/// still pass validation.
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<CompanyId>, PathRejection>,
    body: Result<Json<CompanyInput>, JsonRejection>,
) -> AppResult<StatusCode> {
    let id = parse_id(id)?;
    let input = validated(body)?;
    state.companies.update(id, &input).await?;
    Ok(StatusCode::OK)
}

/// DELETE {COMPANY_SUBROUTE}/{id}
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<CompanyId>, PathRejection>,
) -> AppResult<StatusCode> {
    let id = parse_id(id)?;
    state.companies.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn parse_id(id: Result<Path<CompanyId>, PathRejection>) -> AppResult<CompanyId> {
    id.map(|Path(id)| id)
        .map_err(|rejection| AppError::BadRequest(format!("Invalid company id: {rejection}")))
}

fn validated(body: Result<Json<CompanyInput>, JsonRejection>) -> AppResult<CompanyInput> {
    let Json(input) = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    input.validate().map_err(CoreError::from)?;
    Ok(input)
}
