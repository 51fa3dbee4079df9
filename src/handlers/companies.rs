use axum::{
    extract::{rejection::{JsonRejection, QueryRejection}, Path, Query, State},
    Json,
};
use serde_json::{json, Value};

use super::{parse_body, AppState};
use crate::database::models::{Company, CompanyDetail, CompanyUpdate, NewCompany};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::sql::CompanyFilter;

/// POST /companies
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Company> {
    let data: NewCompany = parse_body(payload)?;
    data.validate()?;
    let company = state.companies.create(&data).await?;
    Ok(ApiResponse::created(company))
}

/// GET /companies?name=&minEmployees=&maxEmployees=
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<CompanyFilter>, QueryRejection>,
) -> ApiResult<Vec<Company>> {
    let Query(filter) = query.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let companies = state.companies.find_all(Some(&filter)).await?;
    Ok(ApiResponse::success(companies))
}

/// GET /companies/:handle
pub async fn get(State(state): State<AppState>, Path(handle): Path<String>) -> ApiResult<CompanyDetail> {
    let company = state.companies.get(&handle).await?;
    Ok(ApiResponse::success(company))
}

/// PATCH /companies/:handle
pub async fn update(
    State(state): State<AppState>,
    Path(handle): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Company> {
    let data: CompanyUpdate = parse_body(payload)?;
    data.validate()?;
    let company = state.companies.update(&handle, &data).await?;
    Ok(ApiResponse::success(company))
}

/// DELETE /companies/:handle
pub async fn remove(State(state): State<AppState>, Path(handle): Path<String>) -> ApiResult<Value> {
    state.companies.remove(&handle).await?;
    Ok(ApiResponse::success(json!({ "deleted": handle })))
}
