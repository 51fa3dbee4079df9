use axum::{
    extract::{rejection::{JsonRejection, PathRejection, QueryRejection}, Path, Query, State},
    Json,
};
use serde_json::{json, Value};

use super::{parse_body, AppState};
use crate::database::models::{Job, JobDetail, JobListing, JobUpdate, NewJob};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::sql::JobFilter;

fn job_id(path: Result<Path<i32>, PathRejection>) -> Result<i32, ApiError> {
    path.map(|Path(id)| id).map_err(|e| ApiError::bad_request(e.body_text()))
}

/// POST /jobs
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Job> {
    let data: NewJob = parse_body(payload)?;
    data.validate()?;
    let job = state.jobs.create(&data).await?;
    Ok(ApiResponse::created(job))
}

/// GET /jobs?title=&minSalary=&hasEquity=
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<JobFilter>, QueryRejection>,
) -> ApiResult<Vec<JobListing>> {
    let Query(filter) = query.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let jobs = state.jobs.find_all(Some(&filter)).await?;
    Ok(ApiResponse::success(jobs))
}

/// GET /jobs/:id
pub async fn get(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<JobDetail> {
    let job = state.jobs.get(job_id(path)?).await?;
    Ok(ApiResponse::success(job))
}

/// PATCH /jobs/:id
pub async fn update(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Job> {
    let id = job_id(path)?;
    let data: JobUpdate = parse_body(payload)?;
    data.validate()?;
    let job = state.jobs.update(id, &data).await?;
    Ok(ApiResponse::success(job))
}

/// DELETE /jobs/:id
pub async fn remove(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<Value> {
    let id = job_id(path)?;
    state.jobs.remove(id).await?;
    Ok(ApiResponse::success(json!({ "deleted": id })))
}
