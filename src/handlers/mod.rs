// Route handlers. Reads are public; writes sit behind `ensure_admin`
// (see `app::app`).
pub mod companies;
pub mod health;
pub mod jobs;

use axum::{extract::rejection::JsonRejection, Json};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::database::repository::{CompanyRepository, JobRepository};
use crate::error::ApiError;

/// Shared handler state; repositories hold clones of one pool
#[derive(Clone)]
pub struct AppState {
    pub pool: sqlx::PgPool,
    pub companies: CompanyRepository,
    pub jobs: JobRepository,
}

impl AppState {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self {
            companies: CompanyRepository::new(pool.clone()),
            jobs: JobRepository::new(pool.clone()),
            pool,
        }
    }
}

/// Decode a JSON body into a typed payload, reporting both malformed JSON
/// and shape mismatches as 400s
pub(crate) fn parse_body<T: DeserializeOwned>(payload: Result<Json<Value>, JsonRejection>) -> Result<T, ApiError> {
    let Json(value) = payload.map_err(|e| ApiError::invalid_json(e.body_text()))?;
    serde_json::from_value(value).map_err(|e| ApiError::invalid_json(e.to_string()))
}
