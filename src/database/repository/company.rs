use sqlx::PgPool;
use tracing::debug;

use crate::database::manager::DatabaseError;
use crate::database::models::{Company, CompanyDetail, CompanyJob, CompanyUpdate, NewCompany, COMPANY_COLUMNS};
use crate::database::query_builder::{select_all, select_optional};
use crate::sql::{sql_for_partial_update, CompanyFilter, SqlParam, SqlResult, UpdateData};

const COMPANY_FIELDS: &str = "handle, name, description, num_employees, logo_url";

/// Data access for companies
#[derive(Clone)]
pub struct CompanyRepository {
    pool: PgPool,
}

impl CompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a company. Fails with `BadRequest` when the handle is taken.
    pub async fn create(&self, data: &NewCompany) -> Result<Company, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let duplicate = sqlx::query_scalar::<_, String>("SELECT handle FROM companies WHERE handle = $1")
            .bind(&data.handle)
            .fetch_optional(&mut *tx)
            .await?;
        if duplicate.is_some() {
            return Err(DatabaseError::BadRequest(format!("Duplicate company: {}", data.handle)));
        }

        let company = sqlx::query_as::<_, Company>(&format!(
            "INSERT INTO companies ({COMPANY_FIELDS}) VALUES ($1, $2, $3, $4, $5) RETURNING {COMPANY_FIELDS}"
        ))
        .bind(&data.handle)
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.num_employees)
        .bind(data.logo_url.as_deref())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        debug!("Created company {}", company.handle);
        Ok(company)
    }

    /// List companies ordered by name, optionally filtered
    pub async fn find_all(&self, filter: Option<&CompanyFilter>) -> Result<Vec<Company>, DatabaseError> {
        let sql = Self::find_all_sql(filter)?;
        select_all(&self.pool, &sql).await
    }

    /// A company together with its jobs ordered by id
    pub async fn get(&self, handle: &str) -> Result<CompanyDetail, DatabaseError> {
        let company = sqlx::query_as::<_, Company>(&format!(
            "SELECT {COMPANY_FIELDS} FROM companies WHERE handle = $1"
        ))
        .bind(handle)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound(format!("No company: {}", handle)))?;

        let jobs = sqlx::query_as::<_, CompanyJob>(
            "SELECT id, title, salary, equity FROM jobs WHERE company_handle = $1 ORDER BY id",
        )
        .bind(handle)
        .fetch_all(&self.pool)
        .await?;

        Ok(CompanyDetail { company, jobs })
    }

    pub async fn update(&self, handle: &str, data: &CompanyUpdate) -> Result<Company, DatabaseError> {
        self.update_fields(handle, &data.to_update_data()).await
    }

    /// Partial update from an already-built field mapping. Field names go
    /// through the company allow-list.
    pub async fn update_fields(&self, handle: &str, data: &UpdateData) -> Result<Company, DatabaseError> {
        let sql = Self::update_sql(handle, data)?;
        select_optional(&self.pool, &sql)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("No company: {}", handle)))
    }

    pub async fn remove(&self, handle: &str) -> Result<(), DatabaseError> {
        let deleted = sqlx::query_scalar::<_, String>("DELETE FROM companies WHERE handle = $1 RETURNING handle")
            .bind(handle)
            .fetch_optional(&self.pool)
            .await?;
        match deleted {
            Some(_) => Ok(()),
            None => Err(DatabaseError::NotFound(format!("No company: {}", handle))),
        }
    }

    pub fn find_all_sql(filter: Option<&CompanyFilter>) -> Result<SqlResult, DatabaseError> {
        let where_result = match filter {
            Some(f) => f.where_clause()?,
            None => SqlResult::default(),
        };
        Ok(SqlResult {
            query: format!(
                "SELECT {COMPANY_FIELDS} FROM companies{} ORDER BY name",
                where_result.query
            ),
            params: where_result.params,
        })
    }

    pub fn update_sql(handle: &str, data: &UpdateData) -> Result<SqlResult, DatabaseError> {
        let update = sql_for_partial_update(data, &COMPANY_COLUMNS)?;
        let query = format!(
            "UPDATE companies SET {} WHERE handle = ${} RETURNING {COMPANY_FIELDS}",
            update.set_cols,
            update.next_index()
        );
        let mut params = update.values;
        params.push(SqlParam::from(handle));
        Ok(SqlResult { query, params })
    }
}
