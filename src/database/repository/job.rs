use sqlx::PgPool;
use tracing::debug;

use crate::database::manager::DatabaseError;
use crate::database::models::{Company, Job, JobDetail, JobListing, JobUpdate, NewJob, JOB_COLUMNS};
use crate::database::query_builder::{select_all, select_optional};
use crate::sql::{sql_for_partial_update, JobFilter, SqlParam, SqlResult, UpdateData};

const JOB_FIELDS: &str = "id, title, salary, equity, company_handle";

/// Data access for jobs
#[derive(Clone)]
pub struct JobRepository {
    pool: PgPool,
}

impl JobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a job. The company must exist and must not already have a job
    /// with the same title; both are reported as `BadRequest`.
    pub async fn create(&self, data: &NewJob) -> Result<Job, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let company = sqlx::query_scalar::<_, String>("SELECT handle FROM companies WHERE handle = $1")
            .bind(&data.company_handle)
            .fetch_optional(&mut *tx)
            .await?;
        if company.is_none() {
            return Err(DatabaseError::BadRequest(format!(
                "Company {} does not exist",
                data.company_handle
            )));
        }

        let duplicate = sqlx::query_scalar::<_, i32>("SELECT id FROM jobs WHERE company_handle = $1 AND title = $2")
            .bind(&data.company_handle)
            .bind(&data.title)
            .fetch_optional(&mut *tx)
            .await?;
        if duplicate.is_some() {
            return Err(DatabaseError::BadRequest(format!("Duplicate job: {}", data.title)));
        }

        let job = sqlx::query_as::<_, Job>(&format!(
            "INSERT INTO jobs (title, salary, equity, company_handle) VALUES ($1, $2, $3, $4) RETURNING {JOB_FIELDS}"
        ))
        .bind(&data.title)
        .bind(data.salary)
        .bind(data.equity)
        .bind(&data.company_handle)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        debug!("Created job {} for {}", job.id, job.company_handle);
        Ok(job)
    }

    /// List jobs ordered by title, each with its company's name
    pub async fn find_all(&self, filter: Option<&JobFilter>) -> Result<Vec<JobListing>, DatabaseError> {
        let sql = Self::find_all_sql(filter);
        select_all(&self.pool, &sql).await
    }

    /// A job with its full company in place of the handle
    pub async fn get(&self, id: i32) -> Result<JobDetail, DatabaseError> {
        let job = sqlx::query_as::<_, Job>(&format!("SELECT {JOB_FIELDS} FROM jobs WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Job {} does not exist", id)))?;

        let company = sqlx::query_as::<_, Company>(
            "SELECT handle, name, description, num_employees, logo_url FROM companies WHERE handle = $1",
        )
        .bind(&job.company_handle)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound(format!("No company: {}", job.company_handle)))?;

        Ok(JobDetail {
            id: job.id,
            title: job.title,
            salary: job.salary,
            equity: job.equity,
            company,
        })
    }

    pub async fn update(&self, id: i32, data: &JobUpdate) -> Result<Job, DatabaseError> {
        self.update_fields(id, &data.to_update_data()).await
    }

    /// Partial update from an already-built field mapping, limited to
    /// title, salary and equity.
    pub async fn update_fields(&self, id: i32, data: &UpdateData) -> Result<Job, DatabaseError> {
        let sql = Self::update_sql(id, data)?;
        select_optional(&self.pool, &sql)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Job {} does not exist", id)))
    }

    pub async fn remove(&self, id: i32) -> Result<(), DatabaseError> {
        let deleted = sqlx::query_scalar::<_, i32>("DELETE FROM jobs WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        match deleted {
            Some(_) => Ok(()),
            None => Err(DatabaseError::NotFound(format!("Job {} does not exist", id))),
        }
    }

    pub fn find_all_sql(filter: Option<&JobFilter>) -> SqlResult {
        let where_result = filter.map(JobFilter::where_clause).unwrap_or_default();
        SqlResult {
            query: format!(
                "SELECT j.id, j.title, j.salary, j.equity, j.company_handle, c.name AS company_name \
                 FROM jobs AS j LEFT JOIN companies AS c ON c.handle = j.company_handle{} \
                 ORDER BY j.title, j.id",
                where_result.query
            ),
            params: where_result.params,
        }
    }

    pub fn update_sql(id: i32, data: &UpdateData) -> Result<SqlResult, DatabaseError> {
        let update = sql_for_partial_update(data, &JOB_COLUMNS)?;
        let query = format!(
            "UPDATE jobs SET {} WHERE id = ${} RETURNING {JOB_FIELDS}",
            update.set_cols,
            update.next_index()
        );
        let mut params = update.values;
        params.push(SqlParam::from(id));
        Ok(SqlResult { query, params })
    }
}
