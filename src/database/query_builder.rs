use sqlx::{postgres::{PgArguments, PgRow}, FromRow, PgPool, Postgres};

use crate::database::manager::DatabaseError;
use crate::sql::{SqlParam, SqlResult};

/// Run a built query and collect every row
pub async fn select_all<T>(pool: &PgPool, sql: &SqlResult) -> Result<Vec<T>, DatabaseError>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    log_query(sql);
    let mut q = sqlx::query_as::<_, T>(&sql.query);
    for p in sql.params.iter() {
        q = bind_param_query_as(q, p);
    }
    let rows = q.fetch_all(pool).await?;
    Ok(rows)
}

/// Run a built query expecting zero or one row
pub async fn select_optional<T>(pool: &PgPool, sql: &SqlResult) -> Result<Option<T>, DatabaseError>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    log_query(sql);
    let mut q = sqlx::query_as::<_, T>(&sql.query);
    for p in sql.params.iter() {
        q = bind_param_query_as(q, p);
    }
    let row = q.fetch_optional(pool).await?;
    Ok(row)
}

fn log_query(sql: &SqlResult) {
    if crate::config::CONFIG.database.enable_query_logging {
        tracing::debug!(query = %sql.query, params = ?sql.params, "executing query");
    }
}

fn bind_param_query_as<'q, O>(
    q: sqlx::query::QueryAs<'q, Postgres, O, PgArguments>,
    v: &'q SqlParam,
) -> sqlx::query::QueryAs<'q, Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, PgRow>,
{
    match v {
        SqlParam::Text(s) => q.bind(s.as_deref()),
        SqlParam::Int(i) => q.bind(*i),
        SqlParam::Decimal(d) => q.bind(*d),
        SqlParam::Bool(b) => q.bind(*b),
    }
}
