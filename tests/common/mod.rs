#![allow(dead_code)]

use std::str::FromStr;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use sqlx::{postgres::PgPoolOptions, Executor, PgPool};
use uuid::Uuid;

use jobly_api::database::models::{NewCompany, NewJob};
use jobly_api::database::{CompanyRepository, DatabaseManager, JobRepository};
use jobly_api::handlers::AppState;

/// A throwaway Postgres schema holding its own `companies` and `jobs` tables.
/// Every pooled connection has its `search_path` pinned to it, so tests can
/// run in parallel against one database.
pub struct TestDb {
    pub pool: PgPool,
    schema: String,
    admin: PgPool,
}

impl TestDb {
    /// Drop the schema. A test that panics first leaves its schema behind.
    pub async fn cleanup(self) -> Result<()> {
        self.pool.close().await;
        self.admin
            .execute(format!("DROP SCHEMA \"{}\" CASCADE", self.schema).as_str())
            .await?;
        self.admin.close().await;
        Ok(())
    }
}

/// Returns `None` (and the caller skips) when DATABASE_URL is not set.
pub async fn test_db() -> Result<Option<TestDb>> {
    let _ = dotenvy::dotenv();
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping database test");
        return Ok(None);
    };

    let schema = format!("test_{}", Uuid::new_v4().simple());
    let admin = PgPoolOptions::new()
        .max_connections(1)
        .connect(&url)
        .await
        .context("failed to connect admin pool")?;
    admin
        .execute(format!("CREATE SCHEMA \"{}\"", schema).as_str())
        .await?;

    let search_path = schema.clone();
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .after_connect(move |conn, _meta| {
            let sql = format!("SET search_path TO \"{}\"", search_path);
            Box::pin(async move {
                conn.execute(sql.as_str()).await?;
                Ok(())
            })
        })
        .connect(&url)
        .await
        .context("failed to connect test pool")?;

    DatabaseManager::apply_schema(&pool).await?;
    Ok(Some(TestDb { pool, schema, admin }))
}

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).expect("valid decimal literal")
}

/// Ids of Job1..Job4, in that order
pub struct Fixtures {
    pub job_ids: Vec<i32>,
}

/// Companies c1..c3 (1..3 employees) and four jobs:
/// Job1 c1 100 0.1, Job2 c1 300 0.5, Job3 c2 400 0, Job4 c3 null null
pub async fn seed(pool: &PgPool) -> Result<Fixtures> {
    let companies = CompanyRepository::new(pool.clone());
    for n in 1..=3_i32 {
        companies
            .create(&NewCompany {
                handle: format!("c{}", n),
                name: format!("C{}", n),
                description: format!("Desc{}", n),
                num_employees: Some(n),
                logo_url: Some(format!("http://c{}.img", n)),
            })
            .await?;
    }

    let jobs = JobRepository::new(pool.clone());
    let specs = [
        ("Job1", Some(100), Some("0.1"), "c1"),
        ("Job2", Some(300), Some("0.5"), "c1"),
        ("Job3", Some(400), Some("0"), "c2"),
        ("Job4", None, None, "c3"),
    ];
    let mut job_ids = Vec::with_capacity(specs.len());
    for (title, salary, equity, handle) in specs {
        let job = jobs
            .create(&NewJob {
                title: title.to_string(),
                salary,
                equity: equity.map(dec),
                company_handle: handle.to_string(),
            })
            .await?;
        job_ids.push(job.id);
    }

    Ok(Fixtures { job_ids })
}

/// Serve the app on a free local port and return its base URL
pub async fn spawn_app(pool: PgPool) -> Result<String> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .with_context(|| format!("failed to bind port {}", port))?;
    let app = jobly_api::app::app(AppState::new(pool));
    tokio::spawn(async move { axum::serve(listener, app).await });
    Ok(format!("http://127.0.0.1:{}", port))
}

pub fn admin_token() -> String {
    jobly_api::auth::create_token("admin", true).expect("token")
}

pub fn u1_token() -> String {
    jobly_api::auth::create_token("u1", false).expect("token")
}
