mod common;

use anyhow::Result;
use common::{dec, seed, test_db};

use jobly_api::database::models::{JobListing, JobUpdate, NewJob};
use jobly_api::database::{DatabaseError, JobRepository};
use jobly_api::sql::{ClauseError, JobFilter, UpdateData};

fn titles(jobs: &[JobListing]) -> Vec<&str> {
    jobs.iter().map(|j| j.title.as_str()).collect()
}

fn new_job(handle: &str) -> NewJob {
    NewJob {
        title: "Test".into(),
        salary: Some(100),
        equity: Some(dec("0.1")),
        company_handle: handle.into(),
    }
}

#[tokio::test]
async fn create_then_get_round_trips() -> Result<()> {
    let Some(db) = test_db().await? else { return Ok(()) };
    seed(&db.pool).await?;
    let repo = JobRepository::new(db.pool.clone());

    let job = repo.create(&new_job("c1")).await?;
    assert_eq!(job.title, "Test");
    assert_eq!(job.company_handle, "c1");
    assert_eq!(job.equity, Some(dec("0.1")));

    let detail = repo.get(job.id).await?;
    assert_eq!(detail.id, job.id);
    assert_eq!(detail.salary, Some(100));
    assert_eq!(detail.company.handle, "c1");
    assert_eq!(detail.company.name, "C1");

    db.cleanup().await
}

#[tokio::test]
async fn create_for_unknown_company_persists_nothing() -> Result<()> {
    let Some(db) = test_db().await? else { return Ok(()) };
    seed(&db.pool).await?;
    let repo = JobRepository::new(db.pool.clone());

    let err = repo.create(&new_job("nope")).await.unwrap_err();
    assert!(matches!(err, DatabaseError::BadRequest(ref m) if m == "Company nope does not exist"));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs WHERE title = 'Test'")
        .fetch_one(&db.pool)
        .await?;
    assert_eq!(count, 0);

    db.cleanup().await
}

#[tokio::test]
async fn create_rejects_duplicate_title_per_company() -> Result<()> {
    let Some(db) = test_db().await? else { return Ok(()) };
    seed(&db.pool).await?;
    let repo = JobRepository::new(db.pool.clone());

    repo.create(&new_job("c1")).await?;
    let err = repo.create(&new_job("c1")).await.unwrap_err();
    assert!(matches!(err, DatabaseError::BadRequest(ref m) if m == "Duplicate job: Test"));

    // same title at another company is fine
    repo.create(&new_job("c2")).await?;

    db.cleanup().await
}

#[tokio::test]
async fn find_all_without_filter_lists_every_job() -> Result<()> {
    let Some(db) = test_db().await? else { return Ok(()) };
    let fixtures = seed(&db.pool).await?;
    let repo = JobRepository::new(db.pool.clone());

    let jobs = repo.find_all(None).await?;
    assert_eq!(titles(&jobs), vec!["Job1", "Job2", "Job3", "Job4"]);
    assert_eq!(jobs[0].id, fixtures.job_ids[0]);
    assert_eq!(jobs[0].company_name.as_deref(), Some("C1"));
    assert_eq!(jobs[2].company_handle, "c2");
    assert_eq!(jobs[2].equity, Some(dec("0")));
    assert_eq!(jobs[3].salary, None);
    assert_eq!(jobs[3].equity, None);

    db.cleanup().await
}

#[tokio::test]
async fn find_all_filters_by_title_and_salary() -> Result<()> {
    let Some(db) = test_db().await? else { return Ok(()) };
    seed(&db.pool).await?;
    let repo = JobRepository::new(db.pool.clone());

    let by_title = repo
        .find_all(Some(&JobFilter { title: Some("job1".into()), ..Default::default() }))
        .await?;
    assert_eq!(titles(&by_title), vec!["Job1"]);

    let by_salary = repo
        .find_all(Some(&JobFilter { min_salary: Some(250), ..Default::default() }))
        .await?;
    assert_eq!(titles(&by_salary), vec!["Job2", "Job3"]);

    let combined = repo
        .find_all(Some(&JobFilter {
            title: Some("3".into()),
            min_salary: Some(250),
            has_equity: None,
        }))
        .await?;
    assert_eq!(titles(&combined), vec!["Job3"]);

    db.cleanup().await
}

#[tokio::test]
async fn has_equity_excludes_zero_and_null_equity() -> Result<()> {
    let Some(db) = test_db().await? else { return Ok(()) };
    seed(&db.pool).await?;
    let repo = JobRepository::new(db.pool.clone());

    let with_equity = repo
        .find_all(Some(&JobFilter { has_equity: Some(true), ..Default::default() }))
        .await?;
    assert_eq!(titles(&with_equity), vec!["Job1", "Job2"]);

    let with_equity_and_salary = repo
        .find_all(Some(&JobFilter {
            title: None,
            min_salary: Some(150),
            has_equity: Some(true),
        }))
        .await?;
    assert_eq!(titles(&with_equity_and_salary), vec!["Job2"]);

    let unrestricted = repo
        .find_all(Some(&JobFilter { has_equity: Some(false), ..Default::default() }))
        .await?;
    assert_eq!(unrestricted, repo.find_all(None).await?);

    db.cleanup().await
}

#[tokio::test]
async fn get_reports_missing_job() -> Result<()> {
    let Some(db) = test_db().await? else { return Ok(()) };
    seed(&db.pool).await?;
    let repo = JobRepository::new(db.pool.clone());

    let err = repo.get(0).await.unwrap_err();
    assert!(matches!(err, DatabaseError::NotFound(ref m) if m == "Job 0 does not exist"));

    db.cleanup().await
}

#[tokio::test]
async fn update_changes_only_given_fields() -> Result<()> {
    let Some(db) = test_db().await? else { return Ok(()) };
    let fixtures = seed(&db.pool).await?;
    let repo = JobRepository::new(db.pool.clone());
    let id = fixtures.job_ids[0];

    let update = JobUpdate {
        title: Some(Some("New".into())),
        salary: Some(Some(500)),
        equity: Some(Some(dec("0.5"))),
    };
    let job = repo.update(id, &update).await?;
    assert_eq!(job.id, id);
    assert_eq!(job.title, "New");
    assert_eq!(job.salary, Some(500));
    assert_eq!(job.equity, Some(dec("0.5")));
    assert_eq!(job.company_handle, "c1");

    let cleared = repo
        .update(id, &JobUpdate { salary: Some(None), ..Default::default() })
        .await?;
    assert_eq!(cleared.salary, None);
    assert_eq!(cleared.title, "New");

    db.cleanup().await
}

#[tokio::test]
async fn update_rejects_missing_job_and_empty_data() -> Result<()> {
    let Some(db) = test_db().await? else { return Ok(()) };
    let fixtures = seed(&db.pool).await?;
    let repo = JobRepository::new(db.pool.clone());

    let update = JobUpdate { title: Some(Some("X".into())), ..Default::default() };
    let err = repo.update(0, &update).await.unwrap_err();
    assert!(matches!(err, DatabaseError::NotFound(ref m) if m == "Job 0 does not exist"));

    let err = repo.update(fixtures.job_ids[0], &JobUpdate::default()).await.unwrap_err();
    assert!(matches!(err, DatabaseError::Clause(ClauseError::NoData)));

    db.cleanup().await
}

#[tokio::test]
async fn update_fields_cannot_move_job_between_companies() -> Result<()> {
    let Some(db) = test_db().await? else { return Ok(()) };
    let fixtures = seed(&db.pool).await?;
    let repo = JobRepository::new(db.pool.clone());
    let id = fixtures.job_ids[0];

    for field in ["companyHandle", "company_handle", "id"] {
        let data = UpdateData::new().with(field, "c2");
        let err = repo.update_fields(id, &data).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Clause(ClauseError::UnknownField(_))));
    }
    assert_eq!(repo.get(id).await?.company.handle, "c1");

    db.cleanup().await
}

#[tokio::test]
async fn remove_deletes_job() -> Result<()> {
    let Some(db) = test_db().await? else { return Ok(()) };
    let fixtures = seed(&db.pool).await?;
    let repo = JobRepository::new(db.pool.clone());
    let id = fixtures.job_ids[0];

    repo.remove(id).await?;
    assert!(matches!(repo.get(id).await, Err(DatabaseError::NotFound(_))));

    let err = repo.remove(id).await.unwrap_err();
    assert!(matches!(err, DatabaseError::NotFound(_)));

    db.cleanup().await
}
