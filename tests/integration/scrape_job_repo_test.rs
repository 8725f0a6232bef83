use chrono::{Duration, Utc};
use uuid::Uuid;

use rankrs::domain::models::scrape_job::{ScrapeJob, ScrapeJobStatus};
use rankrs::domain::repositories::scrape_job_repository::ScrapeJobRepository;
use rankrs::infrastructure::repositories::scrape_job_repo_impl::ScrapeJobRepositoryImpl;

use crate::setup_db;

fn processing_job() -> ScrapeJob {
    ScrapeJob::new(
        Uuid::new_v4(),
        "https://example.com".to_string(),
        "fc-job".to_string(),
    )
}

#[tokio::test]
async fn test_create_and_find_roundtrip() {
    let repo = ScrapeJobRepositoryImpl::new(setup_db().await);

    let job = processing_job();
    repo.create(&job).await.unwrap();

    let found = repo.find_by_id(job.id).await.unwrap().unwrap();
    assert_eq!(found.id, job.id);
    assert_eq!(found.status, ScrapeJobStatus::Processing);
    assert_eq!(found.vendor_job_id.as_deref(), Some("fc-job"));
    assert!(found.processing_started_at.is_none());
    assert!(found.result_page_ids.is_empty());
}

#[tokio::test]
async fn test_concurrent_claim_yields_exactly_one_winner() {
    let repo = std::sync::Arc::new(ScrapeJobRepositoryImpl::new(setup_db().await));

    let job = processing_job();
    repo.create(&job).await.unwrap();

    let threshold = Duration::minutes(10);
    let first = {
        let repo = repo.clone();
        let id = job.id;
        tokio::spawn(async move { repo.claim(id, threshold).await })
    };
    let second = {
        let repo = repo.clone();
        let id = job.id;
        tokio::spawn(async move { repo.claim(id, threshold).await })
    };

    let first = first.await.unwrap().unwrap();
    let second = second.await.unwrap().unwrap();

    let winners = [&first, &second]
        .iter()
        .filter(|outcome| outcome.is_some())
        .count();
    assert_eq!(winners, 1);

    let claimed = first.or(second).unwrap();
    assert!(claimed.processing_started_at.is_some());
}

#[tokio::test]
async fn test_freshly_claimed_job_is_not_reclaimable() {
    let repo = ScrapeJobRepositoryImpl::new(setup_db().await);

    let job = processing_job();
    repo.create(&job).await.unwrap();

    let threshold = Duration::minutes(10);
    assert!(repo.claim(job.id, threshold).await.unwrap().is_some());
    assert!(repo.claim(job.id, threshold).await.unwrap().is_none());
}

#[tokio::test]
async fn test_stale_claim_is_reclaimable() {
    let repo = ScrapeJobRepositoryImpl::new(setup_db().await);

    let mut job = processing_job();
    job.processing_started_at = Some((Utc::now() - Duration::minutes(20)).into());
    repo.create(&job).await.unwrap();

    let reclaimed = repo.claim(job.id, Duration::minutes(10)).await.unwrap();
    assert!(reclaimed.is_some());

    // The reclaim refreshed the claim timestamp
    let refreshed = reclaimed.unwrap().processing_started_at.unwrap();
    assert!(Utc::now().signed_duration_since(refreshed) < Duration::minutes(1));
}

#[tokio::test]
async fn test_terminal_job_is_not_claimable() {
    let repo = ScrapeJobRepositoryImpl::new(setup_db().await);

    let job = processing_job();
    repo.create(&job).await.unwrap();

    let completed = repo
        .find_by_id(job.id)
        .await
        .unwrap()
        .unwrap()
        .complete(vec![])
        .unwrap();
    repo.update(&completed).await.unwrap();

    assert!(repo
        .claim(job.id, Duration::minutes(10))
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_find_claimable_applies_predicate_and_limit() {
    let repo = ScrapeJobRepositoryImpl::new(setup_db().await);

    // Two never-claimed jobs, one stale, one fresh
    let a = processing_job();
    let b = processing_job();
    let mut stale = processing_job();
    stale.processing_started_at = Some((Utc::now() - Duration::minutes(30)).into());
    let mut fresh = processing_job();
    fresh.processing_started_at = Some(Utc::now().into());

    for job in [&a, &b, &stale, &fresh] {
        repo.create(job).await.unwrap();
    }

    let claimable = repo
        .find_claimable(Duration::minutes(5), 10)
        .await
        .unwrap();
    let ids: Vec<Uuid> = claimable.iter().map(|j| j.id).collect();

    assert_eq!(claimable.len(), 3);
    assert!(ids.contains(&a.id));
    assert!(ids.contains(&b.id));
    assert!(ids.contains(&stale.id));
    assert!(!ids.contains(&fresh.id));

    let limited = repo.find_claimable(Duration::minutes(5), 2).await.unwrap();
    assert_eq!(limited.len(), 2);
}

#[tokio::test]
async fn test_failed_job_persists_error_text() {
    let repo = ScrapeJobRepositoryImpl::new(setup_db().await);

    let job = processing_job();
    repo.create(&job).await.unwrap();

    let failed = repo
        .find_by_id(job.id)
        .await
        .unwrap()
        .unwrap()
        .fail("Scrape did not complete within 180 seconds".to_string())
        .unwrap();
    repo.update(&failed).await.unwrap();

    let found = repo.find_by_id(job.id).await.unwrap().unwrap();
    assert_eq!(found.status, ScrapeJobStatus::Failed);
    assert!(found.error.unwrap().contains("did not complete"));
}

#[tokio::test]
async fn test_find_latest_by_profile_orders_by_creation() {
    let repo = ScrapeJobRepositoryImpl::new(setup_db().await);

    let profile_id = Uuid::new_v4();
    let mut older = ScrapeJob::new(profile_id, "https://example.com".to_string(), "fc-1".to_string());
    older.created_at = (Utc::now() - Duration::hours(2)).into();
    let newer = ScrapeJob::new(profile_id, "https://example.com".to_string(), "fc-2".to_string());

    repo.create(&older).await.unwrap();
    repo.create(&newer).await.unwrap();

    let latest = repo.find_latest_by_profile(profile_id).await.unwrap().unwrap();
    assert_eq!(latest.id, newer.id);
}
