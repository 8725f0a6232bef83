#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::{DateTime, FixedOffset, Utc};
    use sea_orm::DbErr;
    use uuid::Uuid;

    use crate::config::settings::{CrawlSettings, LifecycleSettings};
    use crate::domain::models::scrape_job::{ScrapeJob, ScrapeJobStatus};
    use crate::domain::models::scraped_page::ScrapedPage;
    use crate::domain::models::website_profile::{KeywordRefs, WebsiteProfile};
    use crate::domain::repositories::scrape_job_repository::{
        RepositoryError, ScrapeJobRepository,
    };
    use crate::domain::repositories::scraped_page_repository::ScrapedPageRepository;
    use crate::domain::repositories::website_profile_repository::WebsiteProfileRepository;
    use crate::domain::services::scrape_job_service::ScrapeJobService;
    use crate::vendors::traits::{
        CrawlClient, CrawlOptions, CrawlStatus, CrawlStatusSnapshot, VendorError,
    };
    use crate::workers::sweep_worker::SweepWorker;

    // --- In-memory collaborators ---

    /// 立即完成所有任务的爬取客户端
    struct InstantCrawl;

    #[async_trait]
    impl CrawlClient for InstantCrawl {
        async fn start_crawl(
            &self,
            _domain: &str,
            _options: &CrawlOptions,
        ) -> Result<String, VendorError> {
            Ok("vendor-job".to_string())
        }

        async fn check_crawl_status(
            &self,
            _job_id: &str,
        ) -> Result<CrawlStatusSnapshot, VendorError> {
            Ok(CrawlStatusSnapshot {
                status: CrawlStatus::Completed,
                pages: Vec::new(),
            })
        }
    }

    /// 内存任务仓库，认领谓词与生产实现一致；
    /// 可配置单个任务的终态写入失败，用于验证隔离性
    #[derive(Default)]
    struct InMemoryJobRepo {
        jobs: Mutex<HashMap<Uuid, ScrapeJob>>,
        fail_update_for: Mutex<Option<Uuid>>,
    }

    impl InMemoryJobRepo {
        fn insert(&self, job: ScrapeJob) {
            self.jobs.lock().unwrap().insert(job.id, job);
        }

        fn status_of(&self, id: Uuid) -> Option<ScrapeJobStatus> {
            self.jobs.lock().unwrap().get(&id).map(|j| j.status)
        }
    }

    #[async_trait]
    impl ScrapeJobRepository for InMemoryJobRepo {
        async fn create(&self, job: &ScrapeJob) -> Result<ScrapeJob, RepositoryError> {
            self.insert(job.clone());
            Ok(job.clone())
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<ScrapeJob>, RepositoryError> {
            Ok(self.jobs.lock().unwrap().get(&id).cloned())
        }

        async fn find_latest_by_profile(
            &self,
            website_profile_id: Uuid,
        ) -> Result<Option<ScrapeJob>, RepositoryError> {
            Ok(self
                .jobs
                .lock()
                .unwrap()
                .values()
                .filter(|j| j.website_profile_id == website_profile_id)
                .max_by_key(|j| j.created_at)
                .cloned())
        }

        async fn update(&self, job: &ScrapeJob) -> Result<ScrapeJob, RepositoryError> {
            if *self.fail_update_for.lock().unwrap() == Some(job.id) {
                return Err(RepositoryError::Database(DbErr::Custom(
                    "simulated write failure".to_string(),
                )));
            }
            self.insert(job.clone());
            Ok(job.clone())
        }

        async fn claim(
            &self,
            id: Uuid,
            stale_threshold: chrono::Duration,
        ) -> Result<Option<ScrapeJob>, RepositoryError> {
            let cutoff: DateTime<FixedOffset> = (Utc::now() - stale_threshold).into();
            let mut jobs = self.jobs.lock().unwrap();

            let Some(job) = jobs.get_mut(&id) else {
                return Ok(None);
            };
            let claimable = job.status == ScrapeJobStatus::Processing
                && job.processing_started_at.is_none_or(|t| t < cutoff);

            if claimable {
                job.processing_started_at = Some(Utc::now().into());
                Ok(Some(job.clone()))
            } else {
                Ok(None)
            }
        }

        async fn find_claimable(
            &self,
            stale_threshold: chrono::Duration,
            limit: u64,
        ) -> Result<Vec<ScrapeJob>, RepositoryError> {
            let cutoff: DateTime<FixedOffset> = (Utc::now() - stale_threshold).into();
            let jobs = self.jobs.lock().unwrap();

            Ok(jobs
                .values()
                .filter(|j| {
                    j.status == ScrapeJobStatus::Processing
                        && j.processing_started_at.is_none_or(|t| t < cutoff)
                })
                .take(limit as usize)
                .cloned()
                .collect())
        }
    }

    struct NoopPageRepo;

    #[async_trait]
    impl ScrapedPageRepository for NoopPageRepo {
        async fn bulk_upsert(
            &self,
            pages: Vec<ScrapedPage>,
        ) -> Result<Vec<ScrapedPage>, RepositoryError> {
            Ok(pages)
        }

        async fn find_by_profile(
            &self,
            _website_profile_id: Uuid,
        ) -> Result<Vec<ScrapedPage>, RepositoryError> {
            Ok(Vec::new())
        }
    }

    struct NoopProfileRepo;

    #[async_trait]
    impl WebsiteProfileRepository for NoopProfileRepo {
        async fn create(
            &self,
            profile: &WebsiteProfile,
        ) -> Result<WebsiteProfile, RepositoryError> {
            Ok(profile.clone())
        }

        async fn find_by_id(&self, _id: Uuid) -> Result<Option<WebsiteProfile>, RepositoryError> {
            Ok(None)
        }

        async fn set_validated_keywords(
            &self,
            _id: Uuid,
            _refs: &KeywordRefs,
        ) -> Result<(), RepositoryError> {
            Ok(())
        }

        async fn set_relevant_keywords(
            &self,
            _id: Uuid,
            _refs: &KeywordRefs,
        ) -> Result<(), RepositoryError> {
            Ok(())
        }

        async fn set_last_scraped_at(
            &self,
            _id: Uuid,
            _at: DateTime<FixedOffset>,
        ) -> Result<(), RepositoryError> {
            Ok(())
        }
    }

    // --- Helpers ---

    fn worker_for(
        repo: Arc<InMemoryJobRepo>,
    ) -> SweepWorker<InstantCrawl, InMemoryJobRepo, NoopPageRepo, NoopProfileRepo> {
        let service = Arc::new(ScrapeJobService::new(
            Arc::new(InstantCrawl),
            repo,
            Arc::new(NoopPageRepo),
            Arc::new(NoopProfileRepo),
            CrawlSettings {
                base_url: "http://localhost".to_string(),
                api_key: "key".to_string(),
                max_depth: 3,
                page_limit: 25,
                poll_interval_secs: 1,
                poll_timeout_secs: 30,
            },
            LifecycleSettings {
                claim_stale_minutes: 10,
                sweep_stale_minutes: 5,
                sweep_interval_secs: 20,
                sweep_batch_size: 5,
            },
        ));

        SweepWorker::new(service, Duration::from_secs(20))
    }

    fn stalled_job() -> ScrapeJob {
        // Claimed 20 minutes ago, well past the 5 minute sweep threshold
        let mut job = ScrapeJob::new(
            Uuid::new_v4(),
            "https://example.com".to_string(),
            "fc-stale".to_string(),
        );
        job.processing_started_at = Some((Utc::now() - chrono::Duration::minutes(20)).into());
        job
    }

    async fn wait_for_spawned_tasks() {
        tokio::time::sleep(Duration::from_millis(200)).await;
    }

    // --- Tests ---

    #[tokio::test]
    async fn test_sweep_reclaims_stalled_and_unclaimed_jobs() {
        let repo = Arc::new(InMemoryJobRepo::default());

        let never_claimed = ScrapeJob::new(
            Uuid::new_v4(),
            "https://example.com".to_string(),
            "fc-new".to_string(),
        );
        let stalled = stalled_job();
        repo.insert(never_claimed.clone());
        repo.insert(stalled.clone());

        let worker = worker_for(repo.clone());
        let swept = worker.sweep_once().await.unwrap();
        assert_eq!(swept, 2);

        wait_for_spawned_tasks().await;
        assert_eq!(
            repo.status_of(never_claimed.id),
            Some(ScrapeJobStatus::Complete)
        );
        assert_eq!(repo.status_of(stalled.id), Some(ScrapeJobStatus::Complete));
    }

    #[tokio::test]
    async fn test_sweep_skips_freshly_claimed_jobs() {
        let repo = Arc::new(InMemoryJobRepo::default());

        let mut fresh = ScrapeJob::new(
            Uuid::new_v4(),
            "https://example.com".to_string(),
            "fc-fresh".to_string(),
        );
        fresh.processing_started_at = Some(Utc::now().into());
        repo.insert(fresh.clone());

        let worker = worker_for(repo.clone());
        let swept = worker.sweep_once().await.unwrap();

        assert_eq!(swept, 0);
        assert_eq!(
            repo.status_of(fresh.id),
            Some(ScrapeJobStatus::Processing)
        );
    }

    #[tokio::test]
    async fn test_one_failing_job_does_not_disturb_the_batch() {
        let repo = Arc::new(InMemoryJobRepo::default());

        let poisoned = stalled_job();
        let healthy = stalled_job();
        repo.insert(poisoned.clone());
        repo.insert(healthy.clone());
        *repo.fail_update_for.lock().unwrap() = Some(poisoned.id);

        let worker = worker_for(repo.clone());
        let swept = worker.sweep_once().await.unwrap();
        assert_eq!(swept, 2);

        wait_for_spawned_tasks().await;
        // The healthy job finishes despite its sibling's terminal write failing
        assert_eq!(repo.status_of(healthy.id), Some(ScrapeJobStatus::Complete));
        assert_eq!(
            repo.status_of(poisoned.id),
            Some(ScrapeJobStatus::Processing)
        );
    }
}
