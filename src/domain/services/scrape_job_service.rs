// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use thiserror::Error;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::config::settings::{CrawlSettings, LifecycleSettings};
use crate::domain::models::scrape_job::{DomainError, ScrapeJob};
use crate::domain::models::scraped_page::ScrapedPage;
use crate::domain::repositories::scrape_job_repository::{RepositoryError, ScrapeJobRepository};
use crate::domain::repositories::scraped_page_repository::ScrapedPageRepository;
use crate::domain::repositories::website_profile_repository::WebsiteProfileRepository;
use crate::domain::services::page_classifier::classify_url;
use crate::vendors::traits::{CrawlClient, CrawlOptions, CrawlPage, CrawlStatus};

/// 抓取任务生命周期错误类型
#[derive(Error, Debug)]
pub enum ScrapeJobError {
    /// 网站档案不存在
    #[error("Website profile not found")]
    ProfileNotFound,

    /// 抓取任务不存在
    #[error("Scrape job not found")]
    JobNotFound,

    /// 供应商拒绝爬取请求，任务未创建
    #[error("Failed to start scrape: {0}")]
    VendorRejected(String),

    /// 仓库错误
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// 领域状态转换错误
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}

/// 抓取任务生命周期服务
///
/// 独占驱动 ScrapeJob 状态机：创建、原子认领、对供应商的轮询循环、
/// 完成/失败终态写入。认领依赖仓库的条件更新：同一任务在一个过期
/// 窗口内至多有一条"轮询-终态"序列在运行，并发触发下亦然。
///
/// 供应商侧的失败（拒绝除外）一律落到任务记录的 `Failed` 终态上，
/// 不向巡检边界之外抛出。
pub struct ScrapeJobService<C, J, P, W>
where
    C: CrawlClient,
    J: ScrapeJobRepository,
    P: ScrapedPageRepository,
    W: WebsiteProfileRepository,
{
    crawl_client: Arc<C>,
    job_repo: Arc<J>,
    page_repo: Arc<P>,
    profile_repo: Arc<W>,
    crawl_settings: CrawlSettings,
    lifecycle: LifecycleSettings,
}

impl<C, J, P, W> ScrapeJobService<C, J, P, W>
where
    C: CrawlClient,
    J: ScrapeJobRepository,
    P: ScrapedPageRepository,
    W: WebsiteProfileRepository,
{
    /// 创建新的生命周期服务实例
    pub fn new(
        crawl_client: Arc<C>,
        job_repo: Arc<J>,
        page_repo: Arc<P>,
        profile_repo: Arc<W>,
        crawl_settings: CrawlSettings,
        lifecycle: LifecycleSettings,
    ) -> Self {
        Self {
            crawl_client,
            job_repo,
            page_repo,
            profile_repo,
            crawl_settings,
            lifecycle,
        }
    }

    /// 创建抓取任务
    ///
    /// 先请求供应商发起爬取：供应商拒绝时不落任何记录，错误同步
    /// 返回给调用方；接受后以 `Processing` 状态持久化任务。
    #[instrument(skip(self), fields(profile_id = %website_profile_id))]
    pub async fn create_job(
        &self,
        website_profile_id: Uuid,
    ) -> Result<ScrapeJob, ScrapeJobError> {
        let profile = self
            .profile_repo
            .find_by_id(website_profile_id)
            .await?
            .ok_or(ScrapeJobError::ProfileNotFound)?;

        let options = CrawlOptions {
            max_depth: self.crawl_settings.max_depth,
            limit: self.crawl_settings.page_limit,
        };
        let vendor_job_id = self
            .crawl_client
            .start_crawl(&profile.domain, &options)
            .await
            .map_err(|e| ScrapeJobError::VendorRejected(e.to_string()))?;

        let job = ScrapeJob::new(website_profile_id, profile.domain.clone(), vendor_job_id);
        let created = self.job_repo.create(&job).await?;
        self.profile_repo
            .set_last_scraped_at(website_profile_id, Utc::now().into())
            .await?;

        info!(job_id = %created.id, domain = %created.domain, "Scrape job created");
        Ok(created)
    }

    /// 查询任务状态
    pub async fn get_job(&self, job_id: Uuid) -> Result<ScrapeJob, ScrapeJobError> {
        self.job_repo
            .find_by_id(job_id)
            .await?
            .ok_or(ScrapeJobError::JobNotFound)
    }

    /// 查询某网站档案最近创建的任务
    pub async fn latest_job_for_profile(
        &self,
        website_profile_id: Uuid,
    ) -> Result<ScrapeJob, ScrapeJobError> {
        self.job_repo
            .find_latest_by_profile(website_profile_id)
            .await?
            .ok_or(ScrapeJobError::JobNotFound)
    }

    /// 认领并处理任务（幂等保护）
    ///
    /// 认领失败（已被并发调用方新鲜认领或不可认领）时静默返回
    /// `Ok(None)`，不报错。
    #[instrument(skip(self), fields(job_id = %job_id))]
    pub async fn claim_and_process(
        &self,
        job_id: Uuid,
    ) -> Result<Option<ScrapeJob>, ScrapeJobError> {
        let threshold = chrono::Duration::minutes(self.lifecycle.claim_stale_minutes);
        let claimed = match self.job_repo.claim(job_id, threshold).await? {
            Some(job) => job,
            None => {
                info!("Job not claimable, skipping");
                return Ok(None);
            }
        };

        let finished = self.process(claimed).await?;
        Ok(Some(finished))
    }

    /// 以巡检过期阈值认领并处理任务
    ///
    /// 供巡检工作器使用：阈值独立于即席认领路径配置。
    pub async fn reclaim_and_process(
        &self,
        job_id: Uuid,
    ) -> Result<Option<ScrapeJob>, ScrapeJobError> {
        let threshold = chrono::Duration::minutes(self.lifecycle.sweep_stale_minutes);
        let claimed = match self.job_repo.claim(job_id, threshold).await? {
            Some(job) => job,
            None => return Ok(None),
        };

        let finished = self.process(claimed).await?;
        Ok(Some(finished))
    }

    /// 驱动已认领的任务到终态
    ///
    /// 轮询结果决定走完成还是失败的终态写入；失败终态写入本身
    /// 是一次成功操作，只有仓库错误才会从这里返回。
    #[instrument(skip(self, job), fields(job_id = %job.id, domain = %job.domain))]
    pub async fn process(&self, job: ScrapeJob) -> Result<ScrapeJob, ScrapeJobError> {
        match self.poll_until_terminal(&job).await {
            Ok(pages) => self.finalize_complete(job, pages).await,
            Err(reason) => self.finalize_failed(job, reason).await,
        }
    }

    /// 轮询供应商直到任务终态或超时
    ///
    /// 固定间隔查询供应商状态；供应商报告失败/取消、状态查询
    /// 传输失败以及墙钟超时都作为流水线失败返回。
    async fn poll_until_terminal(&self, job: &ScrapeJob) -> Result<Vec<CrawlPage>, String> {
        let vendor_job_id = job
            .vendor_job_id
            .as_deref()
            .ok_or_else(|| "Job has no vendor token".to_string())?;

        let interval = Duration::from_secs(self.crawl_settings.poll_interval_secs);
        let deadline = tokio::time::Instant::now()
            + Duration::from_secs(self.crawl_settings.poll_timeout_secs);

        loop {
            if tokio::time::Instant::now() >= deadline {
                return Err(format!(
                    "Scrape did not complete within {} seconds",
                    self.crawl_settings.poll_timeout_secs
                ));
            }

            match self.crawl_client.check_crawl_status(vendor_job_id).await {
                Ok(snapshot) => match snapshot.status {
                    CrawlStatus::Completed => return Ok(snapshot.pages),
                    CrawlStatus::Failed | CrawlStatus::Cancelled => {
                        return Err("Scrape error: job failed or cancelled".to_string());
                    }
                    CrawlStatus::Pending | CrawlStatus::Scraping => {}
                },
                Err(err) => {
                    return Err(format!("Failed to check crawl status: {}", err));
                }
            }

            tokio::time::sleep(interval).await;
        }
    }

    /// 完成终态写入
    ///
    /// 零结果页面直接以空列表完成；否则先把页面按URL分类入库，
    /// 再把得到的页面引用写到任务上。
    async fn finalize_complete(
        &self,
        job: ScrapeJob,
        pages: Vec<CrawlPage>,
    ) -> Result<ScrapeJob, ScrapeJobError> {
        if pages.is_empty() {
            warn!(domain = %job.domain, "No pages found in scrape result");
            let completed = job.complete(Vec::new())?;
            let updated = self.job_repo.update(&completed).await?;
            metrics::counter!("scrape_jobs_completed_total").increment(1);
            return Ok(updated);
        }

        let profile_id = job.website_profile_id;
        let to_ingest: Vec<ScrapedPage> = pages
            .into_iter()
            .filter_map(|page| {
                page.url.map(|url| {
                    let page_type = classify_url(&url);
                    ScrapedPage::new(profile_id, url, page_type, page.raw)
                })
            })
            .collect();

        info!(count = to_ingest.len(), "Ingesting scraped pages");
        let saved = self.page_repo.bulk_upsert(to_ingest).await?;
        let page_ids: Vec<Uuid> = saved.iter().map(|p| p.id).collect();

        let completed = job.complete(page_ids)?;
        let updated = self.job_repo.update(&completed).await?;
        metrics::counter!("scrape_jobs_completed_total").increment(1);
        info!(pages = saved.len(), "Scrape job completed");
        Ok(updated)
    }

    /// 失败终态写入
    async fn finalize_failed(
        &self,
        job: ScrapeJob,
        reason: String,
    ) -> Result<ScrapeJob, ScrapeJobError> {
        warn!(reason = %reason, "Scrape job failed");
        let failed = job.fail(reason)?;
        let updated = self.job_repo.update(&failed).await?;
        metrics::counter!("scrape_jobs_failed_total").increment(1);
        Ok(updated)
    }

    /// 同步抓取工作流（简化变体）
    ///
    /// 创建任务后原地认领并等待其终态，返回终态任务。
    /// 供需要同步语义的调用方使用，常规路径由巡检驱动。
    pub async fn scrape_website_workflow(
        &self,
        website_profile_id: Uuid,
    ) -> Result<ScrapeJob, ScrapeJobError> {
        let job = self.create_job(website_profile_id).await?;

        match self.claim_and_process(job.id).await? {
            Some(finished) => Ok(finished),
            // Claimed by a concurrent sweep tick between create and claim;
            // report the record as it stands
            None => self.get_job(job.id).await,
        }
    }

    /// 查找可被巡检回收的任务
    pub async fn find_sweepable(&self) -> Result<Vec<ScrapeJob>, ScrapeJobError> {
        let threshold = chrono::Duration::minutes(self.lifecycle.sweep_stale_minutes);
        let jobs = self
            .job_repo
            .find_claimable(threshold, self.lifecycle.sweep_batch_size)
            .await?;
        Ok(jobs)
    }
}

#[cfg(test)]
#[path = "scrape_job_service_test.rs"]
mod tests;
