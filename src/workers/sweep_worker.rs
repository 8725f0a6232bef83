// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::domain::repositories::scrape_job_repository::ScrapeJobRepository;
use crate::domain::repositories::scraped_page_repository::ScrapedPageRepository;
use crate::domain::repositories::website_profile_repository::WebsiteProfileRepository;
use crate::domain::services::scrape_job_service::ScrapeJobService;
use crate::utils::errors::WorkerError;
use crate::vendors::traits::CrawlClient;

/// 停滞任务巡检工作器
///
/// 定期查询可认领的抓取任务（从未认领，或认领时间早于巡检过期
/// 阈值），按批次上限逐个认领，并为每个任务派生独立的处理子任务。
/// 子任务各自捕获并记录失败，单个任务的异常永远不会中断巡检循环，
/// 也不会影响同批次的其他任务。
///
/// 巡检是从崩溃或挂起的轮询循环中恢复任务的唯一机制。
pub struct SweepWorker<C, J, P, W>
where
    C: CrawlClient + 'static,
    J: ScrapeJobRepository + 'static,
    P: ScrapedPageRepository + 'static,
    W: WebsiteProfileRepository + 'static,
{
    service: Arc<ScrapeJobService<C, J, P, W>>,
    interval: Duration,
}

impl<C, J, P, W> SweepWorker<C, J, P, W>
where
    C: CrawlClient + 'static,
    J: ScrapeJobRepository + 'static,
    P: ScrapedPageRepository + 'static,
    W: WebsiteProfileRepository + 'static,
{
    /// 创建新的巡检工作器实例
    pub fn new(service: Arc<ScrapeJobService<C, J, P, W>>, interval: Duration) -> Self {
        Self { service, interval }
    }

    /// 运行工作器
    pub async fn run(&self) {
        info!("Scrape job sweep worker started");

        let mut interval = tokio::time::interval(self.interval);

        loop {
            interval.tick().await;

            match self.sweep_once().await {
                Ok(count) => {
                    if count > 0 {
                        info!("Sweep reclaimed {} stalled scrape jobs", count);
                    }
                }
                Err(e) => {
                    error!("Sweep tick failed: {}", e);
                }
            }
        }
    }

    /// 启动后台运行
    pub fn start(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.run().await;
        })
    }

    /// 执行一次巡检
    ///
    /// # 返回值
    ///
    /// 返回本次派生处理的任务数量
    pub async fn sweep_once(&self) -> Result<u64, WorkerError> {
        let jobs = self
            .service
            .find_sweepable()
            .await
            .map_err(|e| WorkerError::ServiceError(e.to_string()))?;

        let count = jobs.len() as u64;
        for job in jobs {
            let service = self.service.clone();
            let job_id = job.id;

            // Fire-and-forget: one task per job, failures stay inside the task
            tokio::spawn(async move {
                match service.reclaim_and_process(job_id).await {
                    Ok(Some(finished)) => {
                        debug!(job_id = %job_id, status = %finished.status, "Swept job finished");
                    }
                    Ok(None) => {
                        debug!(job_id = %job_id, "Job claimed elsewhere before sweep task ran");
                    }
                    Err(e) => {
                        error!(job_id = %job_id, error = %e, "Swept job processing failed");
                    }
                }
            });
        }

        Ok(count)
    }
}

#[cfg(test)]
#[path = "sweep_worker_test.rs"]
mod tests;
