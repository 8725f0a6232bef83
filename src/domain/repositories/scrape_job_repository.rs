// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::scrape_job::ScrapeJob;
use async_trait::async_trait;
use chrono::Duration;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    /// 记录未找到
    #[error("Record not found")]
    NotFound,
}

/// 抓取任务仓库特质
///
/// 定义抓取任务数据访问接口。认领操作依赖数据库的条件更新
/// 作为唯一同步原语：同一任务在一个过期窗口内至多被认领一次，
/// 跨进程实例同样成立，不依赖任何进程内锁。
#[async_trait]
pub trait ScrapeJobRepository: Send + Sync {
    /// 创建新任务
    async fn create(&self, job: &ScrapeJob) -> Result<ScrapeJob, RepositoryError>;

    /// 根据ID查找任务
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ScrapeJob>, RepositoryError>;

    /// 查找某网站档案最近创建的任务
    async fn find_latest_by_profile(
        &self,
        website_profile_id: Uuid,
    ) -> Result<Option<ScrapeJob>, RepositoryError>;

    /// 更新任务
    async fn update(&self, job: &ScrapeJob) -> Result<ScrapeJob, RepositoryError>;

    /// 原子认领任务
    ///
    /// 在单次条件更新中选中满足
    /// `status = processing AND (processing_started_at IS NULL OR
    /// processing_started_at < now - stale_threshold)` 的目标任务，
    /// 并把 `processing_started_at` 置为当前时间。
    ///
    /// # 返回值
    ///
    /// * `Ok(Some(ScrapeJob))` - 认领成功，返回认领后的任务
    /// * `Ok(None)` - 任务已被其他调用方新鲜认领或不可认领，无操作
    async fn claim(
        &self,
        id: Uuid,
        stale_threshold: Duration,
    ) -> Result<Option<ScrapeJob>, RepositoryError>;

    /// 查找可认领的任务
    ///
    /// 使用与 [`claim`](Self::claim) 相同的可认领谓词，供巡检批量回收
    /// 停滞任务使用。
    async fn find_claimable(
        &self,
        stale_threshold: Duration,
        limit: u64,
    ) -> Result<Vec<ScrapeJob>, RepositoryError>;
}
