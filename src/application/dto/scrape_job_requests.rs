// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::models::scrape_job::{ScrapeJob, ScrapeJobStatus};

/// 创建抓取任务请求数据传输对象
#[derive(Debug, Deserialize, Serialize)]
pub struct CreateScrapeJobDto {
    /// 目标网站档案ID
    pub website_profile_id: Uuid,
}

/// 抓取任务响应数据传输对象
#[derive(Debug, Deserialize, Serialize)]
pub struct ScrapeJobDto {
    /// 任务ID
    pub id: Uuid,
    /// 所属网站档案ID
    pub website_profile_id: Uuid,
    /// 目标域名
    pub domain: String,
    /// 任务状态
    pub status: ScrapeJobStatus,
    /// 供应商任务令牌
    pub vendor_job_id: Option<String>,
    /// 结果页面引用
    pub result_page_ids: Vec<Uuid>,
    /// 错误信息（仅失败时）
    pub error: Option<String>,
    /// 创建时间
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
    /// 更新时间
    pub updated_at: chrono::DateTime<chrono::FixedOffset>,
}

impl From<ScrapeJob> for ScrapeJobDto {
    fn from(job: ScrapeJob) -> Self {
        Self {
            id: job.id,
            website_profile_id: job.website_profile_id,
            domain: job.domain,
            status: job.status,
            vendor_job_id: job.vendor_job_id,
            result_page_ids: job.result_page_ids,
            error: job.error,
            created_at: job.created_at,
            updated_at: job.updated_at,
        }
    }
}
