// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// 抓取任务实体
///
/// 表示针对一个网站档案的一次供应商爬取尝试。任务在供应商接受
/// 爬取请求的瞬间以 `Processing` 状态创建，由生命周期服务独占驱动，
/// 最终进入 `Complete` 或 `Failed` 终态。重新抓取会创建新记录，
/// 终态记录不再发生任何状态转换。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeJob {
    /// 任务唯一标识符
    pub id: Uuid,
    /// 所属网站档案ID
    pub website_profile_id: Uuid,
    /// 目标域名
    pub domain: String,
    /// 任务状态
    pub status: ScrapeJobStatus,
    /// 供应商分配的任务令牌（供应商接受请求前为空）
    pub vendor_job_id: Option<String>,
    /// 认领时间戳，仅在被主动认领期间非空
    pub processing_started_at: Option<DateTime<FixedOffset>>,
    /// 结果页面引用列表，仅在任务完成时填充
    pub result_page_ids: Vec<Uuid>,
    /// 错误信息，仅在任务失败时非空
    pub error: Option<String>,
    /// 创建时间
    pub created_at: DateTime<FixedOffset>,
    /// 更新时间
    pub updated_at: DateTime<FixedOffset>,
}

/// 抓取任务状态枚举
///
/// 状态转换遵循以下流程：
/// Processing → Complete/Failed
/// （Pending 作为保留状态存在，当前创建路径在供应商接受后直接进入 Processing）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScrapeJobStatus {
    /// 已创建但供应商尚未接受（保留状态）
    #[default]
    Pending,
    /// 供应商爬取进行中
    Processing,
    /// 已完成，结果页面已入库
    Complete,
    /// 已失败，错误信息已记录
    Failed,
}

impl fmt::Display for ScrapeJobStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ScrapeJobStatus::Pending => write!(f, "pending"),
            ScrapeJobStatus::Processing => write!(f, "processing"),
            ScrapeJobStatus::Complete => write!(f, "complete"),
            ScrapeJobStatus::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for ScrapeJobStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ScrapeJobStatus::Pending),
            "processing" => Ok(ScrapeJobStatus::Processing),
            "complete" => Ok(ScrapeJobStatus::Complete),
            "failed" => Ok(ScrapeJobStatus::Failed),
            _ => Err(()),
        }
    }
}

/// 领域错误类型
#[derive(Error, Debug)]
pub enum DomainError {
    /// 无效的状态转换，当任务状态转换不符合业务规则时发生
    #[error("Invalid state transition")]
    InvalidStateTransition,
}

impl ScrapeJob {
    /// 创建一个新的抓取任务
    ///
    /// 供应商已接受爬取请求，任务直接以 `Processing` 状态创建。
    ///
    /// # 参数
    ///
    /// * `website_profile_id` - 所属网站档案ID
    /// * `domain` - 目标域名
    /// * `vendor_job_id` - 供应商分配的任务令牌
    ///
    /// # 返回值
    ///
    /// 返回新创建的任务实例
    pub fn new(website_profile_id: Uuid, domain: String, vendor_job_id: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            website_profile_id,
            domain,
            status: ScrapeJobStatus::Processing,
            vendor_job_id: Some(vendor_job_id),
            processing_started_at: None,
            result_page_ids: Vec::new(),
            error: None,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    /// 完成任务
    ///
    /// 将任务状态从Processing变更为Complete，并记录结果页面引用。
    /// 完成态不允许携带错误信息。
    ///
    /// # 返回值
    ///
    /// * `Ok(ScrapeJob)` - 成功完成的任务
    /// * `Err(DomainError)` - 状态转换失败
    pub fn complete(mut self, result_page_ids: Vec<Uuid>) -> Result<Self, DomainError> {
        match self.status {
            ScrapeJobStatus::Processing => {
                self.status = ScrapeJobStatus::Complete;
                self.result_page_ids = result_page_ids;
                self.error = None;
                self.updated_at = Utc::now().into();
                Ok(self)
            }
            _ => Err(DomainError::InvalidStateTransition),
        }
    }

    /// 标记任务失败
    ///
    /// 将任务状态从Processing变更为Failed并记录错误信息。
    /// 失败本身是一次成功的终态写入。
    ///
    /// # 返回值
    ///
    /// * `Ok(ScrapeJob)` - 失败的任务
    /// * `Err(DomainError)` - 状态转换失败
    pub fn fail(mut self, error: String) -> Result<Self, DomainError> {
        match self.status {
            ScrapeJobStatus::Pending | ScrapeJobStatus::Processing => {
                self.status = ScrapeJobStatus::Failed;
                self.error = Some(error);
                self.updated_at = Utc::now().into();
                Ok(self)
            }
            _ => Err(DomainError::InvalidStateTransition),
        }
    }

    /// 判断任务是否处于终态
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.status,
            ScrapeJobStatus::Complete | ScrapeJobStatus::Failed
        )
    }
}
