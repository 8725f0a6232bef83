// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use thiserror::Error;

/// 供应商错误类型
#[derive(Error, Debug)]
pub enum VendorError {
    /// 请求失败
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 供应商拒绝请求
    #[error("Vendor rejected request: {0}")]
    Rejected(String),
    /// 供应商返回非成功状态码
    #[error("Vendor API error ({status}): {message}")]
    Api { status: u16, message: String },
    /// 响应格式不符合预期
    #[error("Invalid vendor response: {0}")]
    InvalidResponse(String),
}

/// 爬取任务状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlStatus {
    /// 排队中
    Pending,
    /// 爬取进行中
    Scraping,
    /// 已完成
    Completed,
    /// 已失败
    Failed,
    /// 已取消
    Cancelled,
}

/// 爬取任务状态快照
#[derive(Debug, Clone)]
pub struct CrawlStatusSnapshot {
    /// 当前状态
    pub status: CrawlStatus,
    /// 已完成时的结果页面（非完成态为空）
    pub pages: Vec<CrawlPage>,
}

/// 供应商返回的单个结果页面
#[derive(Debug, Clone)]
pub struct CrawlPage {
    /// 页面URL（缺失URL的页面会被忽略）
    pub url: Option<String>,
    /// 供应商原始页面负载
    pub raw: serde_json::Value,
}

/// 爬取请求选项
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// 最大深度
    pub max_depth: u32,
    /// 页面数上限
    pub limit: u32,
}

/// 爬取供应商客户端特质
///
/// 封装供应商拥有的异步爬取操作：发起爬取后立即返回任务令牌，
/// 之后通过轮询查询状态。传输细节由具体实现负责。
#[async_trait]
pub trait CrawlClient: Send + Sync {
    /// 发起爬取任务
    ///
    /// # 返回值
    ///
    /// * `Ok(String)` - 供应商分配的任务令牌
    /// * `Err(VendorError)` - 供应商拒绝请求或传输失败
    async fn start_crawl(&self, domain: &str, options: &CrawlOptions)
        -> Result<String, VendorError>;

    /// 查询爬取任务状态
    async fn check_crawl_status(&self, job_id: &str)
        -> Result<CrawlStatusSnapshot, VendorError>;
}

/// 供应商返回的关键词建议条目
#[derive(Debug, Clone)]
pub struct KeywordSuggestion {
    /// 关键词文本
    pub keyword: String,
    /// 原始搜索量字符串（如 "1.2k"、"<500"）
    pub volume: Option<String>,
    /// 原始难度标签（如 "Easy"、"Hard"）
    pub difficulty: Option<String>,
    /// 供应商侧最后更新时间
    pub last_updated: Option<DateTime<FixedOffset>>,
    /// 供应商原始条目负载
    pub raw: serde_json::Value,
}

/// 关键词建议供应商客户端特质
///
/// 单个种子关键词可合法展开为多个建议条目。
#[async_trait]
pub trait KeywordLookupClient: Send + Sync {
    /// 查询种子关键词的建议列表
    async fn lookup(&self, seed_keyword: &str) -> Result<Vec<KeywordSuggestion>, VendorError>;
}

/// 相关性分类上下文
#[derive(Debug, Clone, Default)]
pub struct BusinessContext {
    /// 业务概述
    pub business_overview: String,
    /// 理想客户画像列表
    pub icps: Vec<String>,
    /// 网站域名
    pub domain: String,
}

/// 分类器返回的分类结果
#[derive(Debug, Clone, Default)]
pub struct Classification {
    /// 判定为相关的关键词文本
    pub relevant: Vec<String>,
    /// 判定为不相关的关键词文本
    pub irrelevant: Vec<String>,
}

/// 相关性分类器特质
///
/// 对一批关键词文本做业务相关性二分类。分类器可能遗漏或
/// 改写输入条目，调用方负责对账。
#[async_trait]
pub trait RelevancyClassifier: Send + Sync {
    /// 对一批关键词做相关性分类
    async fn classify(
        &self,
        keywords: &[String],
        context: &BusinessContext,
    ) -> Result<Classification, VendorError>;
}
