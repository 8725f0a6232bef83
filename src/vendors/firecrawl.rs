// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::settings::CrawlSettings;
use crate::vendors::traits::{
    CrawlClient, CrawlOptions, CrawlPage, CrawlStatus, CrawlStatusSnapshot, VendorError,
};

/// Firecrawl爬取供应商客户端
///
/// 通过供应商的异步爬取接口工作：POST /v1/crawl 发起任务并返回
/// 任务令牌，GET /v1/crawl/{id} 查询状态。
pub struct FirecrawlClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StartCrawlRequest<'a> {
    url: &'a str,
    max_depth: u32,
    limit: u32,
}

#[derive(Deserialize)]
struct StartCrawlResponse {
    success: bool,
    id: Option<String>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct CrawlStatusResponse {
    status: String,
    #[serde(default)]
    data: Vec<serde_json::Value>,
}

impl FirecrawlClient {
    pub fn new(settings: &CrawlSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
        }
    }
}

#[async_trait]
impl CrawlClient for FirecrawlClient {
    async fn start_crawl(
        &self,
        domain: &str,
        options: &CrawlOptions,
    ) -> Result<String, VendorError> {
        let url = format!("{}/v1/crawl", self.base_url);
        let body = StartCrawlRequest {
            url: domain,
            max_depth: options.max_depth,
            limit: options.limit,
        };

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(VendorError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: StartCrawlResponse = resp.json().await?;
        match (parsed.success, parsed.id) {
            (true, Some(id)) => {
                debug!(domain, job_id = %id, "Crawl accepted by vendor");
                Ok(id)
            }
            _ => Err(VendorError::Rejected(
                parsed
                    .error
                    .unwrap_or_else(|| "Unknown error".to_string()),
            )),
        }
    }

    async fn check_crawl_status(&self, job_id: &str) -> Result<CrawlStatusSnapshot, VendorError> {
        let url = format!("{}/v1/crawl/{}", self.base_url, job_id);
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(VendorError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: CrawlStatusResponse = resp.json().await?;
        let crawl_status = match parsed.status.as_str() {
            "completed" => CrawlStatus::Completed,
            "failed" => CrawlStatus::Failed,
            "cancelled" => CrawlStatus::Cancelled,
            "scraping" => CrawlStatus::Scraping,
            "pending" | "waiting" => CrawlStatus::Pending,
            other => {
                return Err(VendorError::InvalidResponse(format!(
                    "Unknown crawl status: {}",
                    other
                )))
            }
        };

        let pages = parsed
            .data
            .into_iter()
            .map(|raw| CrawlPage {
                url: raw
                    .get("metadata")
                    .and_then(|m| m.get("url"))
                    .and_then(|u| u.as_str())
                    .map(|u| u.to_string()),
                raw,
            })
            .collect();

        Ok(CrawlStatusSnapshot {
            status: crawl_status,
            pages,
        })
    }
}
