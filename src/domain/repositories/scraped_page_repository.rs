// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::scrape_job_repository::RepositoryError;
use crate::domain::models::scraped_page::ScrapedPage;
use async_trait::async_trait;
use uuid::Uuid;

/// 已抓取页面仓库特质
///
/// 定义已抓取页面数据访问接口
#[async_trait]
pub trait ScrapedPageRepository: Send + Sync {
    /// 批量幂等写入页面
    ///
    /// 以 (网站档案, URL) 为键，已存在的页面更新类型与原始数据，
    /// 返回写入后的页面记录（含已存在记录的ID）。
    async fn bulk_upsert(
        &self,
        pages: Vec<ScrapedPage>,
    ) -> Result<Vec<ScrapedPage>, RepositoryError>;

    /// 根据网站档案查找页面
    async fn find_by_profile(
        &self,
        website_profile_id: Uuid,
    ) -> Result<Vec<ScrapedPage>, RepositoryError>;
}
