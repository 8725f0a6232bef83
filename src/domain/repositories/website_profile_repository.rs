// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::scrape_job_repository::RepositoryError;
use crate::domain::models::website_profile::{KeywordRefs, WebsiteProfile};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use uuid::Uuid;

/// 网站档案仓库特质
///
/// 定义网站档案数据访问接口，包括关键词流水线各阶段
/// 结果引用的缓存写入。
#[async_trait]
pub trait WebsiteProfileRepository: Send + Sync {
    /// 创建档案
    async fn create(&self, profile: &WebsiteProfile) -> Result<WebsiteProfile, RepositoryError>;

    /// 根据ID查找档案
    async fn find_by_id(&self, id: Uuid) -> Result<Option<WebsiteProfile>, RepositoryError>;

    /// 更新校验阶段关键词引用缓存
    async fn set_validated_keywords(
        &self,
        id: Uuid,
        refs: &KeywordRefs,
    ) -> Result<(), RepositoryError>;

    /// 更新相关性阶段关键词引用缓存
    async fn set_relevant_keywords(
        &self,
        id: Uuid,
        refs: &KeywordRefs,
    ) -> Result<(), RepositoryError>;

    /// 记录最近一次发起抓取的时间
    async fn set_last_scraped_at(
        &self,
        id: Uuid,
        at: DateTime<FixedOffset>,
    ) -> Result<(), RepositoryError>;
}
