// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, instrument};
use uuid::Uuid;

use crate::domain::models::keyword::Keyword;
use crate::domain::models::website_profile::{KeywordRefs, ResolvedKeywords};
use crate::domain::repositories::keyword_repository::KeywordRepository;
use crate::domain::repositories::scrape_job_repository::RepositoryError;
use crate::domain::repositories::website_profile_repository::WebsiteProfileRepository;
use crate::domain::services::enrichment_service::EnrichmentService;
use crate::domain::services::relevancy_service::{RelevancyOutcome, RelevancyService};
use crate::vendors::traits::{BusinessContext, KeywordLookupClient, RelevancyClassifier};

/// 关键词工作流错误类型
#[derive(Error, Debug)]
pub enum KeywordWorkflowError {
    /// 网站档案不存在
    #[error("Website profile not found")]
    ProfileNotFound,

    /// 档案没有可用的种子关键词
    #[error("Website profile has no seed keywords")]
    MissingSeedKeywords,

    /// 仓库错误
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// 关键词工作流服务
///
/// 面向网站档案编排两级流水线并缓存结果：
/// 1. 校验阶段：种子关键词 → 富集流水线 → 按文本幂等入库 →
///    引用列表缓存到档案
/// 2. 相关性阶段：校验结果 → 相关性流水线 → 相关桶入库并缓存
///
/// 档案上已有缓存引用时直接经关键词仓库解析返回，不再触发
/// 昂贵的供应商调用。引用列表与解析后的记录是两个显式类型
/// （[`KeywordRefs`] / [`ResolvedKeywords`]）。
pub struct KeywordWorkflowService<L, C, K, W>
where
    L: KeywordLookupClient,
    C: RelevancyClassifier,
    K: KeywordRepository,
    W: WebsiteProfileRepository,
{
    enrichment: EnrichmentService<L>,
    relevancy: RelevancyService<C>,
    keyword_repo: Arc<K>,
    profile_repo: Arc<W>,
}

impl<L, C, K, W> KeywordWorkflowService<L, C, K, W>
where
    L: KeywordLookupClient,
    C: RelevancyClassifier,
    K: KeywordRepository,
    W: WebsiteProfileRepository,
{
    /// 创建新的工作流服务实例
    pub fn new(
        enrichment: EnrichmentService<L>,
        relevancy: RelevancyService<C>,
        keyword_repo: Arc<K>,
        profile_repo: Arc<W>,
    ) -> Self {
        Self {
            enrichment,
            relevancy,
            keyword_repo,
            profile_repo,
        }
    }

    /// 富集一批种子关键词（无档案缓存的即席路径）
    pub async fn enrich(&self, seeds: Vec<String>) -> Vec<Keyword> {
        self.enrichment.enrich(seeds).await
    }

    /// 相关性筛选一批关键词（无档案缓存的即席路径）
    pub async fn filter_relevant(
        &self,
        keywords: Vec<Keyword>,
        context: &BusinessContext,
    ) -> RelevancyOutcome {
        self.relevancy.filter_relevant(keywords, context).await
    }

    /// 生成或读取档案的校验阶段关键词
    #[instrument(skip(self), fields(profile_id = %website_profile_id))]
    pub async fn validated_keywords_for_profile(
        &self,
        website_profile_id: Uuid,
    ) -> Result<ResolvedKeywords, KeywordWorkflowError> {
        let profile = self
            .profile_repo
            .find_by_id(website_profile_id)
            .await?
            .ok_or(KeywordWorkflowError::ProfileNotFound)?;

        if !profile.validated_keyword_ids.is_empty() {
            debug!("Using cached validated keywords");
            return self.resolve(&profile.validated_keyword_ids).await;
        }

        if profile.seed_keywords.is_empty() {
            return Err(KeywordWorkflowError::MissingSeedKeywords);
        }

        let enriched = self.enrichment.enrich(profile.seed_keywords.clone()).await;
        let persisted = self.persist_keywords(enriched).await;
        let refs = KeywordRefs(persisted.iter().map(|kw| kw.id).collect());
        self.profile_repo
            .set_validated_keywords(website_profile_id, &refs)
            .await?;

        debug!(count = persisted.len(), "Validated keywords cached on profile");
        Ok(ResolvedKeywords(persisted))
    }

    /// 生成或读取档案的相关性阶段关键词
    #[instrument(skip(self), fields(profile_id = %website_profile_id))]
    pub async fn relevant_keywords_for_profile(
        &self,
        website_profile_id: Uuid,
    ) -> Result<ResolvedKeywords, KeywordWorkflowError> {
        let profile = self
            .profile_repo
            .find_by_id(website_profile_id)
            .await?
            .ok_or(KeywordWorkflowError::ProfileNotFound)?;

        if !profile.relevant_keyword_ids.is_empty() {
            debug!("Using cached relevant keywords");
            return self.resolve(&profile.relevant_keyword_ids).await;
        }

        let validated = self
            .validated_keywords_for_profile(website_profile_id)
            .await?;

        let context = BusinessContext {
            business_overview: profile.business_overview.clone().unwrap_or_default(),
            icps: profile.icps.clone(),
            domain: profile.domain.clone(),
        };
        let outcome = self
            .relevancy
            .filter_relevant(validated.into_inner(), &context)
            .await;

        let persisted = self.persist_keywords(outcome.relevant).await;
        let refs = KeywordRefs(persisted.iter().map(|kw| kw.id).collect());
        self.profile_repo
            .set_relevant_keywords(website_profile_id, &refs)
            .await?;

        debug!(count = persisted.len(), "Relevant keywords cached on profile");
        Ok(ResolvedKeywords(persisted))
    }

    /// 按文本幂等入库并收集持久化后的记录
    ///
    /// 单条写入失败只记录日志并继续处理其余条目。
    async fn persist_keywords(&self, keywords: Vec<Keyword>) -> Vec<Keyword> {
        let total = keywords.len();
        let mut persisted = Vec::with_capacity(total);

        for keyword in keywords {
            match self.keyword_repo.upsert_by_text(&keyword).await {
                Ok(saved) => persisted.push(saved),
                Err(err) => {
                    error!(keyword = %keyword.text, error = %err, "Failed to persist keyword");
                }
            }
        }

        debug!(persisted = persisted.len(), total, "Keywords persisted");
        persisted
    }

    /// 把引用列表解析为完整关键词记录
    async fn resolve(
        &self,
        refs: &KeywordRefs,
    ) -> Result<ResolvedKeywords, KeywordWorkflowError> {
        let keywords = self.keyword_repo.find_by_ids(&refs.0).await?;
        Ok(ResolvedKeywords(keywords))
    }
}

#[cfg(test)]
#[path = "keyword_workflow_service_test.rs"]
mod tests;
