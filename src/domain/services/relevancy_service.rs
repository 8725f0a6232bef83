// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, instrument, warn};

use crate::domain::models::keyword::Keyword;
use crate::domain::services::keyword_scorer::sort_keywords_by_score;
use crate::vendors::traits::{BusinessContext, RelevancyClassifier};

/// 相关性筛选结果
#[derive(Debug, Default)]
pub struct RelevancyOutcome {
    /// 判定为相关的关键词，已按分层得分降序排序
    pub relevant: Vec<Keyword>,
    /// 判定为不相关的关键词
    pub irrelevant: Vec<Keyword>,
}

/// 相关性对账流水线
///
/// 将关键词集合切为固定大小的批次并发提交给分类器，再以分类器
/// 返回的文本列表为成员集合对账每个原始输入条目：
/// - 出现在相关列表 → 相关桶
/// - 出现在不相关列表 → 不相关桶
/// - 两个列表都未出现 → 记录告警，从两个桶中同时排除
///
/// 单批分类调用失败时放行整批（全部视为相关）：宁可多保留数据，
/// 也不让一次上游失败悄悄丢弃关键词。
pub struct RelevancyService<C: RelevancyClassifier> {
    classifier: Arc<C>,
    batch_size: usize,
}

impl<C: RelevancyClassifier> RelevancyService<C> {
    /// 创建新的相关性流水线实例
    pub fn new(classifier: Arc<C>, batch_size: usize) -> Self {
        Self {
            classifier,
            batch_size: batch_size.max(1),
        }
    }

    /// 按业务上下文筛选相关关键词
    #[instrument(skip(self, keywords, context), fields(keyword_count = keywords.len()))]
    pub async fn filter_relevant(
        &self,
        keywords: Vec<Keyword>,
        context: &BusinessContext,
    ) -> RelevancyOutcome {
        if keywords.is_empty() {
            warn!("No keywords provided for relevancy filtering");
            return RelevancyOutcome::default();
        }

        let total = keywords.len();
        let batches: Vec<Vec<Keyword>> = keywords
            .chunks(self.batch_size)
            .map(|chunk| chunk.to_vec())
            .collect();
        debug!(
            batches = batches.len(),
            batch_size = self.batch_size,
            "Submitting keyword batches for relevancy classification"
        );

        let futures = batches
            .into_iter()
            .enumerate()
            .map(|(index, batch)| self.process_batch(batch, context, index + 1));
        let results = join_all(futures).await;

        let mut relevant = Vec::new();
        let mut irrelevant = Vec::new();
        for (batch_relevant, batch_irrelevant) in results {
            relevant.extend(batch_relevant);
            irrelevant.extend(batch_irrelevant);
        }

        debug!(
            relevant = relevant.len(),
            irrelevant = irrelevant.len(),
            total,
            "Relevancy filtering completed"
        );

        RelevancyOutcome {
            relevant: sort_keywords_by_score(relevant),
            irrelevant,
        }
    }

    /// 处理单个批次并对账分类结果
    async fn process_batch(
        &self,
        batch: Vec<Keyword>,
        context: &BusinessContext,
        batch_number: usize,
    ) -> (Vec<Keyword>, Vec<Keyword>) {
        let texts: Vec<String> = batch.iter().map(|kw| kw.text.clone()).collect();

        let classification = match self.classifier.classify(&texts, context).await {
            Ok(classification) => classification,
            Err(err) => {
                // Fail open: a classifier failure must never discard keywords
                warn!(
                    batch = batch_number,
                    error = %err,
                    "Classifier call failed, keeping whole batch as relevant"
                );
                return (batch, Vec::new());
            }
        };

        let relevant_set: HashSet<&str> =
            classification.relevant.iter().map(|s| s.as_str()).collect();
        let irrelevant_set: HashSet<&str> = classification
            .irrelevant
            .iter()
            .map(|s| s.as_str())
            .collect();

        let mut relevant = Vec::new();
        let mut irrelevant = Vec::new();
        let mut unaccounted = 0usize;

        for keyword in batch {
            if relevant_set.contains(keyword.text.as_str()) {
                relevant.push(keyword);
            } else if irrelevant_set.contains(keyword.text.as_str()) {
                irrelevant.push(keyword);
            } else {
                unaccounted += 1;
                warn!(
                    batch = batch_number,
                    keyword = %keyword.text,
                    "Keyword not categorized by classifier, excluding from both buckets"
                );
            }
        }

        if unaccounted > 0 {
            metrics::counter!("relevancy_unaccounted_total").increment(unaccounted as u64);
        }
        debug!(
            batch = batch_number,
            relevant = relevant.len(),
            irrelevant = irrelevant.len(),
            unaccounted,
            "Batch reconciled"
        );

        (relevant, irrelevant)
    }
}

#[cfg(test)]
#[path = "relevancy_service_test.rs"]
mod tests;
