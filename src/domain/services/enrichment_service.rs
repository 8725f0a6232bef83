// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use tracing::{debug, instrument};

use crate::domain::models::keyword::{Keyword, KeywordDifficulty};
use crate::domain::services::keyword_deduplicator::KeywordDeduplicator;
use crate::domain::services::keyword_scorer::sort_keywords_by_score;
use crate::domain::services::rate_limited_fetcher::RateLimitedFetcher;
use crate::utils::volume::map_volume;
use crate::vendors::traits::{KeywordLookupClient, KeywordSuggestion};

/// 关键词来源供应商标签
const PROVIDER_TAG: &str = "ahrefs";

/// 关键词富集流水线
///
/// 将种子关键词经限速扇出查询展开为候选关键词，合并成功结果，
/// 过滤低搜索量条目，按文本去重（保留首见），最后按分层得分
/// 降序稳定排序。输出顺序是对外契约。
///
/// 失败的种子查询已在查询器内记录，这里直接从合并结果中剔除，
/// 不向调用方抛出。
pub struct EnrichmentService<L: KeywordLookupClient> {
    fetcher: RateLimitedFetcher<L>,
    min_volume: u64,
}

impl<L: KeywordLookupClient> EnrichmentService<L> {
    /// 创建新的富集流水线实例
    pub fn new(fetcher: RateLimitedFetcher<L>, min_volume: u64) -> Self {
        Self {
            fetcher,
            min_volume,
        }
    }

    /// 富集一批种子关键词
    #[instrument(skip(self, seeds), fields(seed_count = seeds.len()))]
    pub async fn enrich(&self, seeds: Vec<String>) -> Vec<Keyword> {
        let outcomes = self.fetcher.fetch_all(seeds).await;

        let mut failed_seeds = 0usize;
        let mut candidates: Vec<Keyword> = Vec::new();
        for outcome in outcomes {
            match outcome.result {
                Ok(suggestions) => {
                    candidates.extend(suggestions.into_iter().map(suggestion_to_keyword));
                }
                // Already logged at the fetcher boundary
                Err(_) => failed_seeds += 1,
            }
        }

        let total_candidates = candidates.len();
        let filtered: Vec<Keyword> = candidates
            .into_iter()
            .filter(|kw| kw.search_volume >= self.min_volume)
            .collect();

        let mut deduplicator = KeywordDeduplicator::new();
        let unique = deduplicator.deduplicate(filtered);
        let sorted = sort_keywords_by_score(unique);

        metrics::counter!("keywords_enriched_total").increment(sorted.len() as u64);
        debug!(
            failed_seeds,
            total_candidates,
            kept = sorted.len(),
            "Keyword enrichment completed"
        );
        sorted
    }
}

/// 将供应商建议条目映射为关键词实体
///
/// 搜索量字符串经 [`map_volume`] 解析；难度标签无法识别或缺失时
/// 落为 `Unknown`；供应商原始负载整体保留在不透明字段上。
pub fn suggestion_to_keyword(suggestion: KeywordSuggestion) -> Keyword {
    let search_volume = suggestion
        .volume
        .as_deref()
        .map(map_volume)
        .unwrap_or(0);

    let difficulty = match suggestion.difficulty.as_deref() {
        Some("Easy") => KeywordDifficulty::Low,
        Some("Medium") => KeywordDifficulty::Medium,
        Some("Hard") => KeywordDifficulty::High,
        _ => KeywordDifficulty::Unknown,
    };

    let mut keyword = Keyword::new(suggestion.keyword, search_volume, difficulty);
    keyword.search_volume_raw = suggestion.volume;
    keyword.last_updated = suggestion.last_updated;
    keyword.provider = Some(PROVIDER_TAG.to_string());
    keyword.source = match suggestion.raw {
        serde_json::Value::Null => None,
        raw => Some(raw),
    };
    keyword
}

#[cfg(test)]
#[path = "enrichment_service_test.rs"]
mod tests;
