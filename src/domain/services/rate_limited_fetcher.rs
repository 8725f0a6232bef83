// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::num::NonZeroU32;
use std::sync::Arc;

use futures::future::join_all;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use tokio::sync::Semaphore;
use tracing::warn;

use crate::config::settings::KeywordSettings;
use crate::vendors::traits::{KeywordLookupClient, KeywordSuggestion, VendorError};

/// 单个种子关键词的查询结局
#[derive(Debug)]
pub struct FetchOutcome {
    /// 种子关键词文本
    pub seed: String,
    /// 查询结果：成功的建议列表或失败记录
    pub result: Result<Vec<KeywordSuggestion>, VendorError>,
}

/// 限速关键词查询器
///
/// 以受控的并发与速率对关键词建议供应商做扇出调用：
/// - 并发上限由信号量保证
/// - 持续速率与突发余量由令牌桶保证（进程内自有状态，非全局单例）
///
/// 单个查询的失败被隔离记录，不取消也不影响兄弟调用；
/// 所有调用均已结局（成功或失败）后整体返回。查询器内部不做重试，
/// 重试策略由调用方决定。
pub struct RateLimitedFetcher<L: KeywordLookupClient> {
    lookup: Arc<L>,
    semaphore: Arc<Semaphore>,
    limiter: Arc<DefaultDirectRateLimiter>,
}

impl<L: KeywordLookupClient> RateLimitedFetcher<L> {
    /// 创建新的限速查询器
    pub fn new(lookup: Arc<L>, settings: &KeywordSettings) -> Self {
        let per_second =
            NonZeroU32::new(settings.requests_per_second.max(1)).unwrap_or(NonZeroU32::MIN);
        let burst = NonZeroU32::new(settings.burst_capacity.max(1)).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::per_second(per_second).allow_burst(burst);

        Self {
            lookup,
            semaphore: Arc::new(Semaphore::new(settings.max_concurrent.max(1) as usize)),
            limiter: Arc::new(RateLimiter::direct(quota)),
        }
    }

    /// 对一批种子关键词做受控扇出查询
    ///
    /// # 返回值
    ///
    /// 每个种子关键词对应一个 [`FetchOutcome`]，顺序与输入一致
    pub async fn fetch_all(&self, seeds: Vec<String>) -> Vec<FetchOutcome> {
        let total = seeds.len();
        let futures = seeds.into_iter().map(|seed| {
            let lookup = self.lookup.clone();
            let semaphore = self.semaphore.clone();
            let limiter = self.limiter.clone();

            async move {
                // Concurrency slot is held while waiting on the bucket
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .expect("fetcher semaphore never closes");
                limiter.until_ready().await;

                let result = lookup.lookup(&seed).await;
                if let Err(err) = &result {
                    metrics::counter!("keyword_lookup_failures_total").increment(1);
                    warn!(seed = %seed, error = %err, "Keyword lookup failed, dropping seed");
                }

                FetchOutcome { seed, result }
            }
        });

        let outcomes = join_all(futures).await;
        tracing::debug!(total, "Keyword lookup fan-out settled");
        outcomes
    }
}
