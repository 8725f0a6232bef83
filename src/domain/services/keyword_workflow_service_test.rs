use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use uuid::Uuid;

use crate::config::settings::KeywordSettings;
use crate::domain::models::keyword::Keyword;
use crate::domain::models::website_profile::{KeywordRefs, WebsiteProfile};
use crate::domain::repositories::keyword_repository::KeywordRepository;
use crate::domain::repositories::scrape_job_repository::RepositoryError;
use crate::domain::repositories::website_profile_repository::WebsiteProfileRepository;
use crate::domain::services::enrichment_service::EnrichmentService;
use crate::domain::services::keyword_workflow_service::{
    KeywordWorkflowError, KeywordWorkflowService,
};
use crate::domain::services::rate_limited_fetcher::RateLimitedFetcher;
use crate::domain::services::relevancy_service::RelevancyService;
use crate::vendors::traits::{
    BusinessContext, Classification, KeywordLookupClient, KeywordSuggestion, RelevancyClassifier,
    VendorError,
};

// --- Mocks ---

/// 对所有种子返回固定建议并统计调用次数的查询客户端
struct CountingLookup {
    calls: AtomicUsize,
}

#[async_trait]
impl KeywordLookupClient for CountingLookup {
    async fn lookup(&self, seed: &str) -> Result<Vec<KeywordSuggestion>, VendorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![KeywordSuggestion {
            keyword: format!("{} software", seed),
            volume: Some("5k".to_string()),
            difficulty: Some("Easy".to_string()),
            last_updated: None,
            raw: serde_json::Value::Null,
        }])
    }
}

/// 全部判为相关的分类器
struct AllRelevantClassifier;

#[async_trait]
impl RelevancyClassifier for AllRelevantClassifier {
    async fn classify(
        &self,
        keywords: &[String],
        _context: &BusinessContext,
    ) -> Result<Classification, VendorError> {
        Ok(Classification {
            relevant: keywords.to_vec(),
            irrelevant: Vec::new(),
        })
    }
}

/// 内存关键词仓库：按文本幂等写入，保留首次分配的ID
#[derive(Default)]
struct InMemoryKeywordRepo {
    by_text: Mutex<HashMap<String, Keyword>>,
}

#[async_trait]
impl KeywordRepository for InMemoryKeywordRepo {
    async fn upsert_by_text(&self, keyword: &Keyword) -> Result<Keyword, RepositoryError> {
        let mut map = self.by_text.lock().unwrap();
        let saved = map
            .entry(keyword.text.clone())
            .and_modify(|existing| {
                existing.search_volume = keyword.search_volume;
                existing.difficulty = keyword.difficulty;
            })
            .or_insert_with(|| keyword.clone());
        Ok(saved.clone())
    }

    async fn find_by_text(&self, text: &str) -> Result<Option<Keyword>, RepositoryError> {
        Ok(self.by_text.lock().unwrap().get(text).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Keyword>, RepositoryError> {
        let map = self.by_text.lock().unwrap();
        Ok(ids
            .iter()
            .filter_map(|id| map.values().find(|kw| kw.id == *id).cloned())
            .collect())
    }
}

/// 持有单个档案的内存档案仓库
struct SingleProfileRepo {
    profile: Mutex<WebsiteProfile>,
}

#[async_trait]
impl WebsiteProfileRepository for SingleProfileRepo {
    async fn create(&self, profile: &WebsiteProfile) -> Result<WebsiteProfile, RepositoryError> {
        Ok(profile.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<WebsiteProfile>, RepositoryError> {
        let profile = self.profile.lock().unwrap();
        if profile.id == id {
            Ok(Some(profile.clone()))
        } else {
            Ok(None)
        }
    }

    async fn set_validated_keywords(
        &self,
        _id: Uuid,
        refs: &KeywordRefs,
    ) -> Result<(), RepositoryError> {
        self.profile.lock().unwrap().validated_keyword_ids = refs.clone();
        Ok(())
    }

    async fn set_relevant_keywords(
        &self,
        _id: Uuid,
        refs: &KeywordRefs,
    ) -> Result<(), RepositoryError> {
        self.profile.lock().unwrap().relevant_keyword_ids = refs.clone();
        Ok(())
    }

    async fn set_last_scraped_at(
        &self,
        _id: Uuid,
        _at: DateTime<FixedOffset>,
    ) -> Result<(), RepositoryError> {
        Ok(())
    }
}

// --- Helpers ---

fn profile(seed_keywords: Vec<&str>) -> WebsiteProfile {
    WebsiteProfile {
        id: Uuid::new_v4(),
        domain: "https://example.com".to_string(),
        business_overview: Some("CRM for small teams".to_string()),
        icps: vec!["startup founders".to_string()],
        seed_keywords: seed_keywords.into_iter().map(|s| s.to_string()).collect(),
        validated_keyword_ids: KeywordRefs::default(),
        relevant_keyword_ids: KeywordRefs::default(),
        last_scraped_at: None,
        created_at: Utc::now().into(),
        updated_at: Utc::now().into(),
    }
}

struct Fixture {
    service: KeywordWorkflowService<
        CountingLookup,
        AllRelevantClassifier,
        InMemoryKeywordRepo,
        SingleProfileRepo,
    >,
    lookup: Arc<CountingLookup>,
    profile_id: Uuid,
}

fn fixture(profile: WebsiteProfile) -> Fixture {
    let settings = KeywordSettings {
        base_url: "http://localhost".to_string(),
        rapidapi_host: "host".to_string(),
        rapidapi_key: "key".to_string(),
        country: "us".to_string(),
        search_engine: "google".to_string(),
        min_volume: 100,
        max_concurrent: 5,
        requests_per_second: 1000,
        burst_capacity: 100,
    };

    let lookup = Arc::new(CountingLookup {
        calls: AtomicUsize::new(0),
    });
    let fetcher = RateLimitedFetcher::new(lookup.clone(), &settings);
    let enrichment = EnrichmentService::new(fetcher, settings.min_volume);
    let relevancy = RelevancyService::new(Arc::new(AllRelevantClassifier), 150);

    let profile_id = profile.id;
    let service = KeywordWorkflowService::new(
        enrichment,
        relevancy,
        Arc::new(InMemoryKeywordRepo::default()),
        Arc::new(SingleProfileRepo {
            profile: Mutex::new(profile),
        }),
    );

    Fixture {
        service,
        lookup,
        profile_id,
    }
}

// --- Tests ---

#[tokio::test]
async fn test_validated_keywords_are_generated_persisted_and_cached() {
    let fx = fixture(profile(vec!["crm", "sales"]));

    let first = fx
        .service
        .validated_keywords_for_profile(fx.profile_id)
        .await
        .unwrap();

    assert_eq!(first.0.len(), 2);
    assert_eq!(fx.lookup.calls.load(Ordering::SeqCst), 2);

    // Second call resolves from the cached refs without new vendor calls
    let second = fx
        .service
        .validated_keywords_for_profile(fx.profile_id)
        .await
        .unwrap();

    assert_eq!(second.0.len(), 2);
    assert_eq!(fx.lookup.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_missing_profile_is_not_found() {
    let fx = fixture(profile(vec!["crm"]));

    let result = fx
        .service
        .validated_keywords_for_profile(Uuid::new_v4())
        .await;

    assert!(matches!(result, Err(KeywordWorkflowError::ProfileNotFound)));
}

#[tokio::test]
async fn test_profile_without_seeds_is_rejected() {
    let fx = fixture(profile(vec![]));

    let result = fx
        .service
        .validated_keywords_for_profile(fx.profile_id)
        .await;

    assert!(matches!(
        result,
        Err(KeywordWorkflowError::MissingSeedKeywords)
    ));
}

#[tokio::test]
async fn test_relevant_keywords_run_both_stages_and_cache_refs() {
    let fx = fixture(profile(vec!["crm"]));

    let relevant = fx
        .service
        .relevant_keywords_for_profile(fx.profile_id)
        .await
        .unwrap();

    assert_eq!(relevant.0.len(), 1);
    assert_eq!(relevant.0[0].text, "crm software");

    // Cached refs short-circuit the second run entirely
    let again = fx
        .service
        .relevant_keywords_for_profile(fx.profile_id)
        .await
        .unwrap();
    assert_eq!(again.0.len(), 1);
    assert_eq!(fx.lookup.calls.load(Ordering::SeqCst), 1);
}
