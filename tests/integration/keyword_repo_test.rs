use rankrs::domain::models::keyword::{Keyword, KeywordDifficulty};
use rankrs::domain::repositories::keyword_repository::KeywordRepository;
use rankrs::infrastructure::repositories::keyword_repo_impl::KeywordRepositoryImpl;

use crate::setup_db;

fn keyword(text: &str, volume: u64, difficulty: KeywordDifficulty) -> Keyword {
    Keyword::new(text.to_string(), volume, difficulty)
}

#[tokio::test]
async fn test_upsert_inserts_then_updates_by_text() {
    let repo = KeywordRepositoryImpl::new(setup_db().await);

    let first = repo
        .upsert_by_text(&keyword("crm software", 1000, KeywordDifficulty::Medium))
        .await
        .unwrap();

    // Same text with fresher metrics: id is kept, metrics are replaced
    let second = repo
        .upsert_by_text(&keyword("crm software", 12000, KeywordDifficulty::Low))
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.search_volume, 12000);
    assert_eq!(second.difficulty, KeywordDifficulty::Low);
}

#[tokio::test]
async fn test_upsert_is_case_sensitive_on_text() {
    let repo = KeywordRepositoryImpl::new(setup_db().await);

    let lower = repo
        .upsert_by_text(&keyword("crm", 100, KeywordDifficulty::Low))
        .await
        .unwrap();
    let upper = repo
        .upsert_by_text(&keyword("CRM", 200, KeywordDifficulty::Low))
        .await
        .unwrap();

    assert_ne!(lower.id, upper.id);
}

#[tokio::test]
async fn test_find_by_ids_preserves_reference_order() {
    let repo = KeywordRepositoryImpl::new(setup_db().await);

    let a = repo
        .upsert_by_text(&keyword("alpha", 100, KeywordDifficulty::Low))
        .await
        .unwrap();
    let b = repo
        .upsert_by_text(&keyword("beta", 200, KeywordDifficulty::Low))
        .await
        .unwrap();
    let c = repo
        .upsert_by_text(&keyword("gamma", 300, KeywordDifficulty::Low))
        .await
        .unwrap();

    let missing = uuid::Uuid::new_v4();
    let resolved = repo
        .find_by_ids(&[c.id, missing, a.id, b.id])
        .await
        .unwrap();

    let texts: Vec<&str> = resolved.iter().map(|k| k.text.as_str()).collect();
    assert_eq!(texts, vec!["gamma", "alpha", "beta"]);
}

#[tokio::test]
async fn test_opaque_source_payload_roundtrips() {
    let repo = KeywordRepositoryImpl::new(setup_db().await);

    let mut kw = keyword("crm pricing", 1500, KeywordDifficulty::Low);
    kw.provider = Some("ahrefs".to_string());
    kw.search_volume_raw = Some("1.5k".to_string());
    kw.source = Some(serde_json::json!({ "keyword": "crm pricing", "volume": "1.5k" }));

    repo.upsert_by_text(&kw).await.unwrap();
    let found = repo.find_by_text("crm pricing").await.unwrap().unwrap();

    assert_eq!(found.provider.as_deref(), Some("ahrefs"));
    assert_eq!(found.search_volume_raw.as_deref(), Some("1.5k"));
    assert_eq!(
        found.source.unwrap()["volume"],
        serde_json::json!("1.5k")
    );
}
