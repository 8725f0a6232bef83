use uuid::Uuid;

use rankrs::domain::models::scraped_page::{PageType, ScrapedPage};
use rankrs::domain::repositories::scraped_page_repository::ScrapedPageRepository;
use rankrs::infrastructure::repositories::scraped_page_repo_impl::ScrapedPageRepositoryImpl;

use crate::setup_db;

fn page(profile_id: Uuid, url: &str, page_type: PageType) -> ScrapedPage {
    ScrapedPage::new(
        profile_id,
        url.to_string(),
        page_type,
        serde_json::json!({ "metadata": { "url": url } }),
    )
}

#[tokio::test]
async fn test_bulk_upsert_is_idempotent_by_profile_and_url() {
    let repo = ScrapedPageRepositoryImpl::new(setup_db().await);
    let profile_id = Uuid::new_v4();

    let first = repo
        .bulk_upsert(vec![
            page(profile_id, "https://example.com/pricing", PageType::Pricing),
            page(profile_id, "https://example.com/blog", PageType::Blog),
        ])
        .await
        .unwrap();
    assert_eq!(first.len(), 2);

    // Re-ingesting the same URL keeps the original row id
    let second = repo
        .bulk_upsert(vec![page(
            profile_id,
            "https://example.com/pricing",
            PageType::Pricing,
        )])
        .await
        .unwrap();

    assert_eq!(second.len(), 1);
    assert_eq!(second[0].id, first[0].id);

    let all = repo.find_by_profile(profile_id).await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn test_same_url_for_different_profiles_is_distinct() {
    let repo = ScrapedPageRepositoryImpl::new(setup_db().await);

    let profile_a = Uuid::new_v4();
    let profile_b = Uuid::new_v4();

    repo.bulk_upsert(vec![page(profile_a, "https://example.com/", PageType::Home)])
        .await
        .unwrap();
    repo.bulk_upsert(vec![page(profile_b, "https://example.com/", PageType::Home)])
        .await
        .unwrap();

    assert_eq!(repo.find_by_profile(profile_a).await.unwrap().len(), 1);
    assert_eq!(repo.find_by_profile(profile_b).await.unwrap().len(), 1);
}
