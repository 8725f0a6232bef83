// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::Extension;
use rankrs::config::settings::Settings;
use rankrs::domain::services::enrichment_service::EnrichmentService;
use rankrs::domain::services::keyword_workflow_service::KeywordWorkflowService;
use rankrs::domain::services::rate_limited_fetcher::RateLimitedFetcher;
use rankrs::domain::services::relevancy_service::RelevancyService;
use rankrs::domain::services::scrape_job_service::ScrapeJobService;
use rankrs::infrastructure::database::connection;
use rankrs::infrastructure::repositories::keyword_repo_impl::KeywordRepositoryImpl;
use rankrs::infrastructure::repositories::scrape_job_repo_impl::ScrapeJobRepositoryImpl;
use rankrs::infrastructure::repositories::scraped_page_repo_impl::ScrapedPageRepositoryImpl;
use rankrs::infrastructure::repositories::website_profile_repo_impl::WebsiteProfileRepositoryImpl;
use rankrs::presentation::routes;
use rankrs::utils::telemetry;
use rankrs::vendors::ahrefs::AhrefsSuggestClient;
use rankrs::vendors::firecrawl::FirecrawlClient;
use rankrs::vendors::openai::OpenAiClassifier;
use rankrs::workers::sweep_worker::SweepWorker;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use migration::{Migrator, MigratorTrait};

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting rankrs...");

    // Initialize Prometheus Metrics
    rankrs::infrastructure::metrics::init_metrics();

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);
    info!("Configuration loaded");

    // 3. Connect to database
    let db = connection::create_pool(&settings.database).await?;
    let db = Arc::new(db);
    info!("Database connection established");

    // Run database migrations
    info!("Running database migrations...");
    Migrator::up(db.as_ref(), None).await?;
    info!("Database migrations applied");

    // 4. Initialize repositories
    let job_repo = Arc::new(ScrapeJobRepositoryImpl::new(db.clone()));
    let page_repo = Arc::new(ScrapedPageRepositoryImpl::new(db.clone()));
    let profile_repo = Arc::new(WebsiteProfileRepositoryImpl::new(db.clone()));
    let keyword_repo = Arc::new(KeywordRepositoryImpl::new(db.clone()));

    // 5. Initialize vendor clients
    let crawl_client = Arc::new(FirecrawlClient::new(&settings.crawl));
    let lookup_client = Arc::new(AhrefsSuggestClient::new(&settings.keywords));
    let classifier = Arc::new(OpenAiClassifier::new(&settings.relevancy));

    // 6. Assemble services
    let scrape_job_service = Arc::new(ScrapeJobService::new(
        crawl_client,
        job_repo.clone(),
        page_repo.clone(),
        profile_repo.clone(),
        settings.crawl.clone(),
        settings.lifecycle.clone(),
    ));

    let fetcher = RateLimitedFetcher::new(lookup_client, &settings.keywords);
    let enrichment = EnrichmentService::new(fetcher, settings.keywords.min_volume);
    let relevancy = RelevancyService::new(classifier, settings.relevancy.batch_size);
    let keyword_service = Arc::new(KeywordWorkflowService::new(
        enrichment,
        relevancy,
        keyword_repo.clone(),
        profile_repo.clone(),
    ));

    // 7. Start the stalled-job sweep worker
    let sweep_worker = SweepWorker::new(
        scrape_job_service.clone(),
        Duration::from_secs(settings.lifecycle.sweep_interval_secs),
    );
    sweep_worker.start();
    info!("Sweep worker started");

    // 8. Start HTTP server
    let app = routes::routes()
        .layer(Extension(scrape_job_service))
        .layer(Extension(keyword_service))
        .layer(Extension(settings.clone()))
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
