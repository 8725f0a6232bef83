// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod keyword_handler;
pub mod scrape_job_handler;

use crate::domain::services::keyword_workflow_service::KeywordWorkflowService;
use crate::domain::services::scrape_job_service::ScrapeJobService;
use crate::infrastructure::repositories::keyword_repo_impl::KeywordRepositoryImpl;
use crate::infrastructure::repositories::scrape_job_repo_impl::ScrapeJobRepositoryImpl;
use crate::infrastructure::repositories::scraped_page_repo_impl::ScrapedPageRepositoryImpl;
use crate::infrastructure::repositories::website_profile_repo_impl::WebsiteProfileRepositoryImpl;
use crate::vendors::ahrefs::AhrefsSuggestClient;
use crate::vendors::firecrawl::FirecrawlClient;
use crate::vendors::openai::OpenAiClassifier;

/// 装配后的抓取任务生命周期服务类型
pub type AppScrapeJobService = ScrapeJobService<
    FirecrawlClient,
    ScrapeJobRepositoryImpl,
    ScrapedPageRepositoryImpl,
    WebsiteProfileRepositoryImpl,
>;

/// 装配后的关键词工作流服务类型
pub type AppKeywordService = KeywordWorkflowService<
    AhrefsSuggestClient,
    OpenAiClassifier,
    KeywordRepositoryImpl,
    WebsiteProfileRepositoryImpl,
>;
