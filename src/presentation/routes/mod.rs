// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::presentation::handlers::{keyword_handler, scrape_job_handler};
use axum::{
    routing::{get, post},
    Router,
};

/// 创建应用路由
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes() -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version));

    let api_routes = Router::new()
        .route(
            "/v1/scrape-jobs",
            post(scrape_job_handler::create_scrape_job),
        )
        .route(
            "/v1/scrape-jobs/{id}",
            get(scrape_job_handler::get_scrape_job_status),
        )
        .route(
            "/v1/website-profiles/{id}/latest-job",
            get(scrape_job_handler::get_latest_job_for_profile),
        )
        .route(
            "/v1/workflows/scrape",
            post(scrape_job_handler::scrape_website_workflow),
        )
        .route("/v1/keywords/enrich", post(keyword_handler::enrich_keywords))
        .route(
            "/v1/keywords/filter-relevant",
            post(keyword_handler::filter_relevant),
        )
        .route(
            "/v1/website-profiles/{id}/keywords/validated",
            post(keyword_handler::validated_keywords_for_profile),
        )
        .route(
            "/v1/website-profiles/{id}/keywords/relevant",
            post(keyword_handler::relevant_keywords_for_profile),
        );

    Router::new().merge(public_routes).merge(api_routes)
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
