// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Json, Path},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

use crate::application::dto::scrape_job_requests::{CreateScrapeJobDto, ScrapeJobDto};
use crate::presentation::errors::AppError;
use crate::presentation::handlers::AppScrapeJobService;

/// 创建抓取任务
///
/// 供应商接受爬取请求后任务即被持久化并返回；轮询由创建后
/// 立刻派生的处理子任务或后续巡检驱动，二者通过原子认领互斥。
pub async fn create_scrape_job(
    Extension(service): Extension<Arc<AppScrapeJobService>>,
    Json(payload): Json<CreateScrapeJobDto>,
) -> Result<impl IntoResponse, AppError> {
    let job = service.create_job(payload.website_profile_id).await?;

    let job_id = job.id;
    let background = service.clone();
    tokio::spawn(async move {
        if let Err(e) = background.claim_and_process(job_id).await {
            error!(job_id = %job_id, error = %e, "Background job processing failed");
        }
    });

    Ok((StatusCode::CREATED, Json(ScrapeJobDto::from(job))))
}

/// 查询抓取任务状态
pub async fn get_scrape_job_status(
    Path(id): Path<Uuid>,
    Extension(service): Extension<Arc<AppScrapeJobService>>,
) -> Result<impl IntoResponse, AppError> {
    let job = service.get_job(id).await?;
    Ok(Json(ScrapeJobDto::from(job)))
}

/// 查询网站档案最近的抓取任务
pub async fn get_latest_job_for_profile(
    Path(website_profile_id): Path<Uuid>,
    Extension(service): Extension<Arc<AppScrapeJobService>>,
) -> Result<impl IntoResponse, AppError> {
    let job = service.latest_job_for_profile(website_profile_id).await?;
    Ok(Json(ScrapeJobDto::from(job)))
}

/// 同步抓取工作流
///
/// 创建任务并原地等待其终态，适合需要同步语义的调用方。
pub async fn scrape_website_workflow(
    Extension(service): Extension<Arc<AppScrapeJobService>>,
    Json(payload): Json<CreateScrapeJobDto>,
) -> Result<impl IntoResponse, AppError> {
    let job = service
        .scrape_website_workflow(payload.website_profile_id)
        .await?;
    Ok(Json(ScrapeJobDto::from(job)))
}
