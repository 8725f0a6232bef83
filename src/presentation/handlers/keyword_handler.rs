// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Json, Path},
    response::IntoResponse,
};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::application::dto::keyword_requests::{
    EnrichKeywordsDto, FilterRelevantDto, KeywordDto,
};
use crate::domain::models::keyword::Keyword;
use crate::presentation::errors::AppError;
use crate::presentation::handlers::AppKeywordService;

/// 富集一批种子关键词
///
/// 输出为按分层得分降序排列的去重关键词列表，顺序是接口契约。
pub async fn enrich_keywords(
    Extension(service): Extension<Arc<AppKeywordService>>,
    Json(payload): Json<EnrichKeywordsDto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let keywords = service.enrich(payload.keywords).await;
    let dtos: Vec<KeywordDto> = keywords.into_iter().map(KeywordDto::from).collect();

    Ok(Json(json!({ "success": true, "keywords": dtos })))
}

/// 按业务上下文筛选相关关键词
pub async fn filter_relevant(
    Extension(service): Extension<Arc<AppKeywordService>>,
    Json(payload): Json<FilterRelevantDto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let context = payload.context.into();
    let keywords: Vec<Keyword> = payload.keywords.into_iter().map(Keyword::from).collect();

    let outcome = service.filter_relevant(keywords, &context).await;
    let relevant: Vec<KeywordDto> = outcome.relevant.into_iter().map(KeywordDto::from).collect();
    let irrelevant: Vec<KeywordDto> = outcome
        .irrelevant
        .into_iter()
        .map(KeywordDto::from)
        .collect();

    Ok(Json(json!({
        "success": true,
        "relevant": relevant,
        "irrelevant": irrelevant,
    })))
}

/// 生成或读取档案的校验阶段关键词
pub async fn validated_keywords_for_profile(
    Path(website_profile_id): Path<Uuid>,
    Extension(service): Extension<Arc<AppKeywordService>>,
) -> Result<impl IntoResponse, AppError> {
    let resolved = service
        .validated_keywords_for_profile(website_profile_id)
        .await?;
    let dtos: Vec<KeywordDto> = resolved
        .into_inner()
        .into_iter()
        .map(KeywordDto::from)
        .collect();

    Ok(Json(json!({ "success": true, "keywords": dtos })))
}

/// 生成或读取档案的相关性阶段关键词
pub async fn relevant_keywords_for_profile(
    Path(website_profile_id): Path<Uuid>,
    Extension(service): Extension<Arc<AppKeywordService>>,
) -> Result<impl IntoResponse, AppError> {
    let resolved = service
        .relevant_keywords_for_profile(website_profile_id)
        .await?;
    let dtos: Vec<KeywordDto> = resolved
        .into_inner()
        .into_iter()
        .map(KeywordDto::from)
        .collect();

    Ok(Json(json!({ "success": true, "keywords": dtos })))
}
