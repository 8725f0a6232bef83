// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::models::keyword::{Keyword, KeywordDifficulty};
use crate::domain::services::keyword_scorer::score_keyword;
use crate::vendors::traits::BusinessContext;

/// 关键词富集请求数据传输对象
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct EnrichKeywordsDto {
    /// 种子关键词列表
    #[validate(length(min = 1, message = "keywords cannot be empty"))]
    pub keywords: Vec<String>,
}

/// 相关性筛选请求数据传输对象
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct FilterRelevantDto {
    /// 待筛选的关键词列表
    #[validate(length(min = 1, message = "keywords cannot be empty"))]
    pub keywords: Vec<KeywordInputDto>,
    /// 业务上下文
    pub context: BusinessContextDto,
}

/// 请求携带的关键词条目
#[derive(Debug, Deserialize, Serialize)]
pub struct KeywordInputDto {
    /// 关键词文本
    pub text: String,
    /// 搜索量
    #[serde(default)]
    pub search_volume: u64,
    /// 难度
    #[serde(default)]
    pub difficulty: KeywordDifficulty,
}

impl From<KeywordInputDto> for Keyword {
    fn from(dto: KeywordInputDto) -> Self {
        Keyword::new(dto.text, dto.search_volume, dto.difficulty)
    }
}

/// 业务上下文数据传输对象
#[derive(Debug, Deserialize, Serialize)]
pub struct BusinessContextDto {
    /// 业务概述
    #[serde(default)]
    pub business_overview: String,
    /// 理想客户画像列表
    #[serde(default)]
    pub icps: Vec<String>,
    /// 网站域名
    pub domain: String,
}

impl From<BusinessContextDto> for BusinessContext {
    fn from(dto: BusinessContextDto) -> Self {
        Self {
            business_overview: dto.business_overview,
            icps: dto.icps,
            domain: dto.domain,
        }
    }
}

/// 关键词响应数据传输对象
#[derive(Debug, Deserialize, Serialize)]
pub struct KeywordDto {
    /// 关键词文本
    pub text: String,
    /// 搜索量
    pub search_volume: u64,
    /// 难度
    pub difficulty: KeywordDifficulty,
    /// 分层得分（按需计算，仅用于排序展示）
    pub score: i64,
    /// 来源供应商
    pub provider: Option<String>,
}

impl From<Keyword> for KeywordDto {
    fn from(keyword: Keyword) -> Self {
        let score = score_keyword(&keyword);
        Self {
            text: keyword.text,
            search_volume: keyword.search_volume,
            difficulty: keyword.difficulty,
            score,
            provider: keyword.provider,
        }
    }
}
