// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::models::keyword::Keyword;

/// 网站档案实体
///
/// 抓取任务与关键词流水线的归属主体。关键词各阶段的结果以
/// 引用列表形式缓存在档案上，避免重复触发昂贵的供应商调用。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebsiteProfile {
    /// 档案唯一标识符
    pub id: Uuid,
    /// 网站域名
    pub domain: String,
    /// 业务概述
    pub business_overview: Option<String>,
    /// 理想客户画像列表
    pub icps: Vec<String>,
    /// 种子关键词列表
    pub seed_keywords: Vec<String>,
    /// 已通过SEO校验的关键词引用
    pub validated_keyword_ids: KeywordRefs,
    /// 已通过相关性筛选的关键词引用
    pub relevant_keyword_ids: KeywordRefs,
    /// 最近一次发起抓取的时间
    pub last_scraped_at: Option<DateTime<FixedOffset>>,
    /// 创建时间
    pub created_at: DateTime<FixedOffset>,
    /// 更新时间
    pub updated_at: DateTime<FixedOffset>,
}

/// 关键词引用列表
///
/// 档案上持久化的是关键词ID；与 [`ResolvedKeywords`] 构成显式的
/// 未解析/已解析二态，两种形态在类型层面区分，不做运行时形状判断。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeywordRefs(pub Vec<Uuid>);

impl KeywordRefs {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// 已解析的关键词列表
///
/// 经关键词仓库解析后的完整记录，仅在内存中流转，不持久化。
#[derive(Debug, Clone, Default)]
pub struct ResolvedKeywords(pub Vec<Keyword>);

impl ResolvedKeywords {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<Keyword> {
        self.0
    }
}
