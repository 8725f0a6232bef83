// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 关键词实体
///
/// 表示一个候选搜索短语及其SEO富集指标。文本是自然键：
/// 文本相同的两条记录视为重复，持久化前必须合并去重。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Keyword {
    /// 关键词唯一标识符
    pub id: Uuid,
    /// 关键词文本（自然键，大小写敏感）
    pub text: String,
    /// 月搜索量
    pub search_volume: u64,
    /// 供应商返回的原始搜索量字符串
    pub search_volume_raw: Option<String>,
    /// 竞争难度
    pub difficulty: KeywordDifficulty,
    /// 供应商侧数据的最后更新时间
    pub last_updated: Option<DateTime<FixedOffset>>,
    /// 来源供应商标签
    pub provider: Option<String>,
    /// 供应商原始负载（不同供应商填充互不相关的字段，整体按不透明数据处理）
    pub source: Option<serde_json::Value>,
    /// 创建时间
    pub created_at: DateTime<FixedOffset>,
    /// 更新时间
    pub updated_at: DateTime<FixedOffset>,
}

/// 关键词竞争难度枚举
///
/// 来源未给出信号时取 `Unknown`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum KeywordDifficulty {
    /// 难度未知
    #[default]
    Unknown,
    /// 低难度，最容易获得排名
    Low,
    /// 中等难度
    Medium,
    /// 高难度，最难获得排名
    High,
}

impl fmt::Display for KeywordDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            KeywordDifficulty::Unknown => write!(f, "unknown"),
            KeywordDifficulty::Low => write!(f, "low"),
            KeywordDifficulty::Medium => write!(f, "medium"),
            KeywordDifficulty::High => write!(f, "high"),
        }
    }
}

impl FromStr for KeywordDifficulty {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unknown" => Ok(KeywordDifficulty::Unknown),
            "low" => Ok(KeywordDifficulty::Low),
            "medium" => Ok(KeywordDifficulty::Medium),
            "high" => Ok(KeywordDifficulty::High),
            _ => Err(()),
        }
    }
}

impl Keyword {
    /// 创建一个新的关键词
    pub fn new(text: String, search_volume: u64, difficulty: KeywordDifficulty) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            search_volume,
            search_volume_raw: None,
            difficulty,
            last_updated: None,
            provider: None,
            source: None,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }
}
