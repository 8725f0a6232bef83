// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::keyword::{Keyword, KeywordDifficulty};

/// 低于该搜索量的关键词视为不显著，排在所有显著关键词之后
const MIN_SIGNIFICANT_VOLUME: u64 = 1000;

/// 分层乘数，须远大于任何可能出现的搜索量，保证难度层级主导排序
const TIER_MULTIPLIER: i64 = 10_000_000;

/// 计算关键词的分层得分
///
/// 搜索量低于 [`MIN_SIGNIFICANT_VOLUME`] 的关键词落入 -1 层，
/// 无论自身搜索量多大都排在全部显著关键词之后；显著关键词按
/// 难度分层（低难度优先），层内以搜索量排序。
///
/// 得分 = 层级 × [`TIER_MULTIPLIER`] + 搜索量。纯函数，无错误分支。
pub fn score_keyword(keyword: &Keyword) -> i64 {
    let volume = keyword.search_volume;

    let tier: i64 = if volume < MIN_SIGNIFICANT_VOLUME {
        -1
    } else {
        match keyword.difficulty {
            KeywordDifficulty::Low => 2,
            KeywordDifficulty::Medium => 1,
            KeywordDifficulty::High | KeywordDifficulty::Unknown => 0,
        }
    };

    tier * TIER_MULTIPLIER + volume as i64
}

/// 按分层得分降序排序关键词
///
/// 使用稳定排序：得分相同的关键词保持输入相对顺序，
/// 同一输入的多次调用产生同一输出。
pub fn sort_keywords_by_score(mut keywords: Vec<Keyword>) -> Vec<Keyword> {
    keywords.sort_by(|a, b| score_keyword(b).cmp(&score_keyword(a)));
    keywords
}
