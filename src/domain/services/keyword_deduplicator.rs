// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashSet;

use crate::domain::models::keyword::Keyword;

/// 关键词去重器
///
/// 以关键词文本为键（大小写敏感、精确匹配）的有状态过滤器：
/// 首次出现的文本通过并保留其指标，后续同文本条目全部丢弃。
/// 不同供应商可能对同一文本给出不同指标，保留首见条目是既定约定。
pub struct KeywordDeduplicator {
    seen: HashSet<String>,
}

impl KeywordDeduplicator {
    /// 创建新的去重器
    pub fn new() -> Self {
        Self {
            seen: HashSet::new(),
        }
    }

    /// 判断关键词是否首次出现
    ///
    /// # 返回值
    ///
    /// 首次出现返回true并记入内部状态，重复出现返回false
    pub fn check(&mut self, keyword: &Keyword) -> bool {
        self.seen.insert(keyword.text.clone())
    }

    /// 过滤重复关键词，保留每个文本的首见条目
    pub fn deduplicate(&mut self, keywords: Vec<Keyword>) -> Vec<Keyword> {
        keywords.into_iter().filter(|kw| self.check(kw)).collect()
    }

    /// 重置去重器状态
    pub fn reset(&mut self) {
        self.seen.clear();
    }
}

impl Default for KeywordDeduplicator {
    fn default() -> Self {
        Self::new()
    }
}
