// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::scrape_job_repository::RepositoryError;
use crate::domain::models::keyword::Keyword;
use async_trait::async_trait;
use uuid::Uuid;

/// 关键词仓库特质
///
/// 定义关键词数据访问接口。文本是自然键，写入以
/// upsert-by-text 方式进行；核心流程从不删除关键词。
#[async_trait]
pub trait KeywordRepository: Send + Sync {
    /// 按文本幂等写入关键词
    ///
    /// 文本已存在时更新指标字段并返回已存在的记录（保留其ID），
    /// 否则插入新记录。
    async fn upsert_by_text(&self, keyword: &Keyword) -> Result<Keyword, RepositoryError>;

    /// 根据文本查找关键词
    async fn find_by_text(&self, text: &str) -> Result<Option<Keyword>, RepositoryError>;

    /// 根据ID集合解析关键词记录
    ///
    /// 返回顺序与传入ID顺序一致，不存在的ID被跳过。
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Keyword>, RepositoryError>;
}
