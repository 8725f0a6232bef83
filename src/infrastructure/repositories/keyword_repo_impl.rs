// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::keyword::Keyword;
use crate::domain::repositories::keyword_repository::KeywordRepository;
use crate::domain::repositories::scrape_job_repository::RepositoryError;
use crate::infrastructure::database::entities::keyword as keyword_entity;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::OnConflict, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// 关键词仓库实现
///
/// 基于SeaORM实现的关键词数据访问层。文本列带唯一索引，
/// 写入统一走 ON CONFLICT 更新，保证按文本幂等。
#[derive(Clone)]
pub struct KeywordRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl KeywordRepositoryImpl {
    /// 创建新的关键词仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<keyword_entity::Model> for Keyword {
    fn from(model: keyword_entity::Model) -> Self {
        Self {
            id: model.id,
            text: model.text,
            search_volume: model.search_volume.max(0) as u64,
            search_volume_raw: model.search_volume_raw,
            difficulty: model.difficulty.parse().unwrap_or_default(),
            last_updated: model.last_updated,
            provider: model.provider,
            source: model.source,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<Keyword> for keyword_entity::ActiveModel {
    fn from(keyword: Keyword) -> Self {
        Self {
            id: Set(keyword.id),
            text: Set(keyword.text.clone()),
            search_volume: Set(keyword.search_volume as i64),
            search_volume_raw: Set(keyword.search_volume_raw.clone()),
            difficulty: Set(keyword.difficulty.to_string()),
            last_updated: Set(keyword.last_updated),
            provider: Set(keyword.provider.clone()),
            source: Set(keyword.source.clone()),
            created_at: Set(keyword.created_at),
            updated_at: Set(keyword.updated_at),
        }
    }
}

#[async_trait]
impl KeywordRepository for KeywordRepositoryImpl {
    async fn upsert_by_text(&self, keyword: &Keyword) -> Result<Keyword, RepositoryError> {
        let mut model: keyword_entity::ActiveModel = keyword.clone().into();
        model.updated_at = Set(Utc::now().into());

        keyword_entity::Entity::insert(model)
            .on_conflict(
                OnConflict::column(keyword_entity::Column::Text)
                    .update_columns([
                        keyword_entity::Column::SearchVolume,
                        keyword_entity::Column::SearchVolumeRaw,
                        keyword_entity::Column::Difficulty,
                        keyword_entity::Column::LastUpdated,
                        keyword_entity::Column::Provider,
                        keyword_entity::Column::Source,
                        keyword_entity::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(self.db.as_ref())
            .await?;

        // The conflict path keeps the existing row id, so read the
        // canonical record back by its natural key
        self.find_by_text(&keyword.text)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    async fn find_by_text(&self, text: &str) -> Result<Option<Keyword>, RepositoryError> {
        let model = keyword_entity::Entity::find()
            .filter(keyword_entity::Column::Text.eq(text))
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Keyword>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = keyword_entity::Entity::find()
            .filter(keyword_entity::Column::Id.is_in(ids.iter().copied()))
            .all(self.db.as_ref())
            .await?;

        let mut by_id: HashMap<Uuid, Keyword> = models
            .into_iter()
            .map(|model| (model.id, model.into()))
            .collect();

        // Preserve the caller's reference order
        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }
}
