// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::website_profile::{KeywordRefs, WebsiteProfile};
use crate::domain::repositories::scrape_job_repository::RepositoryError;
use crate::domain::repositories::website_profile_repository::WebsiteProfileRepository;
use crate::infrastructure::database::entities::website_profile as profile_entity;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set,
};
use std::sync::Arc;
use uuid::Uuid;

/// 网站档案仓库实现
///
/// 基于SeaORM实现的网站档案数据访问层。列表型字段
/// （画像、种子关键词、关键词引用）以JSON列存储。
#[derive(Clone)]
pub struct WebsiteProfileRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl WebsiteProfileRepositoryImpl {
    /// 创建新的网站档案仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn refs_to_json(refs: &KeywordRefs) -> serde_json::Value {
        serde_json::to_value(&refs.0).unwrap_or_else(|_| serde_json::Value::Array(Vec::new()))
    }
}

impl From<profile_entity::Model> for WebsiteProfile {
    fn from(model: profile_entity::Model) -> Self {
        Self {
            id: model.id,
            domain: model.domain,
            business_overview: model.business_overview,
            icps: serde_json::from_value(model.icps).unwrap_or_default(),
            seed_keywords: serde_json::from_value(model.seed_keywords).unwrap_or_default(),
            validated_keyword_ids: KeywordRefs(
                serde_json::from_value(model.validated_keyword_ids).unwrap_or_default(),
            ),
            relevant_keyword_ids: KeywordRefs(
                serde_json::from_value(model.relevant_keyword_ids).unwrap_or_default(),
            ),
            last_scraped_at: model.last_scraped_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<WebsiteProfile> for profile_entity::ActiveModel {
    fn from(profile: WebsiteProfile) -> Self {
        Self {
            id: Set(profile.id),
            domain: Set(profile.domain.clone()),
            business_overview: Set(profile.business_overview.clone()),
            icps: Set(serde_json::to_value(&profile.icps)
                .unwrap_or_else(|_| serde_json::Value::Array(Vec::new()))),
            seed_keywords: Set(serde_json::to_value(&profile.seed_keywords)
                .unwrap_or_else(|_| serde_json::Value::Array(Vec::new()))),
            validated_keyword_ids: Set(WebsiteProfileRepositoryImpl::refs_to_json(
                &profile.validated_keyword_ids,
            )),
            relevant_keyword_ids: Set(WebsiteProfileRepositoryImpl::refs_to_json(
                &profile.relevant_keyword_ids,
            )),
            last_scraped_at: Set(profile.last_scraped_at),
            created_at: Set(profile.created_at),
            updated_at: Set(profile.updated_at),
        }
    }
}

#[async_trait]
impl WebsiteProfileRepository for WebsiteProfileRepositoryImpl {
    async fn create(&self, profile: &WebsiteProfile) -> Result<WebsiteProfile, RepositoryError> {
        let model: profile_entity::ActiveModel = profile.clone().into();

        model.insert(self.db.as_ref()).await?;
        Ok(profile.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<WebsiteProfile>, RepositoryError> {
        let model = profile_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn set_validated_keywords(
        &self,
        id: Uuid,
        refs: &KeywordRefs,
    ) -> Result<(), RepositoryError> {
        profile_entity::Entity::update_many()
            .col_expr(
                profile_entity::Column::ValidatedKeywordIds,
                Expr::value(Self::refs_to_json(refs)),
            )
            .col_expr(
                profile_entity::Column::UpdatedAt,
                Expr::value::<DateTime<FixedOffset>>(Utc::now().into()),
            )
            .filter(profile_entity::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await?;

        Ok(())
    }

    async fn set_relevant_keywords(
        &self,
        id: Uuid,
        refs: &KeywordRefs,
    ) -> Result<(), RepositoryError> {
        profile_entity::Entity::update_many()
            .col_expr(
                profile_entity::Column::RelevantKeywordIds,
                Expr::value(Self::refs_to_json(refs)),
            )
            .col_expr(
                profile_entity::Column::UpdatedAt,
                Expr::value::<DateTime<FixedOffset>>(Utc::now().into()),
            )
            .filter(profile_entity::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await?;

        Ok(())
    }

    async fn set_last_scraped_at(
        &self,
        id: Uuid,
        at: DateTime<FixedOffset>,
    ) -> Result<(), RepositoryError> {
        profile_entity::Entity::update_many()
            .col_expr(
                profile_entity::Column::LastScrapedAt,
                Expr::value::<Option<DateTime<FixedOffset>>>(Some(at)),
            )
            .col_expr(
                profile_entity::Column::UpdatedAt,
                Expr::value::<DateTime<FixedOffset>>(Utc::now().into()),
            )
            .filter(profile_entity::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await?;

        Ok(())
    }
}
