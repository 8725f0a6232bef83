// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::scraped_page::ScrapedPage;
use crate::domain::repositories::scrape_job_repository::RepositoryError;
use crate::domain::repositories::scraped_page_repository::ScrapedPageRepository;
use crate::infrastructure::database::entities::scraped_page as page_entity;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::OnConflict, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use std::sync::Arc;
use uuid::Uuid;

/// 已抓取页面仓库实现
///
/// 基于SeaORM实现的页面数据访问层，(网站档案, URL) 上有唯一索引，
/// 写入走 ON CONFLICT 更新。
#[derive(Clone)]
pub struct ScrapedPageRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl ScrapedPageRepositoryImpl {
    /// 创建新的页面仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<page_entity::Model> for ScrapedPage {
    fn from(model: page_entity::Model) -> Self {
        Self {
            id: model.id,
            website_profile_id: model.website_profile_id,
            url: model.url,
            page_type: model.page_type.parse().unwrap_or_default(),
            context: model.context,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<ScrapedPage> for page_entity::ActiveModel {
    fn from(page: ScrapedPage) -> Self {
        Self {
            id: Set(page.id),
            website_profile_id: Set(page.website_profile_id),
            url: Set(page.url.clone()),
            page_type: Set(page.page_type.to_string()),
            context: Set(page.context.clone()),
            created_at: Set(page.created_at),
            updated_at: Set(page.updated_at),
        }
    }
}

#[async_trait]
impl ScrapedPageRepository for ScrapedPageRepositoryImpl {
    async fn bulk_upsert(
        &self,
        pages: Vec<ScrapedPage>,
    ) -> Result<Vec<ScrapedPage>, RepositoryError> {
        let mut saved = Vec::with_capacity(pages.len());

        for page in pages {
            let mut model: page_entity::ActiveModel = page.clone().into();
            model.updated_at = Set(Utc::now().into());

            page_entity::Entity::insert(model)
                .on_conflict(
                    OnConflict::columns([
                        page_entity::Column::WebsiteProfileId,
                        page_entity::Column::Url,
                    ])
                    .update_columns([
                        page_entity::Column::PageType,
                        page_entity::Column::Context,
                        page_entity::Column::UpdatedAt,
                    ])
                    .to_owned(),
                )
                .exec_without_returning(self.db.as_ref())
                .await?;

            // Conflicts keep the existing row id, read the canonical row back
            let model = page_entity::Entity::find()
                .filter(page_entity::Column::WebsiteProfileId.eq(page.website_profile_id))
                .filter(page_entity::Column::Url.eq(page.url.as_str()))
                .one(self.db.as_ref())
                .await?
                .ok_or(RepositoryError::NotFound)?;

            saved.push(model.into());
        }

        Ok(saved)
    }

    async fn find_by_profile(
        &self,
        website_profile_id: Uuid,
    ) -> Result<Vec<ScrapedPage>, RepositoryError> {
        let models = page_entity::Entity::find()
            .filter(page_entity::Column::WebsiteProfileId.eq(website_profile_id))
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(ScrapedPage::from).collect())
    }
}
