// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::scrape_job::{ScrapeJob, ScrapeJobStatus};
use crate::domain::repositories::scrape_job_repository::{RepositoryError, ScrapeJobRepository};
use crate::infrastructure::database::entities::scrape_job as job_entity;
use async_trait::async_trait;
use chrono::{DateTime, Duration, FixedOffset, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use std::sync::Arc;
use uuid::Uuid;

/// 抓取任务仓库实现
///
/// 基于SeaORM实现的抓取任务数据访问层。认领通过单条条件UPDATE
/// 完成，由数据库保证线性化：并发认领同一任务时恰有一方的条件
/// 命中，另一方影响零行。
#[derive(Clone)]
pub struct ScrapeJobRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl ScrapeJobRepositoryImpl {
    /// 创建新的抓取任务仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// 可认领谓词：Processing 且从未认领或认领已过期
    fn claimable_condition(cutoff: DateTime<FixedOffset>) -> Condition {
        Condition::all()
            .add(job_entity::Column::Status.eq(ScrapeJobStatus::Processing.to_string()))
            .add(
                Condition::any()
                    .add(job_entity::Column::ProcessingStartedAt.is_null())
                    .add(job_entity::Column::ProcessingStartedAt.lt(cutoff)),
            )
    }
}

impl From<job_entity::Model> for ScrapeJob {
    fn from(model: job_entity::Model) -> Self {
        Self {
            id: model.id,
            website_profile_id: model.website_profile_id,
            domain: model.domain,
            status: model.status.parse().unwrap_or_default(),
            vendor_job_id: model.vendor_job_id,
            processing_started_at: model.processing_started_at,
            result_page_ids: serde_json::from_value(model.result_page_ids).unwrap_or_default(),
            error: model.error,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<ScrapeJob> for job_entity::ActiveModel {
    fn from(job: ScrapeJob) -> Self {
        Self {
            id: Set(job.id),
            website_profile_id: Set(job.website_profile_id),
            domain: Set(job.domain.clone()),
            status: Set(job.status.to_string()),
            vendor_job_id: Set(job.vendor_job_id.clone()),
            processing_started_at: Set(job.processing_started_at),
            result_page_ids: Set(serde_json::to_value(&job.result_page_ids)
                .unwrap_or_else(|_| serde_json::Value::Array(Vec::new()))),
            error: Set(job.error.clone()),
            created_at: Set(job.created_at),
            updated_at: Set(job.updated_at),
        }
    }
}

#[async_trait]
impl ScrapeJobRepository for ScrapeJobRepositoryImpl {
    async fn create(&self, job: &ScrapeJob) -> Result<ScrapeJob, RepositoryError> {
        let model: job_entity::ActiveModel = job.clone().into();

        model.insert(self.db.as_ref()).await?;
        Ok(job.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ScrapeJob>, RepositoryError> {
        let model = job_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn find_latest_by_profile(
        &self,
        website_profile_id: Uuid,
    ) -> Result<Option<ScrapeJob>, RepositoryError> {
        let model = job_entity::Entity::find()
            .filter(job_entity::Column::WebsiteProfileId.eq(website_profile_id))
            .order_by_desc(job_entity::Column::CreatedAt)
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn update(&self, job: &ScrapeJob) -> Result<ScrapeJob, RepositoryError> {
        let mut model: job_entity::ActiveModel = job.clone().into();
        model.updated_at = Set(Utc::now().into());

        let updated = model.update(self.db.as_ref()).await?;
        Ok(updated.into())
    }

    async fn claim(
        &self,
        id: Uuid,
        stale_threshold: Duration,
    ) -> Result<Option<ScrapeJob>, RepositoryError> {
        let now: DateTime<FixedOffset> = Utc::now().into();
        let cutoff: DateTime<FixedOffset> = (Utc::now() - stale_threshold).into();

        let result = job_entity::Entity::update_many()
            .col_expr(
                job_entity::Column::ProcessingStartedAt,
                Expr::value::<Option<DateTime<FixedOffset>>>(Some(now)),
            )
            .col_expr(job_entity::Column::UpdatedAt, Expr::value(now))
            .filter(job_entity::Column::Id.eq(id))
            .filter(Self::claimable_condition(cutoff))
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    async fn find_claimable(
        &self,
        stale_threshold: Duration,
        limit: u64,
    ) -> Result<Vec<ScrapeJob>, RepositoryError> {
        let cutoff: DateTime<FixedOffset> = (Utc::now() - stale_threshold).into();

        let models = job_entity::Entity::find()
            .filter(Self::claimable_condition(cutoff))
            .order_by_asc(job_entity::Column::CreatedAt)
            .limit(limit)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(ScrapeJob::from).collect())
    }
}
