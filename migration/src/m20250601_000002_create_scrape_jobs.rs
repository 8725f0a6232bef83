use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ScrapeJobs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ScrapeJobs::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ScrapeJobs::WebsiteProfileId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ScrapeJobs::Domain).string().not_null())
                    .col(ColumnDef::new(ScrapeJobs::Status).string().not_null())
                    .col(ColumnDef::new(ScrapeJobs::VendorJobId).string())
                    .col(ColumnDef::new(ScrapeJobs::ProcessingStartedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(ScrapeJobs::ResultPageIds)
                            .json()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ScrapeJobs::Error).text())
                    .col(
                        ColumnDef::new(ScrapeJobs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ScrapeJobs::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Claim/sweep queries filter on status + processing_started_at
        manager
            .create_index(
                Index::create()
                    .name("idx_scrape_jobs_status_started")
                    .table(ScrapeJobs::Table)
                    .col(ScrapeJobs::Status)
                    .col(ScrapeJobs::ProcessingStartedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_scrape_jobs_profile")
                    .table(ScrapeJobs::Table)
                    .col(ScrapeJobs::WebsiteProfileId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ScrapeJobs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ScrapeJobs {
    Table,
    Id,
    WebsiteProfileId,
    Domain,
    Status,
    VendorJobId,
    ProcessingStartedAt,
    ResultPageIds,
    Error,
    CreatedAt,
    UpdatedAt,
}
