use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ScrapedPages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ScrapedPages::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ScrapedPages::WebsiteProfileId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ScrapedPages::Url).string().not_null())
                    .col(ColumnDef::new(ScrapedPages::PageType).string().not_null())
                    .col(ColumnDef::new(ScrapedPages::Context).json().not_null())
                    .col(
                        ColumnDef::new(ScrapedPages::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ScrapedPages::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Pages are upserted by (profile, url)
        manager
            .create_index(
                Index::create()
                    .name("idx_scraped_pages_profile_url")
                    .table(ScrapedPages::Table)
                    .col(ScrapedPages::WebsiteProfileId)
                    .col(ScrapedPages::Url)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ScrapedPages::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ScrapedPages {
    Table,
    Id,
    WebsiteProfileId,
    Url,
    PageType,
    Context,
    CreatedAt,
    UpdatedAt,
}
