use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WebsiteProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WebsiteProfiles::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(WebsiteProfiles::Domain).string().not_null())
                    .col(ColumnDef::new(WebsiteProfiles::BusinessOverview).text())
                    .col(ColumnDef::new(WebsiteProfiles::Icps).json().not_null())
                    .col(
                        ColumnDef::new(WebsiteProfiles::SeedKeywords)
                            .json()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WebsiteProfiles::ValidatedKeywordIds)
                            .json()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WebsiteProfiles::RelevantKeywordIds)
                            .json()
                            .not_null(),
                    )
                    .col(ColumnDef::new(WebsiteProfiles::LastScrapedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(WebsiteProfiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(WebsiteProfiles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_website_profiles_domain")
                    .table(WebsiteProfiles::Table)
                    .col(WebsiteProfiles::Domain)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WebsiteProfiles::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum WebsiteProfiles {
    Table,
    Id,
    Domain,
    BusinessOverview,
    Icps,
    SeedKeywords,
    ValidatedKeywordIds,
    RelevantKeywordIds,
    LastScrapedAt,
    CreatedAt,
    UpdatedAt,
}
