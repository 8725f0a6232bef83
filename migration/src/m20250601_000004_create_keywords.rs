use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Keywords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Keywords::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Keywords::Text).string().not_null())
                    .col(
                        ColumnDef::new(Keywords::SearchVolume)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Keywords::SearchVolumeRaw).string())
                    .col(ColumnDef::new(Keywords::Difficulty).string().not_null())
                    .col(ColumnDef::new(Keywords::LastUpdated).timestamp_with_time_zone())
                    .col(ColumnDef::new(Keywords::Provider).string())
                    .col(ColumnDef::new(Keywords::Source).json())
                    .col(
                        ColumnDef::new(Keywords::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Keywords::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Text is the natural key: keywords are upserted by text
        manager
            .create_index(
                Index::create()
                    .name("idx_keywords_text")
                    .table(Keywords::Table)
                    .col(Keywords::Text)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Keywords::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Keywords {
    Table,
    Id,
    Text,
    SearchVolume,
    SearchVolumeRaw,
    Difficulty,
    LastUpdated,
    Provider,
    Source,
    CreatedAt,
    UpdatedAt,
}
