//! Create `airline` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Airline::Table)
                    .if_not_exists()
                    .col(uuid(Airline::Id).primary_key())
                    .col(string_len(Airline::Name, 255).not_null())
                    .col(text(Airline::Description).not_null())
                    .col(date(Airline::FoundedOn).not_null())
                    .col(string_len(Airline::Website, 512).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Airline::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Airline {
    Table,
    Id,
    Name,
    Description,
    FoundedOn,
    Website,
}
