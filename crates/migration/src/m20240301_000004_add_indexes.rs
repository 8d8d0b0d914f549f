use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Reverse lookup: airlines serving an airport
        manager
            .create_index(
                Index::create()
                    .name("idx_airline_airport_airport")
                    .table(AirlineAirport::Table)
                    .col(AirlineAirport::AirportId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_airport_code")
                    .table(Airport::Table)
                    .col(Airport::Code)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_airline_airport_airport").table(AirlineAirport::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_airport_code").table(Airport::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AirlineAirport { Table, AirportId }

#[derive(DeriveIden)]
enum Airport { Table, Code }
