use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260830_000001_create_line_table::Line;

static IDX_TRIP_LINE_DEPARTURE: &str = "idx_trip_line_departure";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Trip::Table)
                    .if_not_exists()
                    .col(string(Trip::TripCode).primary_key())
                    .col(integer(Trip::LineId))
                    .col(timestamp(Trip::ScheduledDeparture))
                    .col(string(Trip::VehicleId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_trip_line")
                            .from(Trip::Table, Trip::LineId)
                            .to(Line::Table, Line::LineId)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_TRIP_LINE_DEPARTURE)
                    .table(Trip::Table)
                    .col(Trip::LineId)
                    .col(Trip::ScheduledDeparture)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_TRIP_LINE_DEPARTURE)
                    .table(Trip::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Trip::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Trip {
    #[sea_orm(iden = "trips")]
    Table,
    TripCode,
    LineId,
    ScheduledDeparture,
    VehicleId,
}
