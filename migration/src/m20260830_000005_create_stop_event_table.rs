use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260830_000002_create_stop_table::Stop;
use crate::m20260830_000004_create_trip_table::Trip;

static IDX_STOP_EVENT_TRIP_SCHEDULED: &str = "idx_stop_event_trip_scheduled";
static IDX_STOP_EVENT_STOP: &str = "idx_stop_event_stop";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StopEvent::Table)
                    .if_not_exists()
                    .col(pk_auto(StopEvent::EventId))
                    .col(string(StopEvent::TripCode))
                    .col(integer(StopEvent::StopId))
                    .col(timestamp(StopEvent::ScheduledTime))
                    .col(timestamp(StopEvent::ActualTime))
                    .col(
                        integer(StopEvent::PassengersOn)
                            .check(Expr::col(StopEvent::PassengersOn).gte(0)),
                    )
                    .col(
                        integer(StopEvent::PassengersOff)
                            .check(Expr::col(StopEvent::PassengersOff).gte(0)),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stop_event_trip")
                            .from(StopEvent::Table, StopEvent::TripCode)
                            .to(Trip::Table, Trip::TripCode)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stop_event_stop")
                            .from(StopEvent::Table, StopEvent::StopId)
                            .to(Stop::Table, Stop::StopId)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_STOP_EVENT_TRIP_SCHEDULED)
                    .table(StopEvent::Table)
                    .col(StopEvent::TripCode)
                    .col(StopEvent::ScheduledTime)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_STOP_EVENT_STOP)
                    .table(StopEvent::Table)
                    .col(StopEvent::StopId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_STOP_EVENT_TRIP_SCHEDULED)
                    .table(StopEvent::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_STOP_EVENT_STOP)
                    .table(StopEvent::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(StopEvent::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum StopEvent {
    #[sea_orm(iden = "stop_events")]
    Table,
    EventId,
    TripCode,
    StopId,
    ScheduledTime,
    ActualTime,
    PassengersOn,
    PassengersOff,
}
