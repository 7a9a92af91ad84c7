use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260830_000001_create_line_table::Line;
use crate::m20260830_000002_create_stop_table::Stop;

static IDX_LINE_STOP_LINE_SEQUENCE: &str = "idx_line_stop_line_sequence";
static IDX_LINE_STOP_STOP: &str = "idx_line_stop_stop";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LineStop::Table)
                    .if_not_exists()
                    .col(integer(LineStop::LineId))
                    .col(integer(LineStop::StopId))
                    .col(
                        integer(LineStop::SequenceNumber)
                            .check(Expr::col(LineStop::SequenceNumber).gte(1)),
                    )
                    .col(
                        integer(LineStop::TimeOffsetMinutes)
                            .check(Expr::col(LineStop::TimeOffsetMinutes).gte(0)),
                    )
                    .primary_key(
                        Index::create()
                            .col(LineStop::LineId)
                            .col(LineStop::StopId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_line_stop_line")
                            .from(LineStop::Table, LineStop::LineId)
                            .to(Line::Table, Line::LineId)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_line_stop_stop")
                            .from(LineStop::Table, LineStop::StopId)
                            .to(Stop::Table, Stop::StopId)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Stop order within a line is a set of unique positive integers.
        manager
            .create_index(
                Index::create()
                    .name(IDX_LINE_STOP_LINE_SEQUENCE)
                    .table(LineStop::Table)
                    .col(LineStop::LineId)
                    .col(LineStop::SequenceNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_LINE_STOP_STOP)
                    .table(LineStop::Table)
                    .col(LineStop::StopId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_LINE_STOP_LINE_SEQUENCE)
                    .table(LineStop::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_LINE_STOP_STOP)
                    .table(LineStop::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(LineStop::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum LineStop {
    #[sea_orm(iden = "line_stops")]
    Table,
    LineId,
    StopId,
    SequenceNumber,
    TimeOffsetMinutes,
}
