use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Line::Table)
                    .if_not_exists()
                    .col(pk_auto(Line::LineId))
                    .col(string_uniq(Line::LineName))
                    .col(
                        string_len(Line::VehicleType, 8)
                            .check(Expr::col(Line::VehicleType).is_in(["rail", "bus"])),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Line::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Line {
    #[sea_orm(iden = "lines")]
    Table,
    LineId,
    LineName,
    VehicleType,
}
