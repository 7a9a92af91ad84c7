use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Stop::Table)
                    .if_not_exists()
                    .col(pk_auto(Stop::StopId))
                    .col(string_uniq(Stop::StopName))
                    .col(
                        double(Stop::Latitude)
                            .check(Expr::col(Stop::Latitude).between(-90.0, 90.0)),
                    )
                    .col(
                        double(Stop::Longitude)
                            .check(Expr::col(Stop::Longitude).between(-180.0, 180.0)),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Stop::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Stop {
    #[sea_orm(iden = "stops")]
    Table,
    StopId,
    StopName,
    Latitude,
    Longitude,
}
