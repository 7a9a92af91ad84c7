use sea_orm::entity::prelude::*;

/// One scheduled run of a line. Trip codes are externally assigned and
/// act as the primary identity; timestamps are stored UTC-naive.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "trips")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub trip_code: String,
    pub line_id: i32,
    pub scheduled_departure: DateTime,
    pub vehicle_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::line::Entity",
        from = "Column::LineId",
        to = "super::line::Column::LineId",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Line,
    #[sea_orm(has_many = "super::stop_event::Entity")]
    StopEvent,
}

impl Related<super::line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Line.def()
    }
}

impl Related<super::stop_event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StopEvent.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
