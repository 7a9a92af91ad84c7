use sea_orm::entity::prelude::*;

/// Ordered assignment of a stop to a line. Sequence numbers are unique
/// per line; the time offset is minutes from the start of the line.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "line_stops")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub line_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub stop_id: i32,
    pub sequence_number: i32,
    pub time_offset_minutes: i32,
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
    #[sea_orm(
        belongs_to = "super::stop::Entity",
        from = "Column::StopId",
        to = "super::stop::Column::StopId",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Stop,
}

impl Related<super::line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Line.def()
    }
}

impl Related<super::stop::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Stop.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
