use sea_orm::entity::prelude::*;

/// Realized visit of a trip at a stop. No uniqueness over (trip, stop):
/// re-visits and correction records are valid rows.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "stop_events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub event_id: i32,
    pub trip_code: String,
    pub stop_id: i32,
    pub scheduled_time: DateTime,
    pub actual_time: DateTime,
    pub passengers_on: i32,
    pub passengers_off: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::trip::Entity",
        from = "Column::TripCode",
        to = "super::trip::Column::TripCode",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Trip,
    #[sea_orm(
        belongs_to = "super::stop::Entity",
        from = "Column::StopId",
        to = "super::stop::Column::StopId",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Stop,
}

impl Related<super::trip::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Trip.def()
    }
}

impl Related<super::stop::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Stop.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
