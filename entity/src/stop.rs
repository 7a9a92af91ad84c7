use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "stops")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub stop_id: i32,
    #[sea_orm(unique)]
    pub stop_name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::line_stop::Entity")]
    LineStop,
    #[sea_orm(has_many = "super::stop_event::Entity")]
    StopEvent,
}

impl Related<super::line_stop::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LineStop.def()
    }
}

impl Related<super::stop_event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StopEvent.def()
    }
}

impl Related<super::line::Entity> for Entity {
    fn to() -> RelationDef {
        super::line_stop::Relation::Line.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::line_stop::Relation::Stop.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
