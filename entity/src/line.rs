use sea_orm::entity::prelude::*;

/// Vehicle category a line is operated with. Stored as a short string.
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(8))")]
pub enum VehicleType {
    #[sea_orm(string_value = "rail")]
    Rail,
    #[sea_orm(string_value = "bus")]
    Bus,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "lines")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub line_id: i32,
    #[sea_orm(unique)]
    pub line_name: String,
    pub vehicle_type: VehicleType,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::line_stop::Entity")]
    LineStop,
    #[sea_orm(has_many = "super::trip::Entity")]
    Trip,
}

impl Related<super::line_stop::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LineStop.def()
    }
}

impl Related<super::trip::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Trip.def()
    }
}

impl Related<super::stop::Entity> for Entity {
    fn to() -> RelationDef {
        super::line_stop::Relation::Stop.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::line_stop::Relation::Line.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
