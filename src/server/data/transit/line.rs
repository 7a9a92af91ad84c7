use entity::line::VehicleType;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, ExprTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, SqlErr,
};

use crate::server::error::store::StoreError;

pub struct LineRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> LineRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Create a line. The name must not already exist; the vehicle type is
    /// constrained by construction of [`VehicleType`].
    pub async fn create(
        &self,
        line_name: &str,
        vehicle_type: VehicleType,
    ) -> Result<entity::line::Model, StoreError> {
        let line = entity::line::ActiveModel {
            line_name: ActiveValue::Set(line_name.to_owned()),
            vehicle_type: ActiveValue::Set(vehicle_type),
            ..Default::default()
        };

        line.insert(self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => StoreError::constraint(
                "line_name",
                format!("line name {line_name:?} already exists"),
            ),
            _ => StoreError::Database(e),
        })
    }

    pub async fn find_by_id(&self, line_id: i32) -> Result<Option<entity::line::Model>, DbErr> {
        entity::prelude::Line::find_by_id(line_id).one(self.db).await
    }

    pub async fn find_by_name(
        &self,
        line_name: &str,
    ) -> Result<Option<entity::line::Model>, DbErr> {
        entity::prelude::Line::find()
            .filter(entity::line::Column::LineName.eq(line_name))
            .one(self.db)
            .await
    }

    pub async fn list(&self) -> Result<Vec<entity::line::Model>, DbErr> {
        entity::prelude::Line::find()
            .order_by_asc(entity::line::Column::LineName)
            .all(self.db)
            .await
    }

    /// Lines whose itinerary includes both named stops, by line name.
    ///
    /// (line_id, stop_id) is the primary key of line_stops and stop names
    /// are unique, so two distinct matching names yield exactly two rows
    /// per qualifying line.
    pub async fn serving_both_stops(
        &self,
        first_stop: &str,
        second_stop: &str,
    ) -> Result<Vec<entity::line::Model>, DbErr> {
        entity::prelude::Line::find()
            .join(JoinType::InnerJoin, entity::line::Relation::LineStop.def())
            .join(JoinType::InnerJoin, entity::line_stop::Relation::Stop.def())
            .filter(entity::stop::Column::StopName.is_in([first_stop, second_stop]))
            .group_by(entity::line::Column::LineId)
            .having(Expr::expr(entity::line_stop::Column::StopId.count()).eq(2))
            .order_by_asc(entity::line::Column::LineName)
            .all(self.db)
            .await
    }

    /// Delete a line. Rejected while any stop assignment or trip still
    /// references it, so historical data is never orphaned.
    pub async fn delete(&self, line_id: i32) -> Result<(), StoreError> {
        let assignments = entity::prelude::LineStop::find()
            .filter(entity::line_stop::Column::LineId.eq(line_id))
            .count(self.db)
            .await?;
        if assignments > 0 {
            return Err(StoreError::ReferentialRestriction {
                entity: "line",
                key: line_id.to_string(),
                dependent_table: "line_stops",
                dependents: assignments,
            });
        }

        let trips = entity::prelude::Trip::find()
            .filter(entity::trip::Column::LineId.eq(line_id))
            .count(self.db)
            .await?;
        if trips > 0 {
            return Err(StoreError::ReferentialRestriction {
                entity: "line",
                key: line_id.to_string(),
                dependent_table: "trips",
                dependents: trips,
            });
        }

        entity::prelude::Line::delete_by_id(line_id)
            .exec(self.db)
            .await?;

        Ok(())
    }
}
