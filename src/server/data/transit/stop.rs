use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, ExprTrait, FromQueryResult, JoinType, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, SqlErr,
};

use crate::server::error::store::StoreError;

/// A stop served by two or more lines.
#[derive(Debug, FromQueryResult)]
pub struct TransferStop {
    pub stop_name: String,
    pub line_count: i64,
}

pub struct StopRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> StopRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Create a stop. Coordinates are validated against WGS84 ranges and
    /// the name must not already exist.
    pub async fn create(
        &self,
        stop_name: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<entity::stop::Model, StoreError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(StoreError::constraint(
                "latitude",
                format!("latitude {latitude} outside [-90, 90]"),
            ));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(StoreError::constraint(
                "longitude",
                format!("longitude {longitude} outside [-180, 180]"),
            ));
        }

        let stop = entity::stop::ActiveModel {
            stop_name: ActiveValue::Set(stop_name.to_owned()),
            latitude: ActiveValue::Set(latitude),
            longitude: ActiveValue::Set(longitude),
            ..Default::default()
        };

        stop.insert(self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => StoreError::constraint(
                "stop_name",
                format!("stop name {stop_name:?} already exists"),
            ),
            _ => StoreError::Database(e),
        })
    }

    pub async fn find_by_id(&self, stop_id: i32) -> Result<Option<entity::stop::Model>, DbErr> {
        entity::prelude::Stop::find_by_id(stop_id).one(self.db).await
    }

    pub async fn find_by_name(
        &self,
        stop_name: &str,
    ) -> Result<Option<entity::stop::Model>, DbErr> {
        entity::prelude::Stop::find()
            .filter(entity::stop::Column::StopName.eq(stop_name))
            .one(self.db)
            .await
    }

    pub async fn list(&self) -> Result<Vec<entity::stop::Model>, DbErr> {
        entity::prelude::Stop::find()
            .order_by_asc(entity::stop::Column::StopName)
            .all(self.db)
            .await
    }

    /// Delete a stop. Rejected while any line assignment or stop event
    /// still references it.
    pub async fn delete(&self, stop_id: i32) -> Result<(), StoreError> {
        let assignments = entity::prelude::LineStop::find()
            .filter(entity::line_stop::Column::StopId.eq(stop_id))
            .count(self.db)
            .await?;
        if assignments > 0 {
            return Err(StoreError::ReferentialRestriction {
                entity: "stop",
                key: stop_id.to_string(),
                dependent_table: "line_stops",
                dependents: assignments,
            });
        }

        let events = entity::prelude::StopEvent::find()
            .filter(entity::stop_event::Column::StopId.eq(stop_id))
            .count(self.db)
            .await?;
        if events > 0 {
            return Err(StoreError::ReferentialRestriction {
                entity: "stop",
                key: stop_id.to_string(),
                dependent_table: "stop_events",
                dependents: events,
            });
        }

        entity::prelude::Stop::delete_by_id(stop_id)
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Stops served by at least two lines, busiest transfer points first.
    ///
    /// (line_id, stop_id) is the primary key of line_stops, so a plain row
    /// count per stop already counts distinct lines.
    pub async fn transfer_stops(&self) -> Result<Vec<TransferStop>, DbErr> {
        entity::prelude::LineStop::find()
            .select_only()
            .column_as(entity::stop::Column::StopName, "stop_name")
            .column_as(entity::line_stop::Column::LineId.count(), "line_count")
            .join(JoinType::InnerJoin, entity::line_stop::Relation::Stop.def())
            .group_by(entity::stop::Column::StopId)
            .group_by(entity::stop::Column::StopName)
            .having(Expr::expr(entity::line_stop::Column::LineId.count()).gte(2))
            .order_by_desc(Expr::col(sea_orm::sea_query::Alias::new("line_count")))
            .order_by_asc(entity::stop::Column::StopName)
            .into_model::<TransferStop>()
            .all(self.db)
            .await
    }
}
