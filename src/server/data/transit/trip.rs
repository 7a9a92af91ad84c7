use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr,
};

use crate::server::error::store::StoreError;

pub struct TripRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TripRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Create a trip for a line. The trip code is the externally assigned
    /// primary identity and must be globally unique.
    pub async fn create(
        &self,
        trip_code: &str,
        line_id: i32,
        scheduled_departure: NaiveDateTime,
        vehicle_id: &str,
    ) -> Result<entity::trip::Model, StoreError> {
        if entity::prelude::Line::find_by_id(line_id)
            .one(self.db)
            .await?
            .is_none()
        {
            return Err(StoreError::foreign_key("line", line_id));
        }

        let trip = entity::trip::ActiveModel {
            trip_code: ActiveValue::Set(trip_code.to_owned()),
            line_id: ActiveValue::Set(line_id),
            scheduled_departure: ActiveValue::Set(scheduled_departure),
            vehicle_id: ActiveValue::Set(vehicle_id.to_owned()),
        };

        trip.insert(self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => StoreError::PrimaryKeyViolation {
                entity: "trip",
                key: trip_code.to_owned(),
            },
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                StoreError::foreign_key("line", line_id)
            }
            _ => StoreError::Database(e),
        })
    }

    pub async fn find_by_code(&self, trip_code: &str) -> Result<Option<entity::trip::Model>, DbErr> {
        entity::prelude::Trip::find_by_id(trip_code.to_owned())
            .one(self.db)
            .await
    }

    /// Trips of a line departing within `[from, to)`, earliest first.
    pub async fn in_window(
        &self,
        line_id: i32,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<entity::trip::Model>, DbErr> {
        entity::prelude::Trip::find()
            .filter(entity::trip::Column::LineId.eq(line_id))
            .filter(entity::trip::Column::ScheduledDeparture.gte(from))
            .filter(entity::trip::Column::ScheduledDeparture.lt(to))
            .order_by_asc(entity::trip::Column::ScheduledDeparture)
            .all(self.db)
            .await
    }

    /// Most recent trips of a line by scheduled departure, newest first,
    /// bounded by `limit`.
    pub async fn recent_by_line(
        &self,
        line_id: i32,
        limit: u64,
    ) -> Result<Vec<entity::trip::Model>, DbErr> {
        entity::prelude::Trip::find()
            .filter(entity::trip::Column::LineId.eq(line_id))
            .order_by_desc(entity::trip::Column::ScheduledDeparture)
            .limit(limit)
            .all(self.db)
            .await
    }

    /// Delete a trip. Rejected while stop events still reference it.
    pub async fn delete(&self, trip_code: &str) -> Result<(), StoreError> {
        let events = entity::prelude::StopEvent::find()
            .filter(entity::stop_event::Column::TripCode.eq(trip_code))
            .count(self.db)
            .await?;
        if events > 0 {
            return Err(StoreError::ReferentialRestriction {
                entity: "trip",
                key: trip_code.to_owned(),
                dependent_table: "stop_events",
                dependents: events,
            });
        }

        entity::prelude::Trip::delete_by_id(trip_code.to_owned())
            .exec(self.db)
            .await?;

        Ok(())
    }
}
