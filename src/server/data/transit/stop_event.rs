use chrono::{Duration, NaiveDateTime};
use sea_orm::{
    sea_query::{Alias, Expr},
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbBackend, DbErr, EntityTrait,
    ExprTrait, FromQueryResult, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
    SqlErr,
};

use crate::server::error::store::StoreError;

/// A trip with the number of its stop events that ran late.
#[derive(Debug, PartialEq, Eq, FromQueryResult)]
pub struct DelayedTrip {
    pub trip_code: String,
    pub delayed_count: i64,
}

/// Boarding/alighting totals recorded at one stop.
#[derive(Debug, FromQueryResult)]
pub struct StopActivity {
    pub stop_name: String,
    pub passengers_on: i64,
    pub passengers_off: i64,
    pub total_activity: i64,
}

/// Average passengers per stop event on a line.
#[derive(Debug, FromQueryResult)]
pub struct LineRidership {
    pub line_name: String,
    pub avg_passengers: f64,
}

/// Count of delayed stop events attributed to a line.
#[derive(Debug, PartialEq, Eq, FromQueryResult)]
pub struct LineDelays {
    pub line_name: String,
    pub delay_count: i64,
}

/// Total boardings recorded at one stop.
#[derive(Debug, PartialEq, Eq, FromQueryResult)]
pub struct StopBoardings {
    pub stop_name: String,
    pub total_boardings: i64,
}

pub struct StopEventRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> StopEventRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Record a realized visit of a trip at a stop.
    ///
    /// Multiple events per (trip, stop) are allowed; re-visits and
    /// correction records are appended, never deduplicated.
    pub async fn record(
        &self,
        trip_code: &str,
        stop_id: i32,
        scheduled_time: NaiveDateTime,
        actual_time: NaiveDateTime,
        passengers_on: i32,
        passengers_off: i32,
    ) -> Result<entity::stop_event::Model, StoreError> {
        if passengers_on < 0 {
            return Err(StoreError::constraint(
                "passengers_on",
                format!("passenger count {passengers_on} must be >= 0"),
            ));
        }
        if passengers_off < 0 {
            return Err(StoreError::constraint(
                "passengers_off",
                format!("passenger count {passengers_off} must be >= 0"),
            ));
        }

        if entity::prelude::Trip::find_by_id(trip_code.to_owned())
            .one(self.db)
            .await?
            .is_none()
        {
            return Err(StoreError::foreign_key("trip", trip_code));
        }
        if entity::prelude::Stop::find_by_id(stop_id)
            .one(self.db)
            .await?
            .is_none()
        {
            return Err(StoreError::foreign_key("stop", stop_id));
        }

        let event = entity::stop_event::ActiveModel {
            trip_code: ActiveValue::Set(trip_code.to_owned()),
            stop_id: ActiveValue::Set(stop_id),
            scheduled_time: ActiveValue::Set(scheduled_time),
            actual_time: ActiveValue::Set(actual_time),
            passengers_on: ActiveValue::Set(passengers_on),
            passengers_off: ActiveValue::Set(passengers_off),
            ..Default::default()
        };

        event.insert(self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                StoreError::foreign_key("trip or stop", format!("({trip_code}, {stop_id})"))
            }
            _ => StoreError::Database(e),
        })
    }

    /// Stop events of a trip in scheduled chronological order.
    pub async fn for_trip(
        &self,
        trip_code: &str,
    ) -> Result<Vec<entity::stop_event::Model>, DbErr> {
        entity::prelude::StopEvent::find()
            .filter(entity::stop_event::Column::TripCode.eq(trip_code))
            .order_by_asc(entity::stop_event::Column::ScheduledTime)
            .all(self.db)
            .await
    }

    /// Same as [`Self::for_trip`] but joined with the visited stops.
    pub async fn for_trip_with_stops(
        &self,
        trip_code: &str,
    ) -> Result<Vec<(entity::stop_event::Model, entity::stop::Model)>, DbErr> {
        let rows = entity::prelude::StopEvent::find()
            .filter(entity::stop_event::Column::TripCode.eq(trip_code))
            .find_also_related(entity::prelude::Stop)
            .order_by_asc(entity::stop_event::Column::ScheduledTime)
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(event, stop)| stop.map(|stop| (event, stop)))
            .collect())
    }

    /// Trips with at least `min_delayed` delayed stop events.
    ///
    /// An event is delayed when actual_time is strictly greater than
    /// scheduled_time. Grouped by trip code and counted in SQL; ordered by
    /// delayed count descending, then trip code.
    pub async fn delayed_trips(&self, min_delayed: u64) -> Result<Vec<DelayedTrip>, DbErr> {
        entity::prelude::StopEvent::find()
            .select_only()
            .column(entity::stop_event::Column::TripCode)
            .column_as(entity::stop_event::Column::EventId.count(), "delayed_count")
            .filter(
                Expr::col(entity::stop_event::Column::ActualTime)
                    .gt(Expr::col(entity::stop_event::Column::ScheduledTime)),
            )
            .group_by(entity::stop_event::Column::TripCode)
            .having(
                Expr::expr(entity::stop_event::Column::EventId.count()).gte(min_delayed as i64),
            )
            .order_by_desc(Expr::col(Alias::new("delayed_count")))
            .order_by_asc(entity::stop_event::Column::TripCode)
            .into_model::<DelayedTrip>()
            .all(self.db)
            .await
    }

    /// Like [`Self::delayed_trips`] but only counting events later than
    /// scheduled by more than `tolerance`.
    ///
    /// Timestamp-plus-interval syntax differs between the backends we run
    /// on, so the lateness predicate is built for the connection's backend.
    /// `tolerance` must not be negative.
    pub async fn delayed_trips_with_tolerance(
        &self,
        min_delayed: u64,
        tolerance: Duration,
    ) -> Result<Vec<DelayedTrip>, DbErr> {
        let seconds = tolerance.num_seconds();
        let late = match self.db.get_database_backend() {
            DbBackend::Sqlite => Expr::cust_with_values(
                "actual_time > datetime(scheduled_time, ?)",
                [format!("+{seconds} seconds")],
            ),
            _ => Expr::cust_with_values(
                "actual_time > scheduled_time + (? || ' seconds')::interval",
                [seconds.to_string()],
            ),
        };

        entity::prelude::StopEvent::find()
            .select_only()
            .column(entity::stop_event::Column::TripCode)
            .column_as(entity::stop_event::Column::EventId.count(), "delayed_count")
            .filter(late)
            .group_by(entity::stop_event::Column::TripCode)
            .having(
                Expr::expr(entity::stop_event::Column::EventId.count()).gte(min_delayed as i64),
            )
            .order_by_desc(Expr::col(Alias::new("delayed_count")))
            .order_by_asc(entity::stop_event::Column::TripCode)
            .into_model::<DelayedTrip>()
            .all(self.db)
            .await
    }

    /// Total boardings and alightings per stop, busiest first, bounded by
    /// `limit`.
    pub async fn busiest_stops(&self, limit: u64) -> Result<Vec<StopActivity>, DbErr> {
        Self::stop_activity_query()
            .order_by_desc(Expr::col(Alias::new("total_activity")))
            .order_by_asc(entity::stop::Column::StopName)
            .limit(limit)
            .into_model::<StopActivity>()
            .all(self.db)
            .await
    }

    /// Total boardings and alightings per stop across all stop events,
    /// ordered by stop name.
    pub async fn ridership_by_stop(&self) -> Result<Vec<StopActivity>, DbErr> {
        Self::stop_activity_query()
            .order_by_asc(entity::stop::Column::StopName)
            .into_model::<StopActivity>()
            .all(self.db)
            .await
    }

    /// Stops whose total boardings exceed the average of per-stop totals,
    /// busiest first.
    ///
    /// The average runs over the grouped totals, so it is computed here
    /// from one grouped query instead of a nested aggregate.
    pub async fn above_average_boarding_stops(&self) -> Result<Vec<StopBoardings>, DbErr> {
        let totals: Vec<StopBoardings> = entity::prelude::StopEvent::find()
            .select_only()
            .column_as(entity::stop::Column::StopName, "stop_name")
            .column_as(
                entity::stop_event::Column::PassengersOn.sum(),
                "total_boardings",
            )
            .join(JoinType::InnerJoin, entity::stop_event::Relation::Stop.def())
            .group_by(entity::stop::Column::StopId)
            .group_by(entity::stop::Column::StopName)
            .order_by_desc(Expr::col(Alias::new("total_boardings")))
            .order_by_asc(entity::stop::Column::StopName)
            .into_model::<StopBoardings>()
            .all(self.db)
            .await?;

        if totals.is_empty() {
            return Ok(totals);
        }

        let average =
            totals.iter().map(|s| s.total_boardings).sum::<i64>() as f64 / totals.len() as f64;

        Ok(totals
            .into_iter()
            .filter(|s| s.total_boardings as f64 > average)
            .collect())
    }

    /// Boarding/alighting totals across one trip's stop events.
    pub async fn ridership_by_trip(&self, trip_code: &str) -> Result<(i64, i64), DbErr> {
        let totals: Option<(Option<i64>, Option<i64>)> = entity::prelude::StopEvent::find()
            .select_only()
            .column_as(
                entity::stop_event::Column::PassengersOn.sum(),
                "passengers_on",
            )
            .column_as(
                entity::stop_event::Column::PassengersOff.sum(),
                "passengers_off",
            )
            .filter(entity::stop_event::Column::TripCode.eq(trip_code))
            .into_tuple()
            .one(self.db)
            .await?;

        let (on, off) = totals.unwrap_or((None, None));
        Ok((on.unwrap_or(0), off.unwrap_or(0)))
    }

    /// Average passengers (boarding + alighting) per stop event for each
    /// line, ordered by line name.
    pub async fn average_ridership_by_line(&self) -> Result<Vec<LineRidership>, DbErr> {
        entity::prelude::StopEvent::find()
            .select_only()
            .column_as(entity::line::Column::LineName, "line_name")
            .column_as(
                Expr::expr(
                    Expr::col(entity::stop_event::Column::PassengersOn)
                        .add(Expr::col(entity::stop_event::Column::PassengersOff)),
                )
                .avg()
                .cast_as(Alias::new("double precision")),
                "avg_passengers",
            )
            .join(JoinType::InnerJoin, entity::stop_event::Relation::Trip.def())
            .join(JoinType::InnerJoin, entity::trip::Relation::Line.def())
            .group_by(entity::line::Column::LineName)
            .order_by_asc(entity::line::Column::LineName)
            .into_model::<LineRidership>()
            .all(self.db)
            .await
    }

    /// Strictly delayed stop events attributed per line, worst first.
    pub async fn delays_by_line(&self) -> Result<Vec<LineDelays>, DbErr> {
        entity::prelude::StopEvent::find()
            .select_only()
            .column_as(entity::line::Column::LineName, "line_name")
            .column_as(entity::stop_event::Column::EventId.count(), "delay_count")
            .filter(
                Expr::col(entity::stop_event::Column::ActualTime)
                    .gt(Expr::col(entity::stop_event::Column::ScheduledTime)),
            )
            .join(JoinType::InnerJoin, entity::stop_event::Relation::Trip.def())
            .join(JoinType::InnerJoin, entity::trip::Relation::Line.def())
            .group_by(entity::line::Column::LineName)
            .order_by_desc(Expr::col(Alias::new("delay_count")))
            .order_by_asc(entity::line::Column::LineName)
            .into_model::<LineDelays>()
            .all(self.db)
            .await
    }

    fn total_activity_expr() -> sea_orm::sea_query::SimpleExpr {
        Expr::expr(
            Expr::col(entity::stop_event::Column::PassengersOn)
                .add(Expr::col(entity::stop_event::Column::PassengersOff)),
        )
        .sum()
    }

    fn stop_activity_query() -> sea_orm::Select<entity::prelude::StopEvent> {
        entity::prelude::StopEvent::find()
            .select_only()
            .column_as(entity::stop::Column::StopName, "stop_name")
            .column_as(
                entity::stop_event::Column::PassengersOn.sum(),
                "passengers_on",
            )
            .column_as(
                entity::stop_event::Column::PassengersOff.sum(),
                "passengers_off",
            )
            .column_as(Self::total_activity_expr(), "total_activity")
            .join(JoinType::InnerJoin, entity::stop_event::Relation::Stop.def())
            .group_by(entity::stop::Column::StopId)
            .group_by(entity::stop::Column::StopName)
    }
}
