use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, SqlErr,
};

use crate::server::error::store::StoreError;

pub struct LineStopRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> LineStopRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Assign a stop to a line at a sequence position.
    ///
    /// Sequence numbers start at 1 and are unique within a line; the time
    /// offset is minutes from line start and must not be negative. Both the
    /// line and the stop must already exist. No ordering between sequence
    /// number and offset is enforced, that is up to the importer.
    pub async fn assign(
        &self,
        line_id: i32,
        stop_id: i32,
        sequence_number: i32,
        time_offset_minutes: i32,
    ) -> Result<entity::line_stop::Model, StoreError> {
        if sequence_number < 1 {
            return Err(StoreError::constraint(
                "sequence_number",
                format!("sequence number {sequence_number} must be >= 1"),
            ));
        }
        if time_offset_minutes < 0 {
            return Err(StoreError::constraint(
                "time_offset_minutes",
                format!("time offset {time_offset_minutes} must be >= 0"),
            ));
        }

        if entity::prelude::Line::find_by_id(line_id)
            .one(self.db)
            .await?
            .is_none()
        {
            return Err(StoreError::foreign_key("line", line_id));
        }
        if entity::prelude::Stop::find_by_id(stop_id)
            .one(self.db)
            .await?
            .is_none()
        {
            return Err(StoreError::foreign_key("stop", stop_id));
        }

        let taken = entity::prelude::LineStop::find()
            .filter(entity::line_stop::Column::LineId.eq(line_id))
            .filter(entity::line_stop::Column::SequenceNumber.eq(sequence_number))
            .count(self.db)
            .await?;
        if taken > 0 {
            return Err(StoreError::constraint(
                "sequence_number",
                format!("sequence number {sequence_number} already used on line {line_id}"),
            ));
        }

        let line_stop = entity::line_stop::ActiveModel {
            line_id: ActiveValue::Set(line_id),
            stop_id: ActiveValue::Set(stop_id),
            sequence_number: ActiveValue::Set(sequence_number),
            time_offset_minutes: ActiveValue::Set(time_offset_minutes),
        };

        line_stop
            .insert(self.db)
            .await
            .map_err(|e| match e.sql_err() {
                // Covers both the (line_id, stop_id) primary key and the
                // (line_id, sequence_number) unique index under races.
                Some(SqlErr::UniqueConstraintViolation(_)) => StoreError::constraint(
                    "sequence_number",
                    format!("stop {stop_id} or sequence {sequence_number} already assigned on line {line_id}"),
                ),
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                    StoreError::foreign_key("line or stop", format!("({line_id}, {stop_id})"))
                }
                _ => StoreError::Database(e),
            })
    }

    pub async fn find(
        &self,
        line_id: i32,
        stop_id: i32,
    ) -> Result<Option<entity::line_stop::Model>, DbErr> {
        entity::prelude::LineStop::find_by_id((line_id, stop_id))
            .one(self.db)
            .await
    }

    /// Move an existing assignment to a new sequence position and offset.
    ///
    /// Same validation as [`Self::assign`], except the assignment's own row
    /// does not count against sequence uniqueness.
    pub async fn update_position(
        &self,
        line_id: i32,
        stop_id: i32,
        sequence_number: i32,
        time_offset_minutes: i32,
    ) -> Result<entity::line_stop::Model, StoreError> {
        if sequence_number < 1 {
            return Err(StoreError::constraint(
                "sequence_number",
                format!("sequence number {sequence_number} must be >= 1"),
            ));
        }
        if time_offset_minutes < 0 {
            return Err(StoreError::constraint(
                "time_offset_minutes",
                format!("time offset {time_offset_minutes} must be >= 0"),
            ));
        }

        let taken = entity::prelude::LineStop::find()
            .filter(entity::line_stop::Column::LineId.eq(line_id))
            .filter(entity::line_stop::Column::SequenceNumber.eq(sequence_number))
            .filter(entity::line_stop::Column::StopId.ne(stop_id))
            .count(self.db)
            .await?;
        if taken > 0 {
            return Err(StoreError::constraint(
                "sequence_number",
                format!("sequence number {sequence_number} already used on line {line_id}"),
            ));
        }

        let line_stop = entity::line_stop::ActiveModel {
            line_id: ActiveValue::Unchanged(line_id),
            stop_id: ActiveValue::Unchanged(stop_id),
            sequence_number: ActiveValue::Set(sequence_number),
            time_offset_minutes: ActiveValue::Set(time_offset_minutes),
        };

        line_stop
            .update(self.db)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => StoreError::constraint(
                    "sequence_number",
                    format!("sequence number {sequence_number} already used on line {line_id}"),
                ),
                _ => StoreError::Database(e),
            })
    }

    /// Ordered itinerary of a line: every assigned stop with its sequence
    /// number and time offset, ordered by sequence number.
    pub async fn itinerary(
        &self,
        line_id: i32,
    ) -> Result<Vec<(entity::line_stop::Model, entity::stop::Model)>, DbErr> {
        let rows = entity::prelude::LineStop::find()
            .filter(entity::line_stop::Column::LineId.eq(line_id))
            .find_also_related(entity::prelude::Stop)
            .order_by_asc(entity::line_stop::Column::SequenceNumber)
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(line_stop, stop)| stop.map(|stop| (line_stop, stop)))
            .collect())
    }
}
