//! Seed helpers inserting transit fixtures directly through the entity
//! layer, bypassing repository validation so tests control their data.

pub mod factory;

use chrono::NaiveDateTime;
use entity::line::VehicleType;
use sea_orm::{ActiveModelTrait, DatabaseConnection};

use crate::error::TestError;

pub async fn insert_line(
    db: &DatabaseConnection,
    line_name: &str,
    vehicle_type: VehicleType,
) -> Result<entity::line::Model, TestError> {
    let line = factory::line(line_name, vehicle_type).insert(db).await?;

    Ok(line)
}

pub async fn insert_stop(
    db: &DatabaseConnection,
    stop_name: &str,
    latitude: f64,
    longitude: f64,
) -> Result<entity::stop::Model, TestError> {
    let stop = factory::stop(stop_name, latitude, longitude)
        .insert(db)
        .await?;

    Ok(stop)
}

pub async fn insert_line_stop(
    db: &DatabaseConnection,
    line_id: i32,
    stop_id: i32,
    sequence_number: i32,
    time_offset_minutes: i32,
) -> Result<entity::line_stop::Model, TestError> {
    let line_stop = factory::line_stop(line_id, stop_id, sequence_number, time_offset_minutes)
        .insert(db)
        .await?;

    Ok(line_stop)
}

pub async fn insert_trip(
    db: &DatabaseConnection,
    trip_code: &str,
    line_id: i32,
    scheduled_departure: NaiveDateTime,
) -> Result<entity::trip::Model, TestError> {
    let trip = factory::trip(trip_code, line_id, scheduled_departure)
        .insert(db)
        .await?;

    Ok(trip)
}

#[allow(clippy::too_many_arguments)]
pub async fn insert_stop_event(
    db: &DatabaseConnection,
    trip_code: &str,
    stop_id: i32,
    scheduled_time: NaiveDateTime,
    actual_time: NaiveDateTime,
    passengers_on: i32,
    passengers_off: i32,
) -> Result<entity::stop_event::Model, TestError> {
    let event = factory::stop_event(
        trip_code,
        stop_id,
        scheduled_time,
        actual_time,
        passengers_on,
        passengers_off,
    )
    .insert(db)
    .await?;

    Ok(event)
}
