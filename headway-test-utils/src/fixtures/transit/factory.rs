use chrono::{NaiveDate, NaiveDateTime};
use entity::line::VehicleType;
use sea_orm::ActiveValue;

/// Timestamp on a fixed reference service day, `hh:mm` naive UTC.
pub fn service_time(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, 2)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

pub fn line(line_name: &str, vehicle_type: VehicleType) -> entity::line::ActiveModel {
    entity::line::ActiveModel {
        line_name: ActiveValue::Set(line_name.to_owned()),
        vehicle_type: ActiveValue::Set(vehicle_type),
        ..Default::default()
    }
}

pub fn stop(stop_name: &str, latitude: f64, longitude: f64) -> entity::stop::ActiveModel {
    entity::stop::ActiveModel {
        stop_name: ActiveValue::Set(stop_name.to_owned()),
        latitude: ActiveValue::Set(latitude),
        longitude: ActiveValue::Set(longitude),
        ..Default::default()
    }
}

pub fn line_stop(
    line_id: i32,
    stop_id: i32,
    sequence_number: i32,
    time_offset_minutes: i32,
) -> entity::line_stop::ActiveModel {
    entity::line_stop::ActiveModel {
        line_id: ActiveValue::Set(line_id),
        stop_id: ActiveValue::Set(stop_id),
        sequence_number: ActiveValue::Set(sequence_number),
        time_offset_minutes: ActiveValue::Set(time_offset_minutes),
    }
}

pub fn trip(
    trip_code: &str,
    line_id: i32,
    scheduled_departure: NaiveDateTime,
) -> entity::trip::ActiveModel {
    entity::trip::ActiveModel {
        trip_code: ActiveValue::Set(trip_code.to_owned()),
        line_id: ActiveValue::Set(line_id),
        scheduled_departure: ActiveValue::Set(scheduled_departure),
        vehicle_id: ActiveValue::Set(format!("V-{trip_code}")),
    }
}

pub fn stop_event(
    trip_code: &str,
    stop_id: i32,
    scheduled_time: NaiveDateTime,
    actual_time: NaiveDateTime,
    passengers_on: i32,
    passengers_off: i32,
) -> entity::stop_event::ActiveModel {
    entity::stop_event::ActiveModel {
        trip_code: ActiveValue::Set(trip_code.to_owned()),
        stop_id: ActiveValue::Set(stop_id),
        scheduled_time: ActiveValue::Set(scheduled_time),
        actual_time: ActiveValue::Set(actual_time),
        passengers_on: ActiveValue::Set(passengers_on),
        passengers_off: ActiveValue::Set(passengers_off),
        ..Default::default()
    }
}
