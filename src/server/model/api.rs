//! DTOs serialized on the HTTP API surface.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDto {
    pub error: String,
}

/// One entry of a line's ordered itinerary.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ItineraryStopDto {
    pub stop_name: String,
    pub sequence_number: i32,
    pub time_offset_minutes: i32,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TripDto {
    pub trip_code: String,
    pub line_name: String,
    pub scheduled_departure: NaiveDateTime,
    pub vehicle_id: String,
}

/// A trip together with how many of its stop events were delayed.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DelayedTripDto {
    pub trip_code: String,
    pub delayed_count: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StopEventDto {
    pub stop_name: String,
    pub scheduled_time: NaiveDateTime,
    pub actual_time: NaiveDateTime,
    pub passengers_on: i32,
    pub passengers_off: i32,
}

/// Total boardings/alightings recorded at a stop across all stop events.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StopActivityDto {
    pub stop_name: String,
    pub passengers_on: i64,
    pub passengers_off: i64,
    pub total_activity: i64,
}

/// A stop served by two or more lines.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TransferStopDto {
    pub stop_name: String,
    pub line_count: i64,
}

/// Average passengers (boarding + alighting) per stop event on a line.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LineRidershipDto {
    pub line_name: String,
    pub avg_passengers: f64,
}
