use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Duration;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::server::{
    data::transit::{stop_event::StopEventRepository, trip::TripRepository},
    error::Error,
    model::{
        api::{DelayedTripDto, ErrorDto, StopEventDto},
        app::AppState,
    },
};

pub static TRIP_TAG: &str = "trip";

/// Reference threshold: a trip is reported once three of its stop events
/// ran late.
static DEFAULT_MIN_DELAYED: u64 = 3;

#[derive(Debug, Deserialize, IntoParams)]
pub struct DelayQuery {
    /// Minimum number of delayed stop events per reported trip. Defaults to 3.
    pub min_delayed: Option<u64>,
    /// Minutes of lateness tolerated before an event counts as delayed.
    /// Defaults to 0 (strict comparison).
    pub tolerance_minutes: Option<u32>,
}

/// Chronological stop events of a trip: scheduled vs. actual times and
/// passenger counts
#[utoipa::path(
    get,
    path = "/api/trips/{code}/events",
    tag = TRIP_TAG,
    params(
        ("code" = String, Path, description = "Trip code")
    ),
    responses(
        (status = 200, description = "Stop events of the trip", body = Vec<StopEventDto>),
        (status = 404, description = "Trip not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_trip_events(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let trip_repo = TripRepository::new(&state.db);

    if trip_repo.find_by_code(&code).await?.is_none() {
        return Ok((
            StatusCode::NOT_FOUND,
            Json(ErrorDto {
                error: format!("Trip {code:?} not found"),
            }),
        )
            .into_response());
    }

    let events = StopEventRepository::new(&state.db)
        .for_trip_with_stops(&code)
        .await?;

    let dtos: Vec<StopEventDto> = events
        .into_iter()
        .map(|(event, stop)| StopEventDto {
            stop_name: stop.stop_name,
            scheduled_time: event.scheduled_time,
            actual_time: event.actual_time,
            passengers_on: event.passengers_on,
            passengers_off: event.passengers_off,
        })
        .collect();

    Ok((StatusCode::OK, Json(dtos)).into_response())
}

/// Trips with at least `min_delayed` delayed stop events, most delayed
/// first
#[utoipa::path(
    get,
    path = "/api/trips/delayed",
    tag = TRIP_TAG,
    params(DelayQuery),
    responses(
        (status = 200, description = "Delayed trips with delayed event counts", body = Vec<DelayedTripDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_delayed_trips(
    State(state): State<AppState>,
    Query(query): Query<DelayQuery>,
) -> Result<impl IntoResponse, Error> {
    let repo = StopEventRepository::new(&state.db);

    let min_delayed = query.min_delayed.unwrap_or(DEFAULT_MIN_DELAYED);

    let delayed = match query.tolerance_minutes {
        Some(minutes) if minutes > 0 => {
            repo.delayed_trips_with_tolerance(min_delayed, Duration::minutes(minutes.into()))
                .await?
        }
        _ => repo.delayed_trips(min_delayed).await?,
    };

    let dtos: Vec<DelayedTripDto> = delayed
        .into_iter()
        .map(|trip| DelayedTripDto {
            trip_code: trip.trip_code,
            delayed_count: trip.delayed_count,
        })
        .collect();

    Ok((StatusCode::OK, Json(dtos)).into_response())
}
