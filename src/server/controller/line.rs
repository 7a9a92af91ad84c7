use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::server::{
    data::transit::{
        line::LineRepository, line_stop::LineStopRepository, stop_event::StopEventRepository,
        trip::TripRepository,
    },
    error::Error,
    model::{
        api::{ErrorDto, ItineraryStopDto, LineRidershipDto, TripDto},
        app::AppState,
    },
};

pub static LINE_TAG: &str = "line";

static DEFAULT_TRIP_LIMIT: u64 = 20;

#[derive(Debug, Deserialize, IntoParams)]
pub struct TripQuery {
    /// Maximum number of trips returned, newest first. Defaults to 20.
    pub limit: Option<u64>,
}

/// Ordered itinerary of a line: its stops by sequence number with
/// scheduled time offsets
#[utoipa::path(
    get,
    path = "/api/lines/{name}/itinerary",
    tag = LINE_TAG,
    params(
        ("name" = String, Path, description = "Line name")
    ),
    responses(
        (status = 200, description = "Ordered stops of the line", body = Vec<ItineraryStopDto>),
        (status = 404, description = "Line not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_line_itinerary(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let line_repo = LineRepository::new(&state.db);

    let line = if let Some(line) = line_repo.find_by_name(&name).await? {
        line
    } else {
        return Ok((
            StatusCode::NOT_FOUND,
            Json(ErrorDto {
                error: format!("Line {name:?} not found"),
            }),
        )
            .into_response());
    };

    let itinerary = LineStopRepository::new(&state.db)
        .itinerary(line.line_id)
        .await?;

    let dtos: Vec<ItineraryStopDto> = itinerary
        .into_iter()
        .map(|(line_stop, stop)| ItineraryStopDto {
            stop_name: stop.stop_name,
            sequence_number: line_stop.sequence_number,
            time_offset_minutes: line_stop.time_offset_minutes,
            latitude: stop.latitude,
            longitude: stop.longitude,
        })
        .collect();

    Ok((StatusCode::OK, Json(dtos)).into_response())
}

/// Most recent trips of a line, newest scheduled departure first
#[utoipa::path(
    get,
    path = "/api/lines/{name}/trips",
    tag = LINE_TAG,
    params(
        ("name" = String, Path, description = "Line name"),
        TripQuery
    ),
    responses(
        (status = 200, description = "Recent trips of the line", body = Vec<TripDto>),
        (status = 404, description = "Line not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_line_trips(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<TripQuery>,
) -> Result<impl IntoResponse, Error> {
    let line_repo = LineRepository::new(&state.db);

    let line = if let Some(line) = line_repo.find_by_name(&name).await? {
        line
    } else {
        return Ok((
            StatusCode::NOT_FOUND,
            Json(ErrorDto {
                error: format!("Line {name:?} not found"),
            }),
        )
            .into_response());
    };

    let limit = query.limit.unwrap_or(DEFAULT_TRIP_LIMIT);
    let trips = TripRepository::new(&state.db)
        .recent_by_line(line.line_id, limit)
        .await?;

    let dtos: Vec<TripDto> = trips
        .into_iter()
        .map(|trip| TripDto {
            trip_code: trip.trip_code,
            line_name: line.line_name.clone(),
            scheduled_departure: trip.scheduled_departure,
            vehicle_id: trip.vehicle_id,
        })
        .collect();

    Ok((StatusCode::OK, Json(dtos)).into_response())
}

/// Average passengers per stop event for each line
#[utoipa::path(
    get,
    path = "/api/lines/ridership",
    tag = LINE_TAG,
    responses(
        (status = 200, description = "Average ridership per line", body = Vec<LineRidershipDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_line_ridership(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, Error> {
    let averages = StopEventRepository::new(&state.db)
        .average_ridership_by_line()
        .await?;

    let dtos: Vec<LineRidershipDto> = averages
        .into_iter()
        .map(|line| LineRidershipDto {
            line_name: line.line_name,
            avg_passengers: line.avg_passengers,
        })
        .collect();

    Ok((StatusCode::OK, Json(dtos)).into_response())
}
