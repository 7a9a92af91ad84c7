use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::server::{
    data::transit::{stop::StopRepository, stop_event::StopEventRepository},
    error::Error,
    model::{
        api::{ErrorDto, StopActivityDto, TransferStopDto},
        app::AppState,
    },
};

pub static STOP_TAG: &str = "stop";

static DEFAULT_BUSIEST_LIMIT: u64 = 10;

#[derive(Debug, Deserialize, IntoParams)]
pub struct BusiestQuery {
    /// Maximum number of stops returned. Defaults to 10.
    pub limit: Option<u64>,
}

/// Busiest stops by total passenger activity
#[utoipa::path(
    get,
    path = "/api/stops/busiest",
    tag = STOP_TAG,
    params(BusiestQuery),
    responses(
        (status = 200, description = "Busiest stops with activity totals", body = Vec<StopActivityDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_busiest_stops(
    State(state): State<AppState>,
    Query(query): Query<BusiestQuery>,
) -> Result<impl IntoResponse, Error> {
    let limit = query.limit.unwrap_or(DEFAULT_BUSIEST_LIMIT);

    let busiest = StopEventRepository::new(&state.db)
        .busiest_stops(limit)
        .await?;

    let dtos: Vec<StopActivityDto> = busiest
        .into_iter()
        .map(|stop| StopActivityDto {
            stop_name: stop.stop_name,
            passengers_on: stop.passengers_on,
            passengers_off: stop.passengers_off,
            total_activity: stop.total_activity,
        })
        .collect();

    Ok((StatusCode::OK, Json(dtos)).into_response())
}

/// Transfer stops: stops served by two or more lines
#[utoipa::path(
    get,
    path = "/api/stops/transfers",
    tag = STOP_TAG,
    responses(
        (status = 200, description = "Stops on two or more lines", body = Vec<TransferStopDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_transfer_stops(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, Error> {
    let transfers = StopRepository::new(&state.db).transfer_stops().await?;

    let dtos: Vec<TransferStopDto> = transfers
        .into_iter()
        .map(|stop| TransferStopDto {
            stop_name: stop.stop_name,
            line_count: stop.line_count,
        })
        .collect();

    Ok((StatusCode::OK, Json(dtos)).into_response())
}
