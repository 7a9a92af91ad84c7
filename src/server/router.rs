//! HTTP routing and OpenAPI documentation configuration.
//!
//! All API endpoints are registered here with their utoipa specifications,
//! and Swagger UI serves the interactive documentation at `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger
/// UI documentation.
///
/// # Registered Endpoints
/// - `GET /api/lines/{name}/itinerary` - Ordered stops of a line
/// - `GET /api/lines/{name}/trips` - Recent trips of a line, bounded
/// - `GET /api/lines/ridership` - Average ridership per line
/// - `GET /api/trips/{code}/events` - Chronological stop events of a trip
/// - `GET /api/trips/delayed` - Trips with N or more delayed stop events
/// - `GET /api/stops/busiest` - Busiest stops by passenger activity
/// - `GET /api/stops/transfers` - Stops served by two or more lines
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Headway", description = "Transit schedule store API"), tags(
        (name = controller::line::LINE_TAG, description = "Line topology and ridership routes"),
        (name = controller::trip::TRIP_TAG, description = "Trip and delay analysis routes"),
        (name = controller::stop::STOP_TAG, description = "Stop activity routes"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::line::get_line_itinerary))
        .routes(routes!(controller::line::get_line_trips))
        .routes(routes!(controller::line::get_line_ridership))
        .routes(routes!(controller::trip::get_trip_events))
        .routes(routes!(controller::trip::get_delayed_trips))
        .routes(routes!(controller::stop::get_busiest_stops))
        .routes(routes!(controller::stop::get_transfer_stops))
        .split_for_parts();

    let routes = routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api));

    routes
}
