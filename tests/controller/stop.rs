use entity::line::VehicleType;
use headway::server::model::api::{StopActivityDto, TransferStopDto};
use headway_test_utils::{fixtures::transit, fixtures::transit::factory, TestError};

use crate::{controller::get_json, setup::test_app};

#[tokio::test]
async fn busiest_stops_honors_limit() -> Result<(), TestError> {
    let app = test_app().await?;
    let db = &app.state.db;

    let line = transit::insert_line(db, "Red", VehicleType::Rail).await?;
    transit::insert_trip(db, "R100", line.line_id, factory::service_time(8, 0)).await?;

    let quiet = transit::insert_stop(db, "Quiet Stop", 34.0, -118.25).await?;
    let busy = transit::insert_stop(db, "Busy Stop", 34.1, -118.3).await?;

    let at = factory::service_time(8, 0);
    transit::insert_stop_event(db, "R100", quiet.stop_id, at, at, 1, 1).await?;
    transit::insert_stop_event(db, "R100", busy.stop_id, at, at, 20, 5).await?;

    let busiest: Vec<StopActivityDto> = get_json(app.router, "/api/stops/busiest?limit=1").await;

    assert_eq!(busiest.len(), 1);
    assert_eq!(busiest[0].stop_name, "Busy Stop");
    assert_eq!(busiest[0].total_activity, 25);

    Ok(())
}

#[tokio::test]
async fn transfer_stops_require_a_second_line() -> Result<(), TestError> {
    let app = test_app().await?;
    let db = &app.state.db;

    let red = transit::insert_line(db, "Red", VehicleType::Rail).await?;
    let bus = transit::insert_line(db, "Route 20", VehicleType::Bus).await?;

    let hub = transit::insert_stop(db, "Union Station", 34.05, -118.23).await?;
    let local = transit::insert_stop(db, "Local Stop", 34.06, -118.24).await?;

    transit::insert_line_stop(db, red.line_id, hub.stop_id, 1, 0).await?;
    transit::insert_line_stop(db, bus.line_id, hub.stop_id, 1, 0).await?;
    transit::insert_line_stop(db, red.line_id, local.stop_id, 2, 10).await?;

    let transfers: Vec<TransferStopDto> = get_json(app.router, "/api/stops/transfers").await;

    assert_eq!(transfers.len(), 1);
    assert_eq!(transfers[0].stop_name, "Union Station");
    assert_eq!(transfers[0].line_count, 2);

    Ok(())
}
