//! Tests for StopEventRepository: event recording, delay detection and
//! ridership aggregation.

mod delayed_trips;
mod record;
mod ridership;

use entity::line::VehicleType;
use headway_test_utils::{prelude::*, test_setup_with_transit_tables};
use sea_orm::DatabaseConnection;

/// The "Red" line with stops A/B/C at sequences 1..3 and one trip "R100"
/// departing 08:00. Stop ids are returned in itinerary order.
pub(crate) struct RedLineFixture {
    pub db: DatabaseConnection,
    pub stop_ids: [i32; 3],
}

pub(crate) async fn red_line_setup() -> Result<RedLineFixture, TestError> {
    let test = test_setup_with_transit_tables!()?;
    let db = test.db;

    let line = transit::insert_line(&db, "Red", VehicleType::Rail).await?;

    let mut stop_ids = [0; 3];
    for (i, (name, offset)) in [("Stop A", 0), ("Stop B", 10), ("Stop C", 25)]
        .into_iter()
        .enumerate()
    {
        let stop = transit::insert_stop(&db, name, 34.0 + i as f64 * 0.01, -118.25).await?;
        transit::insert_line_stop(&db, line.line_id, stop.stop_id, i as i32 + 1, offset).await?;
        stop_ids[i] = stop.stop_id;
    }

    transit::insert_trip(&db, "R100", line.line_id, factory::service_time(8, 0)).await?;

    Ok(RedLineFixture { db, stop_ids })
}
