use std::fs;
use std::path::Path;

use headway::server::{
    data::transit::{
        line::LineRepository, line_stop::LineStopRepository, stop_event::StopEventRepository,
    },
    service::import::{ImportReport, ImportService},
};
use headway_test_utils::TestError;

use crate::setup::test_app;

fn write_data_dir(dir: &Path) {
    fs::write(
        dir.join("lines.csv"),
        "line_name,vehicle_type\n\
         Red,rail\n\
         Route 20,bus\n",
    )
    .unwrap();

    fs::write(
        dir.join("stops.csv"),
        "stop_name,latitude,longitude\n\
         Stop A,34.05,-118.25\n\
         Stop B,34.06,-118.26\n\
         Stop C,34.07,-118.27\n",
    )
    .unwrap();

    fs::write(
        dir.join("line_stops.csv"),
        "line_name,stop_name,sequence,time_offset\n\
         Red,Stop A,1,0\n\
         Red,Stop B,2,10\n\
         Red,Stop C,3,25\n\
         Route 20,Stop A,1,0\n",
    )
    .unwrap();

    fs::write(
        dir.join("trips.csv"),
        "trip_id,line_name,scheduled_departure,vehicle_id\n\
         R100,Red,2026-03-02 08:00:00,V-R100\n\
         T0001,Route 20,2026-03-02T09:15:00,V-T0001\n",
    )
    .unwrap();

    fs::write(
        dir.join("stop_events.csv"),
        "trip_id,stop_name,scheduled,actual,passengers_on,passengers_off\n\
         R100,Stop A,2026-03-02 08:00:00,2026-03-02 08:00:00,10,2\n\
         R100,Stop B,2026-03-02 08:10:00,2026-03-02 08:12:00,4,6\n",
    )
    .unwrap();
}

#[tokio::test]
async fn import_populates_store() -> Result<(), TestError> {
    let app = test_app().await?;
    let db = &app.state.db;

    let dir = tempfile::tempdir().unwrap();
    write_data_dir(dir.path());

    let report = ImportService::new(db)
        .import_dir(dir.path())
        .await
        .unwrap();

    assert_eq!(
        report,
        ImportReport {
            lines: 2,
            stops: 3,
            line_stops: 4,
            trips: 2,
            stop_events: 2,
        }
    );

    let line = LineRepository::new(db)
        .find_by_name("Red")
        .await?
        .unwrap();
    let itinerary = LineStopRepository::new(db).itinerary(line.line_id).await?;
    let stops: Vec<(&str, i32)> = itinerary
        .iter()
        .map(|(ls, stop)| (stop.stop_name.as_str(), ls.time_offset_minutes))
        .collect();
    assert_eq!(stops, vec![("Stop A", 0), ("Stop B", 10), ("Stop C", 25)]);

    let (on, off) = StopEventRepository::new(db).ridership_by_trip("R100").await?;
    assert_eq!((on, off), (14, 8));

    Ok(())
}

/// Re-importing the identical directory succeeds: lines, stops, trips and
/// unchanged assignments are skipped; only the realized stop events append.
#[tokio::test]
async fn reimport_same_directory_is_idempotent() -> Result<(), TestError> {
    let app = test_app().await?;
    let db = &app.state.db;

    let dir = tempfile::tempdir().unwrap();
    write_data_dir(dir.path());

    let service = ImportService::new(db);
    service.import_dir(dir.path()).await.unwrap();

    let report = service.import_dir(dir.path()).await.unwrap();

    assert_eq!(
        report,
        ImportReport {
            lines: 0,
            stops: 0,
            line_stops: 0,
            trips: 0,
            stop_events: 2,
        }
    );

    let events = StopEventRepository::new(db).for_trip("R100").await?;
    assert_eq!(events.len(), 4);

    Ok(())
}

/// A re-import with changed positions moves the assignments in place
#[tokio::test]
async fn reimport_updates_changed_stop_positions() -> Result<(), TestError> {
    let app = test_app().await?;
    let db = &app.state.db;

    let dir = tempfile::tempdir().unwrap();
    write_data_dir(dir.path());

    let service = ImportService::new(db);
    service.import_dir(dir.path()).await.unwrap();

    // Stop B now sits 12 minutes out; everything else is unchanged.
    fs::write(
        dir.path().join("line_stops.csv"),
        "line_name,stop_name,sequence,time_offset\n\
         Red,Stop A,1,0\n\
         Red,Stop B,2,12\n\
         Red,Stop C,3,25\n\
         Route 20,Stop A,1,0\n",
    )
    .unwrap();

    let report = service.import_dir(dir.path()).await.unwrap();
    assert_eq!(report.line_stops, 1);

    let line = LineRepository::new(db)
        .find_by_name("Red")
        .await?
        .unwrap();
    let itinerary = LineStopRepository::new(db).itinerary(line.line_id).await?;
    let offsets: Vec<(&str, i32)> = itinerary
        .iter()
        .map(|(ls, stop)| (stop.stop_name.as_str(), ls.time_offset_minutes))
        .collect();
    assert_eq!(offsets, vec![("Stop A", 0), ("Stop B", 12), ("Stop C", 25)]);

    Ok(())
}

#[tokio::test]
async fn unresolved_names_are_skipped() -> Result<(), TestError> {
    let app = test_app().await?;
    let db = &app.state.db;

    let dir = tempfile::tempdir().unwrap();
    write_data_dir(dir.path());

    fs::write(
        dir.path().join("line_stops.csv"),
        "line_name,stop_name,sequence,time_offset\n\
         Ghost,Stop A,1,0\n\
         Red,Stop A,1,0\n",
    )
    .unwrap();

    let report = ImportService::new(db)
        .import_dir(dir.path())
        .await
        .unwrap();

    assert_eq!(report.line_stops, 1);

    Ok(())
}
