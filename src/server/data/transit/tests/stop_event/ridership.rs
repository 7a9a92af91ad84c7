use headway_test_utils::prelude::*;

use crate::server::data::transit::{
    stop_event::{StopBoardings, StopEventRepository},
    tests::stop_event::{red_line_setup, RedLineFixture},
};

/// Two trips worth of events over stops A and B.
async fn record_ridership_data(fx: &RedLineFixture) -> Result<(), TestError> {
    let line = transit::insert_line(&fx.db, "Route 20", entity::line::VehicleType::Bus).await?;
    transit::insert_trip(&fx.db, "T0001", line.line_id, factory::service_time(7, 0)).await?;

    let repo = StopEventRepository::new(&fx.db);

    // R100 at A and B.
    repo.record(
        "R100",
        fx.stop_ids[0],
        factory::service_time(8, 0),
        factory::service_time(8, 0),
        10,
        2,
    )
    .await
    .unwrap();
    repo.record(
        "R100",
        fx.stop_ids[1],
        factory::service_time(8, 10),
        factory::service_time(8, 12),
        4,
        6,
    )
    .await
    .unwrap();

    // T0001 also calls at A.
    repo.record(
        "T0001",
        fx.stop_ids[0],
        factory::service_time(7, 5),
        factory::service_time(7, 5),
        6,
        1,
    )
    .await
    .unwrap();

    Ok(())
}

#[tokio::test]
async fn ridership_sums_per_stop() -> Result<(), TestError> {
    let fx = red_line_setup().await?;
    record_ridership_data(&fx).await?;

    let repo = StopEventRepository::new(&fx.db);
    let activity = repo.ridership_by_stop().await?;

    assert_eq!(activity.len(), 2);

    let a = activity.iter().find(|s| s.stop_name == "Stop A").unwrap();
    assert_eq!(a.passengers_on, 16);
    assert_eq!(a.passengers_off, 3);
    assert_eq!(a.total_activity, 19);

    let b = activity.iter().find(|s| s.stop_name == "Stop B").unwrap();
    assert_eq!(b.passengers_on, 4);
    assert_eq!(b.passengers_off, 6);
    assert_eq!(b.total_activity, 10);

    Ok(())
}

#[tokio::test]
async fn ridership_sums_per_trip() -> Result<(), TestError> {
    let fx = red_line_setup().await?;
    record_ridership_data(&fx).await?;

    let repo = StopEventRepository::new(&fx.db);

    let (on, off) = repo.ridership_by_trip("R100").await?;
    assert_eq!((on, off), (14, 8));

    let (on, off) = repo.ridership_by_trip("T0001").await?;
    assert_eq!((on, off), (6, 1));

    Ok(())
}

/// Unknown trips aggregate to zero rather than erroring
#[tokio::test]
async fn ridership_for_unknown_trip_is_zero() -> Result<(), TestError> {
    let fx = red_line_setup().await?;

    let repo = StopEventRepository::new(&fx.db);
    let (on, off) = repo.ridership_by_trip("NOPE").await?;

    assert_eq!((on, off), (0, 0));

    Ok(())
}

#[tokio::test]
async fn busiest_stops_bounded_and_ordered() -> Result<(), TestError> {
    let fx = red_line_setup().await?;
    record_ridership_data(&fx).await?;

    let repo = StopEventRepository::new(&fx.db);
    let busiest = repo.busiest_stops(1).await?;

    assert_eq!(busiest.len(), 1);
    assert_eq!(busiest[0].stop_name, "Stop A");
    assert_eq!(busiest[0].total_activity, 19);

    Ok(())
}

/// A boards 16, B boards 4, so the average per-stop total is 10 and only
/// A is above it
#[tokio::test]
async fn stops_with_above_average_boardings() -> Result<(), TestError> {
    let fx = red_line_setup().await?;
    record_ridership_data(&fx).await?;

    let repo = StopEventRepository::new(&fx.db);
    let stops = repo.above_average_boarding_stops().await?;

    assert_eq!(
        stops,
        vec![StopBoardings {
            stop_name: "Stop A".to_string(),
            total_boardings: 16,
        }]
    );

    Ok(())
}

#[tokio::test]
async fn average_ridership_grouped_by_line() -> Result<(), TestError> {
    let fx = red_line_setup().await?;
    record_ridership_data(&fx).await?;

    let repo = StopEventRepository::new(&fx.db);
    let averages = repo.average_ridership_by_line().await?;

    assert_eq!(averages.len(), 2);

    // Ordered by line name: "Red" before "Route 20".
    assert_eq!(averages[0].line_name, "Red");
    assert!((averages[0].avg_passengers - 11.0).abs() < 1e-9);

    assert_eq!(averages[1].line_name, "Route 20");
    assert!((averages[1].avg_passengers - 7.0).abs() < 1e-9);

    Ok(())
}

#[tokio::test]
async fn delays_grouped_by_line() -> Result<(), TestError> {
    let fx = red_line_setup().await?;
    record_ridership_data(&fx).await?;

    let repo = StopEventRepository::new(&fx.db);
    let delays = repo.delays_by_line().await?;

    // Only R100's visit to B was late; T0001 ran on time.
    assert_eq!(delays.len(), 1);
    assert_eq!(delays[0].line_name, "Red");
    assert_eq!(delays[0].delay_count, 1);

    Ok(())
}
