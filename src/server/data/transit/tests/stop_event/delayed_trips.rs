use chrono::Duration;
use headway_test_utils::prelude::*;
use sea_orm::EntityTrait;

use crate::server::data::transit::{
    stop_event::{DelayedTrip, StopEventRepository},
    tests::stop_event::{red_line_setup, RedLineFixture},
};

/// Records the reference run of trip R100: on time at A, 2 minutes late at
/// B, 5 minutes late at C.
async fn record_reference_run(fx: &RedLineFixture) -> Result<(), TestError> {
    let repo = StopEventRepository::new(&fx.db);

    for (stop, sched, actual, on, off) in [
        (0usize, (8u32, 0u32), (8u32, 0u32), 20, 0),
        (1, (8, 10), (8, 12), 8, 5),
        (2, (8, 25), (8, 30), 0, 23),
    ] {
        repo.record(
            "R100",
            fx.stop_ids[stop],
            factory::service_time(sched.0, sched.1),
            factory::service_time(actual.0, actual.1),
            on,
            off,
        )
        .await
        .unwrap();
    }

    Ok(())
}

/// B and C are delayed, A is on time: threshold 2 reports R100 with a
/// delayed count of exactly 2
#[tokio::test]
async fn reference_scenario_threshold_two() -> Result<(), TestError> {
    let fx = red_line_setup().await?;
    record_reference_run(&fx).await?;

    let repo = StopEventRepository::new(&fx.db);
    let delayed = repo.delayed_trips(2).await?;

    assert_eq!(
        delayed,
        vec![DelayedTrip {
            trip_code: "R100".to_string(),
            delayed_count: 2,
        }]
    );

    Ok(())
}

/// The canonical threshold of 3 excludes a trip with only 2 delayed events
#[tokio::test]
async fn threshold_filters_out_trips_below_count() -> Result<(), TestError> {
    let fx = red_line_setup().await?;
    record_reference_run(&fx).await?;

    let repo = StopEventRepository::new(&fx.db);
    let delayed = repo.delayed_trips(3).await?;

    assert!(delayed.is_empty());

    Ok(())
}

/// Arrival exactly on schedule is not a delay (strict comparison)
#[tokio::test]
async fn on_time_event_is_not_delayed() -> Result<(), TestError> {
    let fx = red_line_setup().await?;

    let repo = StopEventRepository::new(&fx.db);
    repo.record(
        "R100",
        fx.stop_ids[0],
        factory::service_time(8, 0),
        factory::service_time(8, 0),
        0,
        0,
    )
    .await
    .unwrap();

    let delayed = repo.delayed_trips(1).await?;

    assert!(delayed.is_empty());

    Ok(())
}

/// Early arrival is not a delay
#[tokio::test]
async fn early_event_is_not_delayed() -> Result<(), TestError> {
    let fx = red_line_setup().await?;

    let repo = StopEventRepository::new(&fx.db);
    repo.record(
        "R100",
        fx.stop_ids[0],
        factory::service_time(8, 10),
        factory::service_time(8, 8),
        0,
        0,
    )
    .await
    .unwrap();

    let delayed = repo.delayed_trips(1).await?;

    assert!(delayed.is_empty());

    Ok(())
}

/// A 2-minute tolerance drops B (exactly 2 minutes late) but keeps C
/// (5 minutes late)
#[tokio::test]
async fn tolerance_excludes_borderline_delays() -> Result<(), TestError> {
    let fx = red_line_setup().await?;
    record_reference_run(&fx).await?;

    let repo = StopEventRepository::new(&fx.db);
    let delayed = repo
        .delayed_trips_with_tolerance(1, Duration::minutes(2))
        .await?;

    assert_eq!(
        delayed,
        vec![DelayedTrip {
            trip_code: "R100".to_string(),
            delayed_count: 1,
        }]
    );

    Ok(())
}

/// Zero tolerance matches the strict query
#[tokio::test]
async fn zero_tolerance_matches_strict_query() -> Result<(), TestError> {
    let fx = red_line_setup().await?;
    record_reference_run(&fx).await?;

    let repo = StopEventRepository::new(&fx.db);
    let strict = repo.delayed_trips(1).await?;
    let tolerant = repo
        .delayed_trips_with_tolerance(1, Duration::zero())
        .await?;

    assert_eq!(strict, tolerant);

    Ok(())
}

/// Report is ordered by delayed count descending, then trip code
#[tokio::test]
async fn report_ordering_across_trips() -> Result<(), TestError> {
    let fx = red_line_setup().await?;
    record_reference_run(&fx).await?;

    // Second trip, three delayed stops.
    let line = entity::prelude::Line::find()
        .one(&fx.db)
        .await?
        .unwrap();
    transit::insert_trip(&fx.db, "R200", line.line_id, factory::service_time(9, 0)).await?;

    let repo = StopEventRepository::new(&fx.db);
    for (stop, minute) in [(0usize, 0u32), (1, 10), (2, 25)] {
        repo.record(
            "R200",
            fx.stop_ids[stop],
            factory::service_time(9, minute),
            factory::service_time(9, minute + 4),
            0,
            0,
        )
        .await
        .unwrap();
    }

    let delayed = repo.delayed_trips(1).await?;

    assert_eq!(
        delayed,
        vec![
            DelayedTrip {
                trip_code: "R200".to_string(),
                delayed_count: 3,
            },
            DelayedTrip {
                trip_code: "R100".to_string(),
                delayed_count: 2,
            },
        ]
    );

    Ok(())
}
