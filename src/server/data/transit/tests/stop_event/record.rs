use headway_test_utils::prelude::*;

use crate::server::{
    data::transit::stop_event::StopEventRepository,
    data::transit::tests::stop_event::red_line_setup, error::store::StoreError,
};

/// Should succeed and persist scheduled vs. actual times and counts
#[tokio::test]
async fn record_stop_event() -> Result<(), TestError> {
    let fx = red_line_setup().await?;

    let repo = StopEventRepository::new(&fx.db);
    let event = repo
        .record(
            "R100",
            fx.stop_ids[0],
            factory::service_time(8, 0),
            factory::service_time(8, 2),
            12,
            0,
        )
        .await
        .unwrap();

    assert_eq!(event.trip_code, "R100");
    assert_eq!(event.stop_id, fx.stop_ids[0]);
    assert_eq!(event.scheduled_time, factory::service_time(8, 0));
    assert_eq!(event.actual_time, factory::service_time(8, 2));
    assert_eq!(event.passengers_on, 12);
    assert_eq!(event.passengers_off, 0);

    Ok(())
}

/// Negative boarding count must fail with a constraint violation
#[tokio::test]
async fn negative_passengers_on_rejected() -> Result<(), TestError> {
    let fx = red_line_setup().await?;

    let repo = StopEventRepository::new(&fx.db);
    let result = repo
        .record(
            "R100",
            fx.stop_ids[0],
            factory::service_time(8, 0),
            factory::service_time(8, 0),
            -1,
            0,
        )
        .await;

    assert!(matches!(
        result,
        Err(StoreError::ConstraintViolation {
            field: "passengers_on",
            ..
        })
    ));

    Ok(())
}

#[tokio::test]
async fn negative_passengers_off_rejected() -> Result<(), TestError> {
    let fx = red_line_setup().await?;

    let repo = StopEventRepository::new(&fx.db);
    let result = repo
        .record(
            "R100",
            fx.stop_ids[0],
            factory::service_time(8, 0),
            factory::service_time(8, 0),
            0,
            -3,
        )
        .await;

    assert!(matches!(
        result,
        Err(StoreError::ConstraintViolation {
            field: "passengers_off",
            ..
        })
    ));

    Ok(())
}

#[tokio::test]
async fn unknown_trip_rejected() -> Result<(), TestError> {
    let fx = red_line_setup().await?;

    let repo = StopEventRepository::new(&fx.db);
    let result = repo
        .record(
            "NOPE",
            fx.stop_ids[0],
            factory::service_time(8, 0),
            factory::service_time(8, 0),
            0,
            0,
        )
        .await;

    assert!(matches!(
        result,
        Err(StoreError::ForeignKeyViolation { entity: "trip", .. })
    ));

    Ok(())
}

#[tokio::test]
async fn unknown_stop_rejected() -> Result<(), TestError> {
    let fx = red_line_setup().await?;

    let repo = StopEventRepository::new(&fx.db);
    let result = repo
        .record(
            "R100",
            9999,
            factory::service_time(8, 0),
            factory::service_time(8, 0),
            0,
            0,
        )
        .await;

    assert!(matches!(
        result,
        Err(StoreError::ForeignKeyViolation { entity: "stop", .. })
    ));

    Ok(())
}

/// Re-visits are appended, not deduplicated: two events for the same
/// (trip, stop) pair both persist
#[tokio::test]
async fn revisit_of_same_stop_allowed() -> Result<(), TestError> {
    let fx = red_line_setup().await?;

    let repo = StopEventRepository::new(&fx.db);
    repo.record(
        "R100",
        fx.stop_ids[0],
        factory::service_time(8, 0),
        factory::service_time(8, 0),
        5,
        0,
    )
    .await
    .unwrap();
    repo.record(
        "R100",
        fx.stop_ids[0],
        factory::service_time(8, 45),
        factory::service_time(8, 47),
        2,
        1,
    )
    .await
    .unwrap();

    let events = repo.for_trip("R100").await?;
    assert_eq!(events.len(), 2);

    Ok(())
}

/// Events come back in scheduled chronological order regardless of insert
/// order
#[tokio::test]
async fn for_trip_ordered_by_scheduled_time() -> Result<(), TestError> {
    let fx = red_line_setup().await?;

    let repo = StopEventRepository::new(&fx.db);
    for (stop, sched_minute, actual_minute) in [(2usize, 25u32, 30u32), (0, 0, 0), (1, 10, 12)] {
        repo.record(
            "R100",
            fx.stop_ids[stop],
            factory::service_time(8, sched_minute),
            factory::service_time(8, actual_minute),
            0,
            0,
        )
        .await
        .unwrap();
    }

    let events = repo.for_trip("R100").await?;
    let scheduled: Vec<_> = events.iter().map(|e| e.scheduled_time).collect();

    assert_eq!(
        scheduled,
        vec![
            factory::service_time(8, 0),
            factory::service_time(8, 10),
            factory::service_time(8, 25),
        ]
    );

    Ok(())
}
