//! CSV import of transit topology and schedule data.
//!
//! Reads `lines.csv`, `stops.csv`, `line_stops.csv`, `trips.csv` and
//! `stop_events.csv` from a data directory. Each file loads inside one
//! transaction so a batch either fully applies or not at all. Rows naming
//! lines or stops that cannot be resolved are skipped with a warning.
//! Lines, stops and trips that already exist are left untouched and stop
//! assignments are moved in place when their position changed, so a
//! re-import is idempotent; realized stop events are append-only.

use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDateTime;
use entity::line::VehicleType;
use sea_orm::{ActiveEnum, DatabaseConnection, TransactionTrait};
use serde::Deserialize;
use tracing::{info, warn};

use crate::server::{
    data::transit::{
        line::LineRepository, line_stop::LineStopRepository, stop::StopRepository,
        stop_event::StopEventRepository, trip::TripRepository,
    },
    error::{store::StoreError, Error},
};

#[derive(Debug, Deserialize)]
struct LineRow {
    line_name: String,
    vehicle_type: String,
}

#[derive(Debug, Deserialize)]
struct StopRow {
    stop_name: String,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct LineStopRow {
    line_name: String,
    stop_name: String,
    sequence: i32,
    time_offset: i32,
}

#[derive(Debug, Deserialize)]
struct TripRow {
    trip_id: String,
    line_name: String,
    scheduled_departure: String,
    vehicle_id: String,
}

#[derive(Debug, Deserialize)]
struct StopEventRow {
    trip_id: String,
    stop_name: String,
    scheduled: String,
    actual: String,
    passengers_on: i32,
    passengers_off: i32,
}

/// Per-file row counts of an import run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub lines: usize,
    pub stops: usize,
    pub line_stops: usize,
    pub trips: usize,
    pub stop_events: usize,
}

pub struct ImportService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ImportService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Import all five CSV files from `dir`. Files load in dependency
    /// order; a missing file aborts the run.
    pub async fn import_dir(&self, dir: &Path) -> Result<ImportReport, Error> {
        let mut report = ImportReport::default();

        report.lines = self.load_lines(&dir.join("lines.csv")).await?;
        report.stops = self.load_stops(&dir.join("stops.csv")).await?;

        let line_map = self.line_map().await?;
        let stop_map = self.stop_map().await?;

        report.line_stops = self
            .load_line_stops(&dir.join("line_stops.csv"), &line_map, &stop_map)
            .await?;
        report.trips = self
            .load_trips(&dir.join("trips.csv"), &line_map)
            .await?;
        report.stop_events = self
            .load_stop_events(&dir.join("stop_events.csv"), &stop_map)
            .await?;

        info!(
            "Imported {} lines, {} stops, {} line stops, {} trips, {} stop events",
            report.lines, report.stops, report.line_stops, report.trips, report.stop_events
        );

        Ok(report)
    }

    async fn load_lines(&self, path: &Path) -> Result<usize, Error> {
        let rows: Vec<LineRow> = read_rows(path)?;

        let txn = self.db.begin().await?;
        let repo = LineRepository::new(&txn);

        let mut inserted = 0;
        for row in rows {
            if repo.find_by_name(&row.line_name).await?.is_some() {
                continue;
            }

            let vehicle_type =
                VehicleType::try_from_value(&row.vehicle_type).map_err(|_| {
                    StoreError::constraint(
                        "vehicle_type",
                        format!("unknown vehicle type {:?}", row.vehicle_type),
                    )
                })?;

            repo.create(&row.line_name, vehicle_type).await?;
            inserted += 1;
        }

        txn.commit().await?;
        Ok(inserted)
    }

    async fn load_stops(&self, path: &Path) -> Result<usize, Error> {
        let rows: Vec<StopRow> = read_rows(path)?;

        let txn = self.db.begin().await?;
        let repo = StopRepository::new(&txn);

        let mut inserted = 0;
        for row in rows {
            if repo.find_by_name(&row.stop_name).await?.is_some() {
                continue;
            }

            repo.create(&row.stop_name, row.latitude, row.longitude)
                .await?;
            inserted += 1;
        }

        txn.commit().await?;
        Ok(inserted)
    }

    async fn load_line_stops(
        &self,
        path: &Path,
        line_map: &HashMap<String, i32>,
        stop_map: &HashMap<String, i32>,
    ) -> Result<usize, Error> {
        let rows: Vec<LineStopRow> = read_rows(path)?;

        let txn = self.db.begin().await?;
        let repo = LineStopRepository::new(&txn);

        let mut applied = 0;
        for row in rows {
            let (Some(&line_id), Some(&stop_id)) =
                (line_map.get(&row.line_name), stop_map.get(&row.stop_name))
            else {
                warn!(
                    "Skipping line stop for unresolved names {:?} / {:?}",
                    row.line_name, row.stop_name
                );
                continue;
            };

            match repo.find(line_id, stop_id).await? {
                Some(existing)
                    if existing.sequence_number == row.sequence
                        && existing.time_offset_minutes == row.time_offset =>
                {
                    continue;
                }
                Some(_) => {
                    repo.update_position(line_id, stop_id, row.sequence, row.time_offset)
                        .await?;
                }
                None => {
                    repo.assign(line_id, stop_id, row.sequence, row.time_offset)
                        .await?;
                }
            }
            applied += 1;
        }

        txn.commit().await?;
        Ok(applied)
    }

    async fn load_trips(
        &self,
        path: &Path,
        line_map: &HashMap<String, i32>,
    ) -> Result<usize, Error> {
        let rows: Vec<TripRow> = read_rows(path)?;

        let txn = self.db.begin().await?;
        let repo = TripRepository::new(&txn);

        let mut inserted = 0;
        for row in rows {
            let Some(&line_id) = line_map.get(&row.line_name) else {
                warn!(
                    "Skipping trip {:?} for unresolved line {:?}",
                    row.trip_id, row.line_name
                );
                continue;
            };

            if repo.find_by_code(&row.trip_id).await?.is_some() {
                continue;
            }

            let departure = parse_timestamp(&row.scheduled_departure)?;
            repo.create(&row.trip_id, line_id, departure, &row.vehicle_id)
                .await?;
            inserted += 1;
        }

        txn.commit().await?;
        Ok(inserted)
    }

    async fn load_stop_events(
        &self,
        path: &Path,
        stop_map: &HashMap<String, i32>,
    ) -> Result<usize, Error> {
        let rows: Vec<StopEventRow> = read_rows(path)?;

        let txn = self.db.begin().await?;
        let repo = StopEventRepository::new(&txn);

        let mut inserted = 0;
        for row in rows {
            let Some(&stop_id) = stop_map.get(&row.stop_name) else {
                warn!(
                    "Skipping stop event of trip {:?} for unresolved stop {:?}",
                    row.trip_id, row.stop_name
                );
                continue;
            };

            let scheduled = parse_timestamp(&row.scheduled)?;
            let actual = parse_timestamp(&row.actual)?;

            repo.record(
                &row.trip_id,
                stop_id,
                scheduled,
                actual,
                row.passengers_on,
                row.passengers_off,
            )
            .await?;
            inserted += 1;
        }

        txn.commit().await?;
        Ok(inserted)
    }

    async fn line_map(&self) -> Result<HashMap<String, i32>, Error> {
        let lines = LineRepository::new(self.db).list().await?;

        Ok(lines
            .into_iter()
            .map(|l| (l.line_name, l.line_id))
            .collect())
    }

    async fn stop_map(&self) -> Result<HashMap<String, i32>, Error> {
        let stops = StopRepository::new(self.db).list().await?;

        Ok(stops
            .into_iter()
            .map(|s| (s.stop_name, s.stop_id))
            .collect())
    }
}

fn read_rows<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Vec<T>, Error> {
    let mut reader = csv::Reader::from_path(path)?;

    let rows = reader.deserialize().collect::<Result<Vec<T>, _>>()?;
    Ok(rows)
}

/// Timestamps arrive UTC-naive, either `2026-03-02 08:00:00` or with a `T`
/// separator.
fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, Error> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|_| Error::ParseError(raw.to_string()))
}
