//! Headway transit schedule store.
//!
//! Persists transit network topology (lines, stops, stop ordering) and
//! realized trip execution data (trips, per-stop arrival/departure events
//! with passenger counts), and answers schedule-adherence and ridership
//! queries over them.

pub mod server;
