//! Server application core modules.
//!
//! This module contains all server-side functionality for the Headway transit
//! schedule store: HTTP routing, configuration, database repositories for the
//! transit schema, CSV import, and the schedule-adherence and ridership query
//! layer exposed through the API.

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
