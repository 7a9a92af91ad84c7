//! Repositories over the transit schema.
//!
//! Each repository wraps a connection implementing [`sea_orm::ConnectionTrait`]
//! so the same write paths run against the live database or inside a
//! transaction (the CSV importer loads each file atomically this way).

pub mod line;
pub mod line_stop;
pub mod stop;
pub mod stop_event;
pub mod trip;
