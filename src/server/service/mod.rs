//! Service layer orchestrating multi-step operations over the repositories.

pub mod import;
