//! Domain logic for the occupancy tracker.
//!
//! Everything in this crate is pure: no I/O, no clock access. The API crate
//! feeds it upstream records and stored samples and serializes the results.

pub mod areas;
pub mod error;
pub mod live;
pub mod occupancy;
pub mod percent;
pub mod trends;
pub mod types;
