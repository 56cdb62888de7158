//! Client for the external facility-count API.
//!
//! The API returns a JSON array of location records (occasionally a single
//! bare object). [`FacilityCountClient::fetch_counts`] always hands back a
//! list of [`RawRecord`](recwatch_core::occupancy::RawRecord)s.

pub mod client;

pub use client::{parse_records, FacilityCountClient, UpstreamError};
