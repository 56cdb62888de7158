//! Per-location view of the upstream feed.

use serde::Serialize;

use crate::areas::display_name;
use crate::occupancy::RawRecord;
use crate::percent::safe_percent;
use crate::types::Timestamp;

/// A single upstream location reshaped for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiveLocation {
    pub raw_name: Option<String>,
    pub name: String,
    pub facility: Option<String>,
    pub count: i64,
    pub capacity: i64,
    pub percent: f64,
    pub is_closed: bool,
    pub last_updated: Option<String>,
}

impl From<&RawRecord> for LiveLocation {
    fn from(record: &RawRecord) -> Self {
        let count = record.count();
        let capacity = record.capacity();
        Self {
            raw_name: record.location_name.clone(),
            name: display_name(record.location_name.as_deref()),
            facility: record.facility_name.clone(),
            count,
            capacity,
            percent: safe_percent(count, capacity),
            is_closed: record.is_closed.unwrap_or(false),
            last_updated: record.last_updated_date_and_time.clone(),
        }
    }
}

/// Snapshot of every upstream location at `as_of`.
#[derive(Debug, Clone, Serialize)]
pub struct LiveSnapshot {
    pub as_of: Timestamp,
    pub locations: Vec<LiveLocation>,
}

impl LiveSnapshot {
    pub fn new(as_of: Timestamp, records: &[RawRecord]) -> Self {
        Self {
            as_of,
            locations: records.iter().map(LiveLocation::from).collect(),
        }
    }
}
