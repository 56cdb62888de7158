//! Upstream facility-count records and per-area aggregation.

use indexmap::IndexMap;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use crate::areas::AreaTable;
use crate::percent::safe_percent;

/// One entry from the upstream facility-count feed.
///
/// Every field is optional; absent numbers count as zero. Numbers sent as
/// floats or numeric strings are accepted, anything else reads as absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RawRecord {
    pub location_name: Option<String>,
    pub facility_name: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub total_capacity: Option<i64>,
    #[serde(deserialize_with = "lenient_number")]
    pub last_count: Option<i64>,
    #[serde(deserialize_with = "lenient_number")]
    pub count_of_participants: Option<i64>,
    pub is_closed: Option<bool>,
    pub last_updated_date_and_time: Option<String>,
}

impl RawRecord {
    /// Current head count: `LastCount`, else `CountOfParticipants`, else 0.
    pub fn count(&self) -> i64 {
        self.last_count
            .or(self.count_of_participants)
            .unwrap_or(0)
            .max(0)
    }

    pub fn capacity(&self) -> i64 {
        self.total_capacity.unwrap_or(0).max(0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseNumber {
    Int(i64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let whole = |f: f64| f.is_finite().then(|| f.round() as i64);
    Ok(match Option::<LooseNumber>::deserialize(deserializer)? {
        Some(LooseNumber::Int(n)) => Some(n),
        Some(LooseNumber::Float(f)) => whole(f),
        Some(LooseNumber::Text(s)) => s.trim().parse::<f64>().ok().and_then(whole),
        Some(LooseNumber::Other(_)) | None => None,
    })
}

/// Summed occupancy for one friendly area.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaOccupancy {
    pub area: String,
    pub count: i64,
    pub capacity: i64,
    pub percent: f64,
}

/// Sum counts and capacities per area in a single pass over `records`.
///
/// Every area of `table` appears in the result, in table order, even when
/// none of its raw names were present. Records whose location is not in
/// the table are dropped.
pub fn aggregate(records: &[RawRecord], table: &AreaTable) -> IndexMap<String, AreaOccupancy> {
    let mut totals = vec![(0_i64, 0_i64); table.len()];

    for record in records {
        let Some(idx) = record
            .location_name
            .as_deref()
            .and_then(|name| table.index_of(name))
        else {
            continue;
        };
        totals[idx].0 += record.count();
        totals[idx].1 += record.capacity();
    }

    table
        .labels()
        .zip(totals)
        .map(|(area, (count, capacity))| {
            (
                area.to_string(),
                AreaOccupancy {
                    area: area.to_string(),
                    count,
                    capacity,
                    percent: safe_percent(count, capacity),
                },
            )
        })
        .collect()
}
