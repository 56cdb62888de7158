//! Occupancy sample entity model and DTOs.

use recwatch_core::occupancy::AreaOccupancy;
use recwatch_core::trends::TrendPoint;
use recwatch_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// One stored occupancy reading for an area (append-only).
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Sample {
    pub id: DbId,
    pub recorded_at: Timestamp,
    pub area: String,
    pub count: i32,
    pub capacity: i32,
    pub percent: f64,
    pub created_at: Timestamp,
}

impl Sample {
    pub fn trend_point(&self) -> TrendPoint {
        TrendPoint {
            timestamp: self.recorded_at,
            percent: self.percent,
        }
    }
}

/// DTO for inserting a new sample row.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateSample {
    pub recorded_at: Timestamp,
    pub area: String,
    pub count: i32,
    pub capacity: i32,
    pub percent: f64,
}

impl CreateSample {
    /// Sample for one aggregated area, stamped with the polling time.
    ///
    /// Counts beyond `i32::MAX` saturate.
    pub fn from_occupancy(recorded_at: Timestamp, occupancy: &AreaOccupancy) -> Self {
        Self {
            recorded_at,
            area: occupancy.area.clone(),
            count: saturate(occupancy.count),
            capacity: saturate(occupancy.capacity),
            percent: occupancy.percent.max(0.0),
        }
    }
}

fn saturate(value: i64) -> i32 {
    i32::try_from(value.max(0)).unwrap_or(i32::MAX)
}
