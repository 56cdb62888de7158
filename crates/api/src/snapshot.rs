//! One polling cycle: fetch upstream counts, aggregate per area, store.

use chrono::Utc;
use recwatch_core::areas::AreaTable;
use recwatch_core::occupancy::{aggregate, AreaOccupancy};
use recwatch_core::types::Timestamp;
use recwatch_db::models::sample::CreateSample;
use recwatch_db::repositories::SampleRepo;
use recwatch_db::DbPool;
use recwatch_upstream::FacilityCountClient;
use serde::Serialize;

use crate::error::AppResult;

/// Outcome of a successful [`log_once`].
#[derive(Debug, Clone, Serialize)]
pub struct LogOutcome {
    pub ran_at: Timestamp,
    pub rows_inserted: u64,
    pub areas: Vec<AreaOccupancy>,
}

/// Record one sample per area, all stamped with the same time.
///
/// The rows are written in a single transaction: on any error nothing is
/// stored and the error is returned instead of a partial count.
pub async fn log_once(
    pool: &DbPool,
    upstream: &FacilityCountClient,
    areas: &AreaTable,
) -> AppResult<LogOutcome> {
    let records = upstream.fetch_counts().await?;
    let aggregated = aggregate(&records, areas);

    let ran_at = Utc::now();
    let samples: Vec<CreateSample> = aggregated
        .values()
        .map(|occupancy| CreateSample::from_occupancy(ran_at, occupancy))
        .collect();

    let rows_inserted = SampleRepo::insert_batch(pool, &samples).await?;
    tracing::info!(
        records = records.len(),
        rows_inserted,
        "Recorded occupancy snapshot"
    );

    Ok(LogOutcome {
        ran_at,
        rows_inserted,
        areas: aggregated.into_values().collect(),
    })
}
