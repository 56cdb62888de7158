//! Periodic occupancy snapshots.
//!
//! Replaces an external cron hitting `/api/log`: calls
//! [`log_once`](crate::snapshot::log_once) on a fixed interval using
//! `tokio::time::interval`.

use std::sync::Arc;
use std::time::Duration;

use recwatch_core::areas::AreaTable;
use recwatch_db::DbPool;
use recwatch_upstream::FacilityCountClient;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::snapshot::log_once;

/// Run the snapshot loop until `cancel` is triggered.
///
/// The first snapshot is taken immediately. Failures are logged and the
/// loop carries on with the next tick.
pub async fn run(
    pool: DbPool,
    upstream: Arc<FacilityCountClient>,
    areas: Arc<AreaTable>,
    every: Duration,
    cancel: CancellationToken,
) {
    tracing::info!(interval_secs = every.as_secs(), "Sample logger started");

    let mut interval = tokio::time::interval(every);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Sample logger stopping");
                break;
            }
            _ = interval.tick() => {
                match log_once(&pool, &upstream, &areas).await {
                    Ok(outcome) => {
                        tracing::debug!(rows_inserted = outcome.rows_inserted, "Sample logger: snapshot stored");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Sample logger: snapshot failed");
                    }
                }
            }
        }
    }
}
