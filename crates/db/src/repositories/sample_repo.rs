//! Repository for the `occupancy_samples` table (append-only time-series).

use recwatch_core::types::Timestamp;
use sqlx::PgPool;

use crate::models::sample::{CreateSample, Sample};

/// Column list for `occupancy_samples` SELECT queries.
const COLUMNS: &str = "id, recorded_at, area, count, capacity, percent, created_at";

/// Column list for INSERT statements (excludes generated `id` and `created_at`).
const INSERT_COLUMNS: &str = "recorded_at, area, count, capacity, percent";

/// Number of bind parameters per inserted row.
const INSERT_ARITY: usize = 5;

/// Provides query operations for occupancy samples.
pub struct SampleRepo;

impl SampleRepo {
    /// Insert a batch of samples in a single transaction.
    ///
    /// Either every row is written or none is. Returns the number of rows
    /// inserted.
    pub async fn insert_batch(pool: &PgPool, samples: &[CreateSample]) -> Result<u64, sqlx::Error> {
        if samples.is_empty() {
            return Ok(0);
        }

        let mut query = format!("INSERT INTO occupancy_samples ({INSERT_COLUMNS}) VALUES ");
        let mut param_idx = 1usize;
        for i in 0..samples.len() {
            if i > 0 {
                query.push_str(", ");
            }
            query.push('(');
            for j in 0..INSERT_ARITY {
                if j > 0 {
                    query.push_str(", ");
                }
                query.push('$');
                query.push_str(&param_idx.to_string());
                param_idx += 1;
            }
            query.push(')');
        }

        let mut q = sqlx::query(&query);
        for s in samples {
            q = q
                .bind(s.recorded_at)
                .bind(&s.area)
                .bind(s.count)
                .bind(s.capacity)
                .bind(s.percent);
        }

        let mut tx = pool.begin().await?;
        let result = q.execute(&mut *tx).await?;
        tx.commit().await?;

        tracing::debug!(rows = result.rows_affected(), "Inserted occupancy samples");
        Ok(result.rows_affected())
    }

    /// Samples for an area needed to build its trend, oldest first.
    ///
    /// Returns every sample recorded at or after `window_start`, plus the
    /// newest `recent_limit` samples even when they are older than that.
    /// Building a trend from this subset gives the same result as building
    /// it from the whole history of the area.
    pub async fn list_for_trend(
        pool: &PgPool,
        area: &str,
        window_start: Timestamp,
        recent_limit: i64,
    ) -> Result<Vec<Sample>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM occupancy_samples \
             WHERE area = $1 \
               AND (recorded_at >= $2 OR id IN ( \
                   SELECT id FROM occupancy_samples \
                   WHERE area = $1 \
                   ORDER BY recorded_at DESC, id DESC \
                   LIMIT $3)) \
             ORDER BY recorded_at ASC, id ASC"
        );
        sqlx::query_as::<_, Sample>(&query)
            .bind(area)
            .bind(window_start)
            .bind(recent_limit)
            .fetch_all(pool)
            .await
    }

    /// Samples for an area recorded at or after `since`, oldest first.
    pub async fn list_since(
        pool: &PgPool,
        area: &str,
        since: Timestamp,
    ) -> Result<Vec<Sample>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM occupancy_samples \
             WHERE area = $1 AND recorded_at >= $2 \
             ORDER BY recorded_at ASC, id ASC"
        );
        sqlx::query_as::<_, Sample>(&query)
            .bind(area)
            .bind(since)
            .fetch_all(pool)
            .await
    }

    /// The most recent sample for every area that has one.
    ///
    /// Uses `DISTINCT ON` to select the newest row per area.
    pub async fn latest_per_area(pool: &PgPool) -> Result<Vec<Sample>, sqlx::Error> {
        let query = format!(
            "SELECT DISTINCT ON (area) {COLUMNS} FROM occupancy_samples \
             ORDER BY area, recorded_at DESC, id DESC"
        );
        sqlx::query_as::<_, Sample>(&query).fetch_all(pool).await
    }
}
