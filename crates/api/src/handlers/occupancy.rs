//! Handlers for live occupancy, snapshot logging and history endpoints.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{Duration, Utc};
use indexmap::IndexMap;
use recwatch_core::live::LiveSnapshot;
use recwatch_core::occupancy::{aggregate, AreaOccupancy};
use recwatch_core::trends::{build_trend, window_start_date, TrendPoint, TrendResult};
use recwatch_core::types::Timestamp;
use recwatch_db::models::sample::Sample;
use recwatch_db::repositories::SampleRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::query::{require_area, HistoryParams, SampleParams, ValidQuery};
use crate::response::DataResponse;
use crate::snapshot;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Live view: every upstream location plus the per-area totals.
#[derive(Debug, Serialize)]
pub struct LiveResponse {
    #[serde(flatten)]
    pub snapshot: LiveSnapshot,
    pub areas: IndexMap<String, AreaOccupancy>,
}

/// Trend views for one area.
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub area: String,
    pub as_of: Timestamp,
    pub lookback_days: u32,
    #[serde(flatten)]
    pub trend: TrendResult,
}

// ---------------------------------------------------------------------------
// Live
// ---------------------------------------------------------------------------

/// GET /api/live
///
/// Proxies the facility-count API. Does not touch storage.
pub async fn get_live(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let records = state.upstream.fetch_counts().await?;
    let areas = aggregate(&records, &state.areas);
    let snapshot = LiveSnapshot::new(Utc::now(), &records);

    Ok(Json(DataResponse {
        data: LiveResponse { snapshot, areas },
    }))
}

/// GET /api/areas
///
/// The area table: each friendly label and the raw names it covers.
pub async fn list_areas(State(state): State<AppState>) -> impl IntoResponse {
    Json(DataResponse {
        data: state.areas.areas().to_vec(),
    })
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// GET|POST /api/log
///
/// Fetches current counts and stores one sample per area. Fails with a
/// configuration error before contacting upstream when no store is set up.
pub async fn log_snapshot(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let pool = state.pool()?;
    let outcome = snapshot::log_once(pool, &state.upstream, &state.areas).await?;
    Ok(Json(DataResponse { data: outcome }))
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// GET /api/history?area=<label>[&days=N][&limit=N]
///
/// Recent points, today's points, hourly baseline and weekday × hour heatmap
/// for one area. An area with no samples yields the null-filled shape.
pub async fn get_history(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<HistoryParams>,
) -> AppResult<impl IntoResponse> {
    let area = require_area(params.area.as_deref())?;
    let options = params.trend_options()?;
    let pool = state.pool()?;

    let now = Utc::now();
    let today = now.date_naive();
    let window_start = window_start_date(today, options.lookback_days)
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
        .unwrap_or(now);

    let samples =
        SampleRepo::list_for_trend(pool, area, window_start, options.max_recent as i64).await?;
    let points: Vec<TrendPoint> = samples.iter().map(Sample::trend_point).collect();

    tracing::debug!(area, samples = points.len(), "Building occupancy trend");

    Ok(Json(DataResponse {
        data: HistoryResponse {
            area: area.to_string(),
            as_of: now,
            lookback_days: options.lookback_days,
            trend: build_trend(&points, today, options),
        },
    }))
}

/// GET /api/samples?area=<label>[&hours=N]
///
/// Raw stored samples for one area over the last N hours (default 24),
/// oldest first.
pub async fn list_samples(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<SampleParams>,
) -> AppResult<impl IntoResponse> {
    let area = require_area(params.area.as_deref())?;
    let hours = params.hours()?;
    let pool = state.pool()?;

    let since = Utc::now() - Duration::hours(hours);
    let samples = SampleRepo::list_since(pool, area, since).await?;
    Ok(Json(DataResponse { data: samples }))
}

/// GET /api/latest
///
/// The newest stored sample for every area.
pub async fn get_latest(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let pool = state.pool()?;
    let samples = SampleRepo::latest_per_area(pool).await?;
    Ok(Json(DataResponse { data: samples }))
}
