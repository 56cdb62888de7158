//! Query parameter types for API handlers and their validation.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use recwatch_core::trends::{TrendOptions, DEFAULT_LOOKBACK_DAYS, DEFAULT_MAX_RECENT};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Longest history window a client may ask for, in days.
pub const MAX_LOOKBACK_DAYS: u32 = 90;

/// Cap on `limit` for the history endpoint.
pub const MAX_RECENT_LIMIT: usize = 5000;

/// Default window for the raw samples endpoint, in hours.
pub const DEFAULT_SAMPLE_HOURS: i64 = 24;

/// Longest window for the raw samples endpoint, in hours.
pub const MAX_SAMPLE_HOURS: i64 = 24 * MAX_LOOKBACK_DAYS as i64;

/// Query-string extractor whose rejection is an [`AppError::BadRequest`].
///
/// Use in place of [`Query`] so an unparseable value such as `?days=abc`
/// gets the JSON error body instead of axum's plain-text rejection.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(ValidQuery(value))
    }
}

/// `?area=&days=&limit=` for `GET /api/history`.
#[derive(Debug, Default, Deserialize)]
pub struct HistoryParams {
    pub area: Option<String>,
    /// Baseline/heatmap lookback in days (default 14).
    pub days: Option<u32>,
    /// Number of recent points to return (default 300).
    pub limit: Option<usize>,
}

impl HistoryParams {
    /// Validated trend options, falling back to the defaults.
    pub fn trend_options(&self) -> AppResult<TrendOptions> {
        let lookback_days = self.days.unwrap_or(DEFAULT_LOOKBACK_DAYS);
        if !(1..=MAX_LOOKBACK_DAYS).contains(&lookback_days) {
            return Err(AppError::BadRequest(format!(
                "days must be between 1 and {MAX_LOOKBACK_DAYS}"
            )));
        }

        let max_recent = self.limit.unwrap_or(DEFAULT_MAX_RECENT);
        if !(1..=MAX_RECENT_LIMIT).contains(&max_recent) {
            return Err(AppError::BadRequest(format!(
                "limit must be between 1 and {MAX_RECENT_LIMIT}"
            )));
        }

        Ok(TrendOptions {
            lookback_days,
            max_recent,
        })
    }
}

/// `?area=&hours=` for `GET /api/samples`.
#[derive(Debug, Default, Deserialize)]
pub struct SampleParams {
    pub area: Option<String>,
    pub hours: Option<i64>,
}

impl SampleParams {
    pub fn hours(&self) -> AppResult<i64> {
        let hours = self.hours.unwrap_or(DEFAULT_SAMPLE_HOURS);
        if !(1..=MAX_SAMPLE_HOURS).contains(&hours) {
            return Err(AppError::BadRequest(format!(
                "hours must be between 1 and {MAX_SAMPLE_HOURS}"
            )));
        }
        Ok(hours)
    }
}

/// Extract a required, non-blank `area` parameter.
pub fn require_area(area: Option<&str>) -> AppResult<&str> {
    match area.map(str::trim) {
        Some(area) if !area.is_empty() => Ok(area),
        _ => Err(AppError::BadRequest(
            "area query parameter is required".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn area_is_required() {
        assert_matches!(require_area(None), Err(AppError::BadRequest(_)));
        assert_matches!(require_area(Some("  ")), Err(AppError::BadRequest(_)));
        assert_eq!(require_area(Some(" Aquatics ")).unwrap(), "Aquatics");
    }

    #[test]
    fn history_defaults() {
        let options = HistoryParams::default().trend_options().unwrap();
        assert_eq!(options, TrendOptions::default());
    }

    #[test]
    fn history_rejects_out_of_range() {
        let params = HistoryParams {
            days: Some(0),
            ..Default::default()
        };
        assert_matches!(params.trend_options(), Err(AppError::BadRequest(_)));

        let params = HistoryParams {
            limit: Some(MAX_RECENT_LIMIT + 1),
            ..Default::default()
        };
        assert_matches!(params.trend_options(), Err(AppError::BadRequest(_)));
    }

    #[test]
    fn sample_hours_bounds() {
        assert_eq!(SampleParams::default().hours().unwrap(), DEFAULT_SAMPLE_HOURS);
        let params = SampleParams {
            hours: Some(MAX_SAMPLE_HOURS + 1),
            ..Default::default()
        };
        assert_matches!(params.hours(), Err(AppError::BadRequest(_)));
    }
}
